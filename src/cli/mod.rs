// Wed Jan 21 2026 - Alex

pub mod args;
pub mod handler;

pub use args::{Args, Command, HooksArgs, ResolveArgs};
pub use handler::CommandHandler;
