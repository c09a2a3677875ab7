// Tue Jan 15 2026 - Alex

pub mod cli;
pub mod config;
pub mod detect;
pub mod hook;
pub mod notify;
pub mod pipeline;
pub mod query;
pub mod resolver;
pub mod utils;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use detect::StoryHideDetector;
pub use hook::{HookInstaller, InterceptionSubstrate};
pub use notify::EventNotifier;
pub use pipeline::{Pipeline, PipelineReport};
pub use query::{InMemoryIndex, QueryService};
pub use resolver::{FallbackChain, Resolution};
