// Tue Jan 20 2026 - Alex

pub mod error;
pub mod installer;
pub mod recording;
pub mod status;
pub mod substrate;
pub mod value;

pub use error::{InstallError, ObservationError};
pub use installer::{HookInstaller, HookPoint, HookRole, InstallReport};
pub use recording::RecordingSubstrate;
pub use status::{FeatureStatusTracker, FOLLOWER_FEATURE, STORY_HIDDEN_FEATURE, STORY_HIDE_FEATURE};
pub use substrate::{HookCallback, InterceptionSubstrate};
pub use value::{CallFrame, HookValue, Receiver};
