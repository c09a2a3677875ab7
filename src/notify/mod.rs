// Tue Jan 20 2026 - Alex

pub mod key;
pub mod notifier;
pub mod session;
pub mod sink;
pub mod timer;

pub use key::DedupKey;
pub use notifier::{follow_message, EventNotifier, NotifyOutcome, SuppressReason, DEFAULT_CLEAR_DELAY};
pub use session::ObservationSession;
pub use sink::{CollectingSink, LogSink, NotificationSink};
pub use timer::{DelayScheduler, DelayedTask, ManualScheduler, ThreadDelayScheduler};
