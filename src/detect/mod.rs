// Tue Jan 20 2026 - Alex

pub mod detector;
pub mod signals;

pub use detector::{MatchSource, SignalMatch, StoryHideDetector};
pub use signals::{classify_name, KeywordRule, SignalCategory, SignalKind, ValuePolicy, KEYWORD_RULES};
