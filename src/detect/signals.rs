// Tue Jan 20 2026 - Alex

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    HiddenStory,
    MutedReel,
    BlockedReel,
}

impl SignalCategory {
    pub fn message(&self, value: bool) -> &'static str {
        match (self, value) {
            (Self::HiddenStory, true) => "This user hid their story from you",
            (Self::HiddenStory, false) => "This user does not hide their story from you",
            (Self::MutedReel, true) => "This user muted your stories",
            (Self::MutedReel, false) => "This user does not mute your stories",
            (Self::BlockedReel, true) => "This user blocked your stories",
            (Self::BlockedReel, false) => "This user does not block your stories",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HiddenStory => "hidden_story",
            Self::MutedReel => "muted_reel",
            Self::BlockedReel => "blocked_reel",
        }
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `false` results are reported as well as `true` ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuePolicy {
    #[default]
    TrueOnly,
    LogBoth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SignalKind {
    Categorized { category: SignalCategory },
    /// Boolean method with no known meaning, reported by position so the
    /// layout can be mapped by hand.
    Unclassified { ordinal: usize },
}

impl SignalKind {
    pub fn message(&self, method_name: &str, value: bool) -> String {
        match self {
            Self::Categorized { category } => category.message(value).to_string(),
            Self::Unclassified { ordinal } => {
                format!("Story status detected (method[{}]: {} = {})", ordinal, method_name, value)
            }
        }
    }
}

pub struct KeywordRule {
    pub category: SignalCategory,
    pub exact: &'static [&'static str],
    pub pair: (&'static str, &'static str),
}

impl KeywordRule {
    pub fn matches(&self, lowered: &str) -> bool {
        self.exact.iter().any(|e| lowered.contains(e))
            || (lowered.contains(self.pair.0) && lowered.contains(self.pair.1))
    }
}

pub static KEYWORD_RULES: Lazy<Vec<KeywordRule>> = Lazy::new(|| {
    vec![
        KeywordRule {
            category: SignalCategory::HiddenStory,
            exact: &["hidestory", "hide_story"],
            pair: ("hide", "story"),
        },
        KeywordRule {
            category: SignalCategory::MutedReel,
            exact: &["mutingreel", "muting_reel"],
            pair: ("mute", "reel"),
        },
        KeywordRule {
            category: SignalCategory::BlockedReel,
            exact: &["blockingreel", "blocking_reel"],
            pair: ("block", "reel"),
        },
    ]
});

/// Every category whose keywords appear in the method name.
pub fn classify_name(name: &str) -> Vec<SignalCategory> {
    let lowered = name.to_lowercase();
    KEYWORD_RULES
        .iter()
        .filter(|rule| rule.matches(&lowered))
        .map(|rule| rule.category)
        .collect()
}
