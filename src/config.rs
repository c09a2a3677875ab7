// Mon Jan 19 2026 - Alex

use crate::detect::{SignalCategory, ValuePolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub targets: TargetConfig,
    pub detector: DetectorConfig,
    pub features: FeatureFlags,
    pub notify: NotifyConfig,
}

/// Type names and fingerprints for the follow-status target.
///
/// The ordinals are positions in the declared-method enumeration of
/// `interface_type` and only hold for the layout they were taken from
/// (`layout_revision`). Expect to update them when the target binary moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub layout_revision: String,
    pub interface_type: String,
    pub boolean_type: String,
    pub primary_ordinal: usize,
    pub companion_ordinal: Option<usize>,
    pub anchor_strings: Vec<String>,
    pub session_type: String,
    pub user_type: String,
    pub identifier_anchor_string: String,
    pub stringify_method: String,
    pub identifier_accessor: String,
    pub label_accessor: String,
    pub impl_suffix: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            layout_revision: "418.0.0.0.11".to_string(),
            interface_type: "com.instagram.user.model.FriendshipStatus".to_string(),
            boolean_type: "java.lang.Boolean".to_string(),
            primary_ordinal: 1,
            companion_ordinal: Some(13),
            anchor_strings: vec!["ERROR_INSERT_EXPIRED_URL".to_string()],
            session_type: "com.instagram.common.session.UserSession".to_string(),
            user_type: "com.instagram.user.model.User".to_string(),
            identifier_anchor_string: "username_missing_during_update".to_string(),
            stringify_method: "toString".to_string(),
            identifier_accessor: "getId".to_string(),
            label_accessor: "getUsername".to_string(),
            impl_suffix: "Impl".to_string(),
        }
    }
}

impl TargetConfig {
    pub fn implementation_type(&self) -> String {
        format!("{}{}", self.interface_type, self.impl_suffix)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringKey {
    pub key: String,
    pub category: SignalCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub scan_type: String,
    pub string_keys: Vec<StringKey>,
    pub value_policy: ValuePolicy,
    pub include_unclassified: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            scan_type: "com.instagram.user.model.FriendshipStatusImpl".to_string(),
            string_keys: vec![
                StringKey { key: "hide_story".to_string(), category: SignalCategory::HiddenStory },
                StringKey { key: "is_muting_reel".to_string(), category: SignalCategory::MutedReel },
                StringKey { key: "is_blocking_reel".to_string(), category: SignalCategory::BlockedReel },
            ],
            value_policy: ValuePolicy::TrueOnly,
            include_unclassified: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub show_follower_toast: bool,
    pub show_story_hidden_toast: bool,
    pub show_story_hide_toast: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            show_follower_toast: true,
            show_story_hidden_toast: true,
            show_story_hide_toast: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub clear_delay_ms: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self { clear_delay_ms: 2000 }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn with_features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    pub fn with_value_policy(mut self, policy: ValuePolicy) -> Self {
        self.detector.value_policy = policy;
        self
    }

    pub fn with_clear_delay_ms(mut self, delay: u64) -> Self {
        self.notify.clear_delay_ms = delay;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        let t = &self.targets;
        if t.interface_type.is_empty() || t.user_type.is_empty() || t.session_type.is_empty() {
            return Err("interface_type, user_type and session_type must be set".to_string());
        }
        if let Some(companion) = t.companion_ordinal {
            if companion == t.primary_ordinal {
                return Err("companion_ordinal must differ from primary_ordinal".to_string());
            }
        }
        if t.anchor_strings.iter().any(|s| s.is_empty()) {
            return Err("anchor_strings must not contain empty strings".to_string());
        }
        if t.impl_suffix.is_empty() {
            return Err("impl_suffix must not be empty".to_string());
        }
        if self.detector.string_keys.iter().any(|k| k.key.is_empty()) {
            return Err("detector string keys must not be empty".to_string());
        }
        if self.notify.clear_delay_ms == 0 {
            return Err("clear_delay_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}
