// Tue Jan 20 2026 - Alex

use parking_lot::RwLock;
use std::collections::BTreeMap;

pub const FOLLOWER_FEATURE: &str = "ShowFollowerToast";
pub const STORY_HIDDEN_FEATURE: &str = "ShowStoryHiddenToast";
pub const STORY_HIDE_FEATURE: &str = "ShowStoryHideToast";

/// Per-feature count of installed hooks, read by whatever reports status.
pub struct FeatureStatusTracker {
    hooked: RwLock<BTreeMap<String, usize>>,
}

impl FeatureStatusTracker {
    pub fn new() -> Self {
        Self {
            hooked: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn set_hooked(&self, feature: &str) {
        *self.hooked.write().entry(feature.to_string()).or_insert(0) += 1;
    }

    pub fn is_hooked(&self, feature: &str) -> bool {
        self.hook_count(feature) > 0
    }

    pub fn hook_count(&self, feature: &str) -> usize {
        self.hooked.read().get(feature).copied().unwrap_or(0)
    }

    pub fn snapshot(&self) -> BTreeMap<String, usize> {
        self.hooked.read().clone()
    }
}

impl Default for FeatureStatusTracker {
    fn default() -> Self {
        Self::new()
    }
}
