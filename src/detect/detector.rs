// Tue Jan 20 2026 - Alex

use crate::config::{DetectorConfig, StringKey};
use crate::detect::{classify_name, SignalKind};
use crate::query::{MethodDescriptor, MethodMatcher, QueryService};
use itertools::Itertools;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    StringKey(String),
    NameHeuristic,
    Unclassified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalMatch {
    pub method: MethodDescriptor,
    pub kind: SignalKind,
    pub source: MatchSource,
}

/// Story-hide detection. Unlike the follow-status chain every search runs
/// and all hits are kept; the same method may appear more than once.
pub struct StoryHideDetector {
    scan_type: String,
    string_keys: Vec<StringKey>,
    include_unclassified: bool,
}

impl StoryHideDetector {
    pub fn new(scan_type: &str) -> Self {
        Self {
            scan_type: scan_type.to_string(),
            string_keys: Vec::new(),
            include_unclassified: false,
        }
    }

    pub fn from_config(config: &DetectorConfig) -> Self {
        Self::new(&config.scan_type)
            .with_string_keys(config.string_keys.clone())
            .with_unclassified(config.include_unclassified)
    }

    pub fn with_string_keys(mut self, keys: Vec<StringKey>) -> Self {
        self.string_keys = keys;
        self
    }

    pub fn with_unclassified(mut self, enabled: bool) -> Self {
        self.include_unclassified = enabled;
        self
    }

    pub fn detect(&self, query: &dyn QueryService) -> Vec<SignalMatch> {
        let mut matches = self.by_string_keys(query);

        let booleans = match self.boolean_methods(query) {
            Ok(methods) => methods,
            Err(e) => {
                log::warn!("Listing boolean methods on {} failed: {}", self.scan_type, e);
                Vec::new()
            }
        };

        matches.extend(Self::by_name(&booleans));

        if matches.is_empty() && self.include_unclassified {
            log::info!("No named signals found, probing {} boolean methods", booleans.len());
            matches.extend(booleans.into_iter().enumerate().map(|(ordinal, method)| SignalMatch {
                method,
                kind: SignalKind::Unclassified { ordinal },
                source: MatchSource::Unclassified,
            }));
        }

        log::debug!("Detector produced {} matches", matches.len());
        matches
    }

    pub fn by_string_keys(&self, query: &dyn QueryService) -> Vec<SignalMatch> {
        let mut found = Vec::new();

        for key in &self.string_keys {
            let methods = match query.find_by_used_strings(&[key.key.as_str()]) {
                Ok(methods) => methods,
                Err(e) => {
                    log::warn!("String search for {:?} failed: {}", key.key, e);
                    continue;
                }
            };

            found.extend(methods.into_iter().filter(|m| m.returns_boolean()).map(|method| SignalMatch {
                method,
                kind: SignalKind::Categorized { category: key.category },
                source: MatchSource::StringKey(key.key.clone()),
            }));
        }

        found
    }

    pub fn by_name(booleans: &[MethodDescriptor]) -> Vec<SignalMatch> {
        let mut found = Vec::new();

        for method in booleans {
            for category in classify_name(&method.name) {
                found.push(SignalMatch {
                    method: method.clone(),
                    kind: SignalKind::Categorized { category },
                    source: MatchSource::NameHeuristic,
                });
            }
        }

        found
    }

    fn boolean_methods(
        &self,
        query: &dyn QueryService,
    ) -> Result<Vec<MethodDescriptor>, crate::query::QueryError> {
        let booleans: Vec<_> = query
            .find_methods(&MethodMatcher::new().declared_class(&self.scan_type))?
            .into_iter()
            .filter(|m| m.returns_boolean())
            .collect();

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Boolean methods on {}: {}", self.scan_type, ordinal_listing(&booleans));
        }
        Ok(booleans)
    }
}

/// `[0:name] [1:name] ...` in enumeration order, for mapping ordinals by hand.
fn ordinal_listing(methods: &[MethodDescriptor]) -> String {
    methods
        .iter()
        .enumerate()
        .map(|(i, m)| format!("[{}:{}]", i, m.name))
        .join(" ")
}
