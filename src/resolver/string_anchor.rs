// Mon Jan 19 2026 - Alex

use crate::query::QueryService;
use crate::resolver::walk::boolean_invokes_on;
use crate::resolver::{Candidate, MatchStrategy, ResolveError, StrategyTag};

/// Uses literal strings that survive renaming to locate the obfuscated
/// owner type, then walks the call graph of a method that takes
/// `(companion_type, owner)` for a boolean accessor on the owner.
pub struct StringAnchorStrategy {
    anchor_strings: Vec<String>,
    companion_type: String,
}

impl StringAnchorStrategy {
    pub fn new(anchor_strings: &[String], companion_type: &str) -> Self {
        Self {
            anchor_strings: anchor_strings.to_vec(),
            companion_type: companion_type.to_string(),
        }
    }
}

impl MatchStrategy for StringAnchorStrategy {
    fn tag(&self) -> StrategyTag {
        StrategyTag::StringAnchor
    }

    fn search(&self, query: &dyn QueryService) -> Result<Vec<Candidate>, ResolveError> {
        if self.anchor_strings.is_empty() {
            return Err(ResolveError::InvalidParameters("no anchor strings".to_string()));
        }

        let strings: Vec<&str> = self.anchor_strings.iter().map(|s| s.as_str()).collect();
        let anchors = query.find_by_used_strings(&strings)?;

        let Some(anchor) = anchors.first() else {
            return Ok(Vec::new());
        };
        let anchor_type = anchor.owning_type.as_str();
        log::debug!("Anchor strings {:?} resolve to {}", self.anchor_strings, anchor_type);

        let callers = query.find_by_param_types(&[self.companion_type.as_str(), anchor_type])?;
        let found = boolean_invokes_on(query, &callers, anchor_type)?;

        Ok(found
            .into_iter()
            .map(|m| Candidate::new(m, anchor_type))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetConfig;
    use crate::query::{InMemoryIndex, MethodSpec};
    use crate::testing::add_string_anchor_layout;

    fn strategy(targets: &TargetConfig) -> StringAnchorStrategy {
        StringAnchorStrategy::new(&targets.anchor_strings, &targets.session_type)
    }

    #[test]
    fn test_finds_boolean_on_anchor_type() {
        let targets = TargetConfig::default();
        let mut index = InMemoryIndex::new();
        let followed = add_string_anchor_layout(&mut index, &targets);

        let found = strategy(&targets).search(&index).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].method.id, followed);
        assert_eq!(found[0].anchor_type, "X.a");
        assert!(found[0].companion.is_none());
    }

    #[test]
    fn test_first_matching_invoke_wins() {
        let targets = TargetConfig::default();
        let mut index = InMemoryIndex::new();
        let first = add_string_anchor_layout(&mut index, &targets);
        let caller = index
            .find_by_param_types(&[targets.session_type.as_str(), "X.a"])
            .unwrap()
            .remove(0);
        let second = index.add_method(MethodSpec::new("X.a", "z", "boolean"));
        index.add_invoke(caller.id, second).unwrap();

        let found = strategy(&targets).search(&index).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].method.id, first);
    }

    #[test]
    fn test_missing_anchor_falls_through() {
        let targets = TargetConfig::default();
        let index = InMemoryIndex::new();
        assert!(strategy(&targets).search(&index).unwrap().is_empty());
    }

    #[test]
    fn test_anchor_without_caller_falls_through() {
        let targets = TargetConfig::default();
        let mut index = InMemoryIndex::new();
        index.add_method(MethodSpec::new("X.a", "load", "void").with_strings(&["ERROR_INSERT_EXPIRED_URL"]));

        assert!(strategy(&targets).search(&index).unwrap().is_empty());
    }

    #[test]
    fn test_empty_anchor_list_is_an_error() {
        let s = StringAnchorStrategy::new(&[], "S");
        assert!(matches!(
            s.search(&InMemoryIndex::new()),
            Err(ResolveError::InvalidParameters(_))
        ));
    }
}
