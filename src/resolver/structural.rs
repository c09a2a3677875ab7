// Mon Jan 19 2026 - Alex

use crate::query::QueryService;
use crate::resolver::walk::boolean_invokes_on;
use crate::resolver::{Candidate, MatchStrategy, ResolveError, StrategyTag};

/// Last resort: any two-parameter method shaped `(session_type, user_type)`,
/// then the first boolean accessor on the user type it calls.
pub struct StructuralShapeStrategy {
    session_type: String,
    user_type: String,
}

impl StructuralShapeStrategy {
    pub fn new(session_type: &str, user_type: &str) -> Self {
        Self {
            session_type: session_type.to_string(),
            user_type: user_type.to_string(),
        }
    }
}

impl MatchStrategy for StructuralShapeStrategy {
    fn tag(&self) -> StrategyTag {
        StrategyTag::StructuralShape
    }

    fn search(&self, query: &dyn QueryService) -> Result<Vec<Candidate>, ResolveError> {
        let callers: Vec<_> = query
            .find_by_param_count(2)?
            .into_iter()
            .filter(|m| {
                matches!(m.param_types.as_slice(), [s, u] if *s == self.session_type && *u == self.user_type)
            })
            .collect();

        log::debug!("{} methods shaped ({}, {})", callers.len(), self.session_type, self.user_type);

        let found = boolean_invokes_on(query, &callers, &self.user_type)?;
        Ok(found
            .into_iter()
            .map(|m| Candidate::new(m, &self.user_type))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetConfig;
    use crate::query::{InMemoryIndex, MethodDescriptor, MethodId, MethodMatcher, MethodSpec, QueryError};
    use crate::testing::add_structural_layout;

    /// Backend that ignores the matcher and answers with one parameterless method.
    struct CarelessBackend;

    impl QueryService for CarelessBackend {
        fn find_methods(&self, _matcher: &MethodMatcher) -> Result<Vec<MethodDescriptor>, QueryError> {
            Ok(vec![MethodDescriptor::new(MethodId::new(0), "Y.r", "render", "void")])
        }

        fn invoked_methods(&self, _method: &MethodDescriptor) -> Result<Vec<MethodDescriptor>, QueryError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_finds_boolean_on_user_type() {
        let targets = TargetConfig::default();
        let mut index = InMemoryIndex::new();
        let followed = add_structural_layout(&mut index, &targets);

        let found = StructuralShapeStrategy::new(targets.session_type.as_str(), &targets.user_type)
            .search(&index)
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].method.id, followed);
        assert_eq!(found[0].anchor_type, targets.user_type);
    }

    #[test]
    fn test_parameter_order_matters() {
        let targets = TargetConfig::default();
        let mut index = InMemoryIndex::new();
        let caller = index.add_method(
            MethodSpec::new("Y.r", "render", "void").with_params(&[targets.user_type.as_str(), targets.session_type.as_str()]),
        );
        let flag = index.add_method(MethodSpec::new(targets.user_type.as_str(), "h", "boolean"));
        index.add_invoke(caller, flag).unwrap();

        let found = StructuralShapeStrategy::new(targets.session_type.as_str(), &targets.user_type)
            .search(&index)
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_backend_ignoring_param_count_does_not_panic() {
        let targets = TargetConfig::default();
        let found = StructuralShapeStrategy::new(&targets.session_type, &targets.user_type)
            .search(&CarelessBackend)
            .unwrap();
        assert!(found.is_empty());
    }
}
