// Mon Jan 19 2026 - Alex

use crate::query::{MethodDescriptor, MethodMatcher, QueryError};

/// Read-only structural queries over an indexed binary.
///
/// Implementations must return results in the backend's native enumeration
/// order and must return the same order for the same query every time.
/// Ordinal strategies depend on it.
pub trait QueryService: Send + Sync {
    fn find_methods(&self, matcher: &MethodMatcher) -> Result<Vec<MethodDescriptor>, QueryError>;

    fn invoked_methods(&self, method: &MethodDescriptor) -> Result<Vec<MethodDescriptor>, QueryError>;

    fn find_by_declaring_type_and_return_type(
        &self,
        declaring_type: &str,
        return_type: &str,
    ) -> Result<Vec<MethodDescriptor>, QueryError> {
        self.find_methods(
            &MethodMatcher::new()
                .declared_class(declaring_type)
                .return_type(return_type),
        )
    }

    fn find_by_used_strings(&self, strings: &[&str]) -> Result<Vec<MethodDescriptor>, QueryError> {
        self.find_methods(&MethodMatcher::new().using_strings(strings))
    }

    fn find_by_param_types(&self, types: &[&str]) -> Result<Vec<MethodDescriptor>, QueryError> {
        self.find_methods(&MethodMatcher::new().param_types(types))
    }

    fn find_by_param_count(&self, count: usize) -> Result<Vec<MethodDescriptor>, QueryError> {
        self.find_methods(&MethodMatcher::new().param_count(count))
    }

    fn find_by_declaring_type_and_name(
        &self,
        declaring_type: &str,
        name: &str,
        return_type: &str,
    ) -> Result<Vec<MethodDescriptor>, QueryError> {
        self.find_methods(
            &MethodMatcher::new()
                .declared_class(declaring_type)
                .name(name)
                .return_type(return_type),
        )
    }
}
