// Mon Jan 19 2026 - Alex

use crate::query::{MethodDescriptor, QueryError, QueryService};
use ahash::AHashSet;

/// Methods invoked by any of `callers` that are declared on `owner` and
/// return a boolean, in caller order then call order. Repeats are dropped.
pub fn boolean_invokes_on(
    query: &dyn QueryService,
    callers: &[MethodDescriptor],
    owner: &str,
) -> Result<Vec<MethodDescriptor>, QueryError> {
    let mut seen = AHashSet::new();
    let mut found = Vec::new();

    for caller in callers {
        for invoked in query.invoked_methods(caller)? {
            if invoked.owning_type == owner && invoked.returns_boolean() && seen.insert(invoked.id) {
                found.push(invoked);
            }
        }
    }

    Ok(found)
}
