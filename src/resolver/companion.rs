// Mon Jan 19 2026 - Alex

use crate::query::QueryService;
use crate::resolver::ResolveError;

const STRING_TYPE: &str = "java.lang.String";

/// Finds the type that carries a per-entity identifier when resolution only
/// produced the ambiguous interface type. Never installs anything.
pub struct CompanionIdentifierLookup {
    interface_type: String,
    anchor_string: String,
    stringify_method: String,
}

impl CompanionIdentifierLookup {
    pub fn new(interface_type: &str, anchor_string: &str, stringify_method: &str) -> Self {
        Self {
            interface_type: interface_type.to_string(),
            anchor_string: anchor_string.to_string(),
            stringify_method: stringify_method.to_string(),
        }
    }

    pub fn lookup(&self, query: &dyn QueryService, anchor_type: &str) -> Result<Option<String>, ResolveError> {
        if anchor_type != self.interface_type {
            return Ok(Some(anchor_type.to_string()));
        }

        let referencing = query.find_by_used_strings(&[self.anchor_string.as_str()])?;
        let Some(first) = referencing.first() else {
            log::debug!("Nothing references {:?}", self.anchor_string);
            return Ok(None);
        };
        let identified_type = first.owning_type.clone();

        let stringifiers =
            query.find_by_declaring_type_and_name(&identified_type, &self.stringify_method, STRING_TYPE)?;

        if let Some(stringify) = stringifiers.first() {
            if let Some(invoked) = query.invoked_methods(stringify)?.into_iter().next() {
                log::debug!("{}.{} first calls into {}", identified_type, self.stringify_method, invoked.owning_type);
                return Ok(Some(invoked.owning_type));
            }
        }

        Ok(Some(identified_type))
    }
}
