// Mon Jan 19 2026 - Alex

//! Fixtures shared by the unit tests.

use crate::config::TargetConfig;
use crate::hook::{HookValue, ObservationError, Receiver};
use crate::query::{InMemoryIndex, MethodId, MethodSpec};
use ahash::AHashMap;

pub const BOOLEAN: &str = "java.lang.Boolean";

/// Index with `count` boolean methods declared on the configured interface
/// type, named `m0`, `m1`, ... in enumeration order.
pub fn ordinal_index(targets: &TargetConfig, count: usize) -> InMemoryIndex {
    let mut index = InMemoryIndex::new();
    add_ordinal_methods(&mut index, targets, count);
    index
}

pub fn add_ordinal_methods(index: &mut InMemoryIndex, targets: &TargetConfig, count: usize) {
    for i in 0..count {
        index.add_method(MethodSpec::new(&targets.interface_type, &format!("m{}", i), BOOLEAN));
    }
}

/// Anchor class `X.a` referencing the anchor string, a caller taking
/// `(session, X.a)` that invokes a non-boolean then a boolean method on `X.a`.
pub fn add_string_anchor_layout(index: &mut InMemoryIndex, targets: &TargetConfig) -> MethodId {
    let anchor_strings: Vec<&str> = targets.anchor_strings.iter().map(|s| s.as_str()).collect();
    index.add_method(MethodSpec::new("X.a", "load", "void").with_strings(&anchor_strings));

    let caller = index.add_method(
        MethodSpec::new("X.b", "bind", "void").with_params(&[targets.session_type.as_str(), "X.a"]),
    );
    let other = index.add_method(MethodSpec::new("X.a", "count", "int"));
    let followed = index.add_method(MethodSpec::new("X.a", "f", "boolean"));
    let unrelated = index.add_method(MethodSpec::new("X.c", "g", "boolean"));

    index.add_invoke(caller, other).unwrap();
    index.add_invoke(caller, unrelated).unwrap();
    index.add_invoke(caller, followed).unwrap();
    followed
}

pub fn add_structural_layout(index: &mut InMemoryIndex, targets: &TargetConfig) -> MethodId {
    let caller = index.add_method(
        MethodSpec::new("Y.r", "render", "void").with_params(&[targets.session_type.as_str(), targets.user_type.as_str()]),
    );
    let decoy = index.add_method(MethodSpec::new("Y.r", "other", "void").with_params(&["int", "int"]));
    let followed = index.add_method(MethodSpec::new(targets.user_type.as_str(), "h", "boolean"));

    index.add_invoke(caller, followed).unwrap();
    index.add_invoke(decoy, followed).unwrap();
    followed
}

/// Receiver whose accessors return fixed values; unknown names fail.
#[derive(Debug, Clone, Default)]
pub struct FakeReceiver {
    pub type_name: String,
    pub values: AHashMap<String, HookValue>,
}

impl FakeReceiver {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            values: AHashMap::new(),
        }
    }

    pub fn with_value(mut self, name: &str, value: HookValue) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }
}

impl Receiver for FakeReceiver {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn call_method(&self, name: &str) -> Result<HookValue, ObservationError> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| ObservationError::MissingAccessor {
                type_name: self.type_name.clone(),
                accessor: name.to_string(),
            })
    }
}
