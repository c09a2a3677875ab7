// Mon Jan 19 2026 - Alex

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodId(pub usize);

impl MethodId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// A method as the query backend sees it. The name is usually obfuscated;
/// the owning type, return type and parameter types are what survive.
///
/// Call-graph successors are not stored here. Ask the backend through
/// `QueryService::invoked_methods` when they are needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub id: MethodId,
    pub owning_type: String,
    pub name: String,
    pub return_type: String,
    pub param_types: Vec<String>,
}

impl MethodDescriptor {
    pub fn new(id: MethodId, owning_type: &str, name: &str, return_type: &str) -> Self {
        Self {
            id,
            owning_type: owning_type.to_string(),
            name: name.to_string(),
            return_type: return_type.to_string(),
            param_types: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: &[&str]) -> Self {
        self.param_types = params.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn param_count(&self) -> usize {
        self.param_types.len()
    }

    pub fn returns_boolean(&self) -> bool {
        is_boolean_like(&self.return_type)
    }

    pub fn key(&self) -> String {
        format!("{}#{}", self.owning_type, self.name)
    }

    pub fn signature(&self) -> String {
        format!(
            "{}.{}({}){}",
            self.owning_type,
            self.name,
            self.param_types.iter().join(", "),
            self.return_type
        )
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature())
    }
}

pub fn is_boolean_like(type_name: &str) -> bool {
    type_name == "boolean" || type_name == "java.lang.Boolean"
}

pub fn simple_name(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or(type_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_format() {
        let desc = MethodDescriptor::new(MethodId::new(3), "a.b.C", "x", "boolean")
            .with_params(&["a.b.Session", "a.b.User"]);

        assert_eq!(desc.signature(), "a.b.C.x(a.b.Session, a.b.User)boolean");
        assert_eq!(desc.key(), "a.b.C#x");
        assert_eq!(desc.param_count(), 2);
    }

    #[test]
    fn test_boolean_like() {
        assert!(is_boolean_like("boolean"));
        assert!(is_boolean_like("java.lang.Boolean"));
        assert!(!is_boolean_like("java.lang.String"));
        assert!(!is_boolean_like("int"));
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("com.example.FriendshipStatus"), "FriendshipStatus");
        assert_eq!(simple_name("Bare"), "Bare");
    }
}
