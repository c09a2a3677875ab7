// Mon Jan 19 2026 - Alex

use crate::query::MethodDescriptor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodMatcher {
    pub declared_class: Option<String>,
    pub name: Option<String>,
    pub return_type: Option<String>,
    pub using_strings: Vec<String>,
    pub param_types: Option<Vec<String>>,
    pub param_count: Option<usize>,
}

impl MethodMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declared_class(mut self, class: &str) -> Self {
        self.declared_class = Some(class.to_string());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn return_type(mut self, return_type: &str) -> Self {
        self.return_type = Some(return_type.to_string());
        self
    }

    pub fn using_strings<S: AsRef<str>>(mut self, strings: &[S]) -> Self {
        self.using_strings = strings.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    pub fn param_types<S: AsRef<str>>(mut self, types: &[S]) -> Self {
        self.param_types = Some(types.iter().map(|t| t.as_ref().to_string()).collect());
        self
    }

    pub fn param_count(mut self, count: usize) -> Self {
        self.param_count = Some(count);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.declared_class.is_none()
            && self.name.is_none()
            && self.return_type.is_none()
            && self.using_strings.is_empty()
            && self.param_types.is_none()
            && self.param_count.is_none()
    }

    /// `strings` is the set of literals the method body references.
    pub fn matches(&self, method: &MethodDescriptor, strings: &[String]) -> bool {
        if let Some(ref class) = self.declared_class {
            if &method.owning_type != class {
                return false;
            }
        }

        if let Some(ref name) = self.name {
            if &method.name != name {
                return false;
            }
        }

        if let Some(ref ret) = self.return_type {
            if &method.return_type != ret {
                return false;
            }
        }

        if let Some(ref params) = self.param_types {
            if &method.param_types != params {
                return false;
            }
        }

        if let Some(count) = self.param_count {
            if method.param_count() != count {
                return false;
            }
        }

        self.using_strings.iter().all(|needle| strings.iter().any(|s| s == needle))
    }
}
