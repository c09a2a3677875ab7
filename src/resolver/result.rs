// Mon Jan 19 2026 - Alex

use crate::query::MethodDescriptor;
use crate::resolver::StrategyTag;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    pub owning_type: String,
    pub name: String,
}

impl MethodRef {
    pub fn new(owning_type: &str, name: &str) -> Self {
        Self {
            owning_type: owning_type.to_string(),
            name: name.to_string(),
        }
    }
}

impl From<&MethodDescriptor> for MethodRef {
    fn from(desc: &MethodDescriptor) -> Self {
        Self::new(&desc.owning_type, &desc.name)
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owning_type, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub target: String,
    pub primary: MethodRef,
    pub companion: Option<MethodRef>,
    pub owning_type: String,
    pub strategy: StrategyTag,
    pub confidence: f64,
}

impl ResolutionResult {
    pub fn new(target: &str, primary: MethodRef, owning_type: &str, strategy: StrategyTag) -> Self {
        Self {
            target: target.to_string(),
            primary,
            companion: None,
            owning_type: owning_type.to_string(),
            strategy,
            confidence: strategy.confidence(),
        }
    }

    pub fn with_companion(mut self, companion: MethodRef) -> Self {
        self.companion = Some(companion);
        self
    }

    pub fn is_high_confidence(&self) -> bool {
        self.confidence >= 0.85
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(ResolutionResult),
    NotFound { attempted: Vec<StrategyTag> },
}

impl Resolution {
    pub fn result(&self) -> Option<&ResolutionResult> {
        match self {
            Self::Resolved(r) => Some(r),
            Self::NotFound { .. } => None,
        }
    }

    pub fn into_result(self) -> Option<ResolutionResult> {
        match self {
            Self::Resolved(r) => Some(r),
            Self::NotFound { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}
