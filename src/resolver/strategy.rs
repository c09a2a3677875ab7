// Mon Jan 19 2026 - Alex

use crate::query::{MethodDescriptor, QueryService};
use crate::resolver::ResolveError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyTag {
    DeclaredOrdinal,
    StringAnchor,
    StructuralShape,
}

impl StrategyTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeclaredOrdinal => "declared-ordinal",
            Self::StringAnchor => "string-anchor",
            Self::StructuralShape => "structural-shape",
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Self::DeclaredOrdinal => 0.90,
            Self::StringAnchor => 0.75,
            Self::StructuralShape => 0.55,
        }
    }
}

impl fmt::Display for StrategyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One method found by a strategy, plus whatever the same search turned up
/// alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub method: MethodDescriptor,
    pub companion: Option<MethodDescriptor>,
    pub anchor_type: String,
}

impl Candidate {
    pub fn new(method: MethodDescriptor, anchor_type: &str) -> Self {
        Self {
            method,
            companion: None,
            anchor_type: anchor_type.to_string(),
        }
    }

    pub fn with_companion(mut self, companion: MethodDescriptor) -> Self {
        self.companion = Some(companion);
        self
    }
}

/// A single fingerprinting heuristic. Implementations hold only their
/// parameters; everything else comes from the query service.
pub trait MatchStrategy: Send + Sync {
    fn tag(&self) -> StrategyTag;

    fn search(&self, query: &dyn QueryService) -> Result<Vec<Candidate>, ResolveError>;
}
