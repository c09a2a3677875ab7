// Mon Jan 19 2026 - Alex

pub mod chain;
pub mod companion;
pub mod error;
pub mod ordinal;
pub mod result;
pub mod strategy;
pub mod string_anchor;
pub mod structural;
pub mod target;
pub mod walk;

pub use chain::FallbackChain;
pub use companion::CompanionIdentifierLookup;
pub use error::ResolveError;
pub use ordinal::DeclaredOrdinalStrategy;
pub use result::{MethodRef, Resolution, ResolutionResult};
pub use strategy::{Candidate, MatchStrategy, StrategyTag};
pub use string_anchor::StringAnchorStrategy;
pub use structural::StructuralShapeStrategy;
pub use target::{follow_status_chain, identifier_lookup, FOLLOW_STATUS_TARGET};
