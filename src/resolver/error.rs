// Mon Jan 19 2026 - Alex

use crate::query::QueryError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Query failed: {0}")]
    Query(#[from] QueryError),
    #[error("Invalid strategy parameters: {0}")]
    InvalidParameters(String),
}
