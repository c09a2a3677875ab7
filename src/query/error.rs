// Mon Jan 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unknown method id: {0}")]
    UnknownMethod(usize),
    #[error("Malformed index: {0}")]
    MalformedIndex(String),
    #[error("Query backend failed: {0}")]
    Backend(String),
}
