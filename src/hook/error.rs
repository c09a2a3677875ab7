// Tue Jan 20 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstallError {
    #[error("Method not found: {type_name}.{method_name}")]
    MethodNotFound { type_name: String, method_name: String },
    #[error("Hooking denied for {0}")]
    Denied(String),
    #[error("Substrate error: {0}")]
    Substrate(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObservationError {
    #[error("{type_name} has no accessor {accessor}")]
    MissingAccessor { type_name: String, accessor: String },
    #[error("Expected {expected}, got {found}")]
    UnexpectedValue { expected: &'static str, found: &'static str },
    #[error("Callback panicked: {0}")]
    Panicked(String),
}
