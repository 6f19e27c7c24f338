//! Orchestration error types

use thiserror::Error;

/// Errors surfaced by steps and the runner
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Resource allocation failed: {0}")]
    Allocation(String),

    #[error("Resource binding failed: {0}")]
    Binding(String),

    #[error("Connection attempts exhausted after {attempts} tries: {last}")]
    ConnectExhausted { attempts: u32, last: String },

    #[error("Cleanup failed: {0}")]
    Cleanup(String),

    #[error("Run was cancelled")]
    Cancelled,

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Missing state key: {0}")]
    MissingKey(String),

    #[error("State key holds an unexpected type: {0}")]
    TypeMismatch(String),
}

impl CoreError {
    /// Whether this error represents an operator-initiated abort rather
    /// than a provisioning failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CoreError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
