//! Provider error types

use thiserror::Error;

/// Errors returned by a provider implementation.
///
/// The orchestrator core treats these as opaque, loggable detail; only the
/// step that made the call decides whether they halt the run.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already bound: {0}")]
    AlreadyBound(String),

    #[error("Provider API error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
