//! Transport error types

use thiserror::Error;

/// Errors from the dial/handshake layer.
///
/// All of these are retryable from the connect step's point of view; the
/// distinction only matters for logging and for the final exhaustion report.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection refused: {0}")]
    Refused(String),

    #[error("Host unreachable: {0}")]
    Unreachable(String),

    #[error("Connect timed out: {0}")]
    Timeout(String),

    #[error("Handshake failed: {0}")]
    Handshake(String),

    #[error("Transport closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, TransportError>;
