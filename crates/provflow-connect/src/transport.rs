//! Dial capability and transport contract

use crate::error::Result;
use async_trait::async_trait;

/// Opens raw transport connections to an address.
#[async_trait]
pub trait Dialer: Send + Sync {
    /// Attempt one connection. Callers bound each attempt with their own
    /// timeout; a dial must not hang indefinitely on its own.
    async fn dial(&self, address: &str) -> Result<Box<dyn Transport>>;
}

/// A transport-level connection that still needs session negotiation.
#[async_trait]
pub trait Transport: Send {
    /// Negotiate the session on top of the raw connection.
    async fn handshake(&mut self, auth: &Credentials) -> Result<()>;

    /// Close the connection. Must be idempotent.
    async fn close(&mut self) -> Result<()>;
}

/// Credential material for session negotiation.
///
/// Opaque to this crate; the transport implementation decides how to use it.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub private_key: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            private_key: private_key.into(),
        }
    }
}
