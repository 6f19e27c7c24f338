//! Session wrapper over an authenticated transport

use crate::error::Result;
use crate::transport::Transport;

/// Higher-level session handle published into the state bag once a
/// connection is established and negotiated.
///
/// Closing is idempotent: the transport is dropped on first close and later
/// calls are no-ops.
pub struct Communicator {
    transport: Option<Box<dyn Transport>>,
}

impl Communicator {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// Whether the underlying connection is still open.
    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Close the underlying connection if it is still open.
    pub async fn close(&mut self) -> Result<()> {
        if let Some(mut transport) = self.transport.take() {
            transport.close().await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Communicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Communicator")
            .field("open", &self.is_open())
            .finish()
    }
}
