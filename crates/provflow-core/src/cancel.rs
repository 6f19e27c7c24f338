//! Run cancellation
//!
//! A [`CancelToken`] is shared between the caller (e.g. a signal handler) and
//! the run. The runner checks it between steps; retry loops check it between
//! attempts. A cancellation observed mid-run behaves like a halt, with
//! [`crate::CoreError::Cancelled`] as the outcome so callers can tell an
//! operator abort from a provisioning failure.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_shared_across_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        token.cancel();
        assert!(clone.is_cancelled());

        // Cancelling again is a no-op
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
