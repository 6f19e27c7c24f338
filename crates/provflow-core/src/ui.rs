//! Operator-facing sink
//!
//! Steps narrate progress through a [`Ui`] so a surrounding CLI/service can
//! show it to the operator. Narration is fire-and-forget and never affects
//! control flow.

use std::sync::Arc;

use crate::state::{StateBag, keys};

/// Progress/error narration sink.
pub trait Ui: Send + Sync {
    /// Report normal progress.
    fn say(&self, msg: &str);

    /// Report an error condition.
    fn error(&self, msg: &str);
}

/// Default sink that forwards narration to `tracing`.
#[derive(Debug, Default)]
pub struct TracingUi;

impl Ui for TracingUi {
    fn say(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }
}

/// Sink that discards everything. Useful in tests.
#[derive(Debug, Default)]
pub struct NullUi;

impl Ui for NullUi {
    fn say(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Fetch the sink seeded in the bag, falling back to [`TracingUi`].
pub fn from_state(state: &StateBag) -> Arc<dyn Ui> {
    state
        .get::<Arc<dyn Ui>>(keys::UI)
        .cloned()
        .unwrap_or_else(|| Arc::new(TracingUi))
}
