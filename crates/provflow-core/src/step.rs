//! Step contract
//!
//! A step is one provisioning action plus its compensating teardown. The
//! runner invokes `run` at most once per run, and `cleanup` at most once and
//! only if `run` was entered — even when `run` itself reported failure, so a
//! step that allocated resource A and then failed on resource B still gets a
//! chance to undo A.

use crate::error::{CoreError, Result};
use crate::state::StateBag;
use async_trait::async_trait;

/// Outcome of a step's forward action.
///
/// Control flow is driven by this value, not by unwinding: a failing step
/// returns [`StepAction::Halt`] with its error, and the runner takes care of
/// rolling back.
#[derive(Debug)]
#[must_use]
pub enum StepAction {
    /// Proceed to the next step.
    Continue,
    /// Stop forward progress and roll back every entered step.
    Halt(CoreError),
}

impl StepAction {
    pub fn is_continue(&self) -> bool {
        matches!(self, StepAction::Continue)
    }
}

/// One unit of provisioning work with a forward action and a best-effort
/// compensating action.
#[async_trait]
pub trait Step: Send {
    /// Short name for logging and operator narration.
    fn name(&self) -> &str;

    /// Perform the forward action.
    ///
    /// Reads prerequisites from the bag, publishes outputs back into it, and
    /// records any allocated identifiers privately so `cleanup` can undo them.
    async fn run(&mut self, state: &mut StateBag) -> StepAction;

    /// Undo whatever `run` managed to do.
    ///
    /// Must be safe to call when `run` self-skipped or failed early (nothing
    /// recorded means nothing to undo). Errors returned here are advisory:
    /// the runner logs and collects them but keeps rolling back earlier
    /// steps.
    async fn cleanup(&mut self, state: &mut StateBag) -> Result<()>;
}
