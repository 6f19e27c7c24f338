//! Step runner
//!
//! Executes an ordered sequence of steps against one state bag. A step is
//! recorded as entered *before* its `run` is invoked, so a step that fails
//! halfway through a multi-resource action still gets its `cleanup` during
//! rollback. On halt (or cancellation) the entered steps are cleaned up in
//! strict reverse order of entry.

use crate::cancel::CancelToken;
use crate::error::CoreError;
use crate::state::StateBag;
use crate::step::{Step, StepAction};

/// Final status of a provisioning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every step returned Continue.
    Completed,
    /// Some step halted; rollback was attempted.
    Failed,
    /// The run was cancelled by the operator; rollback was attempted.
    Cancelled,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Completed => write!(f, "completed"),
            RunStatus::Failed => write!(f, "failed"),
            RunStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Outcome of a run: one primary cause plus advisory cleanup errors.
///
/// Cleanup errors never replace the primary error; a failed teardown call is
/// reported here but does not change the run's status.
#[derive(Debug)]
pub struct RunReport {
    pub status: RunStatus,
    pub error: Option<CoreError>,
    pub cleanup_errors: Vec<CoreError>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Completed
    }
}

/// Sequential step orchestrator.
///
/// Step order is caller-defined dependency order; the runner never reorders
/// or parallelizes. The cancel token is checked between steps.
#[derive(Debug, Default)]
pub struct Runner {
    cancel: CancelToken,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an externally controlled cancellation token.
    pub fn with_cancel(cancel: CancelToken) -> Self {
        Self { cancel }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Drive every step in order, rolling back on halt.
    pub async fn execute(&self, steps: &mut [Box<dyn Step>], state: &mut StateBag) -> RunReport {
        let mut entered = 0usize;
        let mut status = RunStatus::Completed;
        let mut primary: Option<CoreError> = None;

        for step in steps.iter_mut() {
            if self.cancel.is_cancelled() {
                tracing::info!("run cancelled before step {}", step.name());
                status = RunStatus::Cancelled;
                primary = Some(CoreError::Cancelled);
                break;
            }

            // Entered before run so a partial failure still gets cleanup.
            entered += 1;
            tracing::debug!(step = step.name(), "running step");

            match step.run(state).await {
                StepAction::Continue => {}
                StepAction::Halt(err) => {
                    tracing::warn!(step = step.name(), error = %err, "step halted the run");
                    status = if err.is_cancelled() {
                        RunStatus::Cancelled
                    } else {
                        RunStatus::Failed
                    };
                    primary = Some(err);
                    break;
                }
            }
        }

        let mut cleanup_errors = Vec::new();
        if primary.is_some() {
            for step in steps[..entered].iter_mut().rev() {
                tracing::debug!(step = step.name(), "cleaning up step");
                if let Err(err) = step.cleanup(state).await {
                    // Advisory only: keep rolling back earlier steps.
                    tracing::warn!(step = step.name(), error = %err, "cleanup failed");
                    cleanup_errors.push(err);
                }
            }
        }

        RunReport {
            status,
            error: primary,
            cleanup_errors,
        }
    }
}
