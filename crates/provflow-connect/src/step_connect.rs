//! Connect-with-retry step

use crate::communicator::Communicator;
use crate::transport::{Credentials, Dialer};
use async_trait::async_trait;
use provflow_cloud::TargetInstance;
use provflow_core::{
    CancelToken, CoreError, RetryPolicy, Sleeper, StateBag, Step, StepAction, TokioSleeper, keys,
    ui,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Establishes a session to the provisioned instance, retrying while its
/// network comes up.
///
/// Reads:
/// - `resource.public_address`: `String` — preferred endpoint, if an address
///   step published one.
/// - `target.descriptor` ([`TargetInstance`]) — fallback endpoint.
/// - `connect.credentials` ([`Credentials`])
///
/// Writes:
/// - `session.handle`: `Arc<tokio::sync::Mutex<Communicator>>`
///
/// Every attempt is one dial plus one handshake, bounded by the per-attempt
/// timeout; a handshake failure counts as a failed attempt, not a fatal
/// error. After exhausting the schedule the step halts with the *last*
/// observed error, which is the most informative one.
pub struct ConnectStep {
    dialer: Arc<dyn Dialer>,
    policy: RetryPolicy,
    attempt_timeout: Duration,
    sleeper: Arc<dyn Sleeper>,
    cancel: CancelToken,
    session: Option<Arc<Mutex<Communicator>>>,
}

impl ConnectStep {
    pub fn new(dialer: Arc<dyn Dialer>) -> Self {
        Self {
            dialer,
            policy: RetryPolicy::default(),
            attempt_timeout: Duration::from_secs(30),
            sleeper: Arc::new(TokioSleeper),
            cancel: CancelToken::new(),
            session: None,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bound for one dial-plus-handshake attempt.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    fn endpoint(&self, state: &StateBag) -> provflow_core::Result<String> {
        if let Some(address) = state.get::<String>(keys::PUBLIC_ADDRESS) {
            return Ok(address.clone());
        }
        let target = state.require::<TargetInstance>(keys::TARGET)?;
        Ok(target.address.clone())
    }
}

#[async_trait]
impl Step for ConnectStep {
    fn name(&self) -> &str {
        "connect"
    }

    async fn run(&mut self, state: &mut StateBag) -> StepAction {
        let address = match self.endpoint(state) {
            Ok(address) => address,
            Err(err) => return StepAction::Halt(err),
        };
        let credentials = match state.require::<Credentials>(keys::CREDENTIALS) {
            Ok(c) => c.clone(),
            Err(err) => return StepAction::Halt(err),
        };
        let ui = ui::from_state(state);

        ui.say(&format!("Connecting to {address}..."));
        let mut last_error = String::from("no attempts were made");

        for attempt in 0..self.policy.max_attempts {
            if self.cancel.is_cancelled() {
                return StepAction::Halt(CoreError::Cancelled);
            }

            let delay = self.policy.delay_for_attempt(attempt);
            if !delay.is_zero() {
                self.sleeper.sleep(delay).await;
            }

            tracing::debug!(%address, attempt = attempt + 1, "dialing");
            let attempt_result = tokio::time::timeout(self.attempt_timeout, async {
                let mut transport = self.dialer.dial(&address).await?;
                if let Err(e) = transport.handshake(&credentials).await {
                    let _ = transport.close().await;
                    return Err(e);
                }
                Ok(transport)
            })
            .await;

            match attempt_result {
                Ok(Ok(transport)) => {
                    let session = Arc::new(Mutex::new(Communicator::new(transport)));
                    self.session = Some(session.clone());
                    state.put(keys::SESSION, session);
                    ui.say("Connected");
                    return StepAction::Continue;
                }
                Ok(Err(e)) => {
                    tracing::debug!(%address, attempt = attempt + 1, error = %e, "attempt failed");
                    last_error = e.to_string();
                }
                Err(_) => {
                    last_error =
                        format!("attempt timed out after {:?}", self.attempt_timeout);
                    tracing::debug!(%address, attempt = attempt + 1, "attempt timed out");
                }
            }
        }

        let err = CoreError::ConnectExhausted {
            attempts: self.policy.max_attempts,
            last: last_error,
        };
        ui.error(&err.to_string());
        StepAction::Halt(err)
    }

    async fn cleanup(&mut self, _state: &mut StateBag) -> provflow_core::Result<()> {
        if let Some(session) = self.session.take() {
            let mut communicator = session.lock().await;
            if let Err(e) = communicator.close().await {
                tracing::warn!(error = %e, "failed to close session");
                return Err(CoreError::Cleanup(e.to_string()));
            }
        }
        Ok(())
    }
}
