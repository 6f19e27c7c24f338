//! Bounded retry with linear backoff
//!
//! Used by steps whose underlying operation is expected to fail transiently,
//! such as connecting to an instance whose network is not ready yet. The
//! sleeper is injectable so tests run without wall-clock delay.

use async_trait::async_trait;
use std::time::Duration;

/// Bounded, backoff-governed retry schedule.
///
/// The delay before attempt `n` (zero-based) is `n × base_delay`, capped at
/// `max_delay`; the first attempt runs immediately.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,

    /// Base unit of the linear delay schedule.
    pub base_delay: Duration,

    /// Upper bound for a single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait before the given zero-based attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self.base_delay.saturating_mul(attempt);
        delay.min(self.max_delay)
    }
}

/// Injectable sleep so retry loops are deterministic under test.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the Tokio timer.
#[derive(Debug, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
