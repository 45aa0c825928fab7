//! Named retry policies with capped exponential backoff.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

/// Retry policy applied around a remote call.
///
/// `max_attempts` counts the first call; a policy with one attempt never
/// retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Policy name used in logs.
    pub name: String,
    /// Attempts including the first call.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_backoff: Duration,
    /// Upper bound for any single delay before jitter.
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Attempts to make, never fewer than one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Base delay after failed attempt number `attempt` (1-based), doubling
    /// each time and capped at `max_backoff`.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use admissions::domain::RetryPolicy;
    ///
    /// let policy = RetryPolicy {
    ///     name: "viacep".to_owned(),
    ///     max_attempts: 5,
    ///     initial_backoff: Duration::from_millis(200),
    ///     max_backoff: Duration::from_millis(500),
    /// };
    /// assert_eq!(policy.base_delay(1), Duration::from_millis(200));
    /// assert_eq!(policy.base_delay(2), Duration::from_millis(400));
    /// assert_eq!(policy.base_delay(3), Duration::from_millis(500));
    /// ```
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let exponent = 2_u32.saturating_pow(attempt.saturating_sub(1));
        let base_ms = u64::try_from(self.initial_backoff.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max_backoff.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(base_ms.saturating_mul(u64::from(exponent)).min(max_ms))
    }
}

/// Async sleeping abstraction so retries can be tested without waiting.
#[async_trait]
pub trait RetrySleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl RetrySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Jitter applied on top of the exponential base delay.
pub trait BackoffJitter: Send + Sync {
    /// Return the delay to wait given the base delay.
    fn jittered_delay(&self, base: Duration) -> Duration;
}

/// Adds up to a quarter of the base delay, drawn from the thread RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJitter;

impl BackoffJitter for RandomJitter {
    fn jittered_delay(&self, base: Duration) -> Duration {
        let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
        let max_extra = (base_ms / 4).max(1);
        let extra = rand::thread_rng().gen_range(0..=max_extra);
        Duration::from_millis(base_ms.saturating_add(extra))
    }
}

/// Jitter that leaves the base delay unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl BackoffJitter for NoJitter {
    fn jittered_delay(&self, base: Duration) -> Duration {
        base
    }
}
