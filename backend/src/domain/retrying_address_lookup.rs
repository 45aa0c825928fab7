//! Retry decorator for address lookups.
//!
//! Wraps any [`AddressLookup`] with a named [`RetryPolicy`]. Only retryable
//! errors are retried; a confirmed absence and non-retryable errors return
//! immediately.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{AddressLookup, AddressLookupError};
use crate::domain::{
    Address, BackoffJitter, PostalCode, RandomJitter, RetryPolicy, RetrySleeper, TokioSleeper,
};

/// Address lookup that retries transient failures.
pub struct RetryingAddressLookup<L> {
    inner: L,
    policy: RetryPolicy,
    sleeper: Arc<dyn RetrySleeper>,
    jitter: Arc<dyn BackoffJitter>,
}

impl<L> RetryingAddressLookup<L> {
    /// Wrap `inner` using Tokio sleeps and random jitter.
    pub fn new(inner: L, policy: RetryPolicy) -> Self {
        Self::with_runtime(inner, policy, Arc::new(TokioSleeper), Arc::new(RandomJitter))
    }

    /// Wrap `inner` with injected sleeping and jitter.
    pub fn with_runtime(
        inner: L,
        policy: RetryPolicy,
        sleeper: Arc<dyn RetrySleeper>,
        jitter: Arc<dyn BackoffJitter>,
    ) -> Self {
        Self {
            inner,
            policy,
            sleeper,
            jitter,
        }
    }
}

#[async_trait]
impl<L> AddressLookup for RetryingAddressLookup<L>
where
    L: AddressLookup,
{
    async fn lookup(&self, code: &PostalCode) -> Result<Option<Address>, AddressLookupError> {
        let max_attempts = self.policy.attempts();
        let mut attempt = 1;
        loop {
            match self.inner.lookup(code).await {
                Err(error) if error.is_retryable() && attempt < max_attempts => {
                    let delay = self.jitter.jittered_delay(self.policy.base_delay(attempt));
                    warn!(
                        policy = %self.policy.name,
                        attempt,
                        max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        %error,
                        "address lookup failed; retrying"
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }
}
