//! Bounded dispatch of blocking work off the async executor.
//!
//! Store adapters block the calling thread. [`BlockingExecutor`] moves each
//! call onto Tokio's blocking pool, gated by a semaphore so that at most
//! `max_concurrency` calls run at once, and joins the result back into the
//! caller's future. The caller's tracing span follows the work.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::Instrument;

/// Failures of the dispatch itself, as opposed to the work's own errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockingTaskError {
    /// The executor was shut down before a slot became free.
    #[error("blocking executor closed")]
    Closed,
    /// The work panicked or was cancelled on the worker thread.
    #[error("blocking task failed: {message}")]
    Join {
        /// Description reported by the runtime.
        message: String,
    },
}

/// Bounded pool for blocking calls.
///
/// # Examples
/// ```
/// use admissions::domain::BlockingExecutor;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let executor = BlockingExecutor::new(2);
/// let value = executor.run(|| 40 + 2).await.expect("task runs");
/// assert_eq!(value, 42);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct BlockingExecutor {
    permits: Arc<Semaphore>,
}

impl BlockingExecutor {
    /// Create an executor admitting `max_concurrency` calls at once.
    ///
    /// A limit of zero is raised to one.
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    /// Run `work` on the blocking pool once a slot is free.
    pub async fn run<F, T>(&self, work: F) -> Result<T, BlockingTaskError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let span = tracing::Span::current();
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .instrument(span.clone())
            .await
            .map_err(|_| BlockingTaskError::Closed)?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            span.in_scope(work)
        })
        .await
        .map_err(|err| BlockingTaskError::Join {
            message: err.to_string(),
        })
    }

    /// Slots currently free.
    pub fn available_slots(&self) -> usize {
        self.permits.available_permits()
    }
}
