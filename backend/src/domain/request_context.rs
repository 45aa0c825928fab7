//! Request-scoped context for correlating logs and error envelopes.
//!
//! The HTTP middleware places a [`RequestContext`] in task-local storage for
//! the lifetime of each request. Tokio task-locals are not inherited by
//! spawned tasks, so work moved elsewhere must re-enter the scope with
//! [`RequestContext::scope`].

use std::fmt;
use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static REQUEST_CONTEXT: RequestContext;
}

/// Trace identifier and path of the request being served.
///
/// # Examples
/// ```
/// use admissions::domain::RequestContext;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let context = RequestContext::new("/api/calculos");
/// let observed = RequestContext::scope(context.clone(), async {
///     RequestContext::current()
/// })
/// .await;
/// assert_eq!(observed, Some(context));
/// # });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    trace_id: Uuid,
    path: String,
}

impl RequestContext {
    /// Context for `path` with a freshly generated trace identifier.
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_trace_id(Uuid::new_v4(), path)
    }

    /// Context with a known trace identifier.
    pub fn with_trace_id(trace_id: Uuid, path: impl Into<String>) -> Self {
        Self {
            trace_id,
            path: path.into(),
        }
    }

    /// The context in scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        REQUEST_CONTEXT.try_with(Clone::clone).ok()
    }

    /// Run `fut` with `context` in scope.
    pub async fn scope<Fut>(context: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_CONTEXT.scope(context, fut).await
    }

    /// Correlation identifier.
    pub fn trace_id(&self) -> Uuid {
        self.trace_id
    }

    /// Request path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.trace_id, self.path)
    }
}
