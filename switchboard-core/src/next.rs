//! # Continuations
//!
//! [`Next`] is the "rest of the pipeline" handed to a behavior. Calling
//! [`Next::run`] executes every inner behavior, the request hooks and the
//! handler, and yields the response.
//!
//! A continuation borrows the request and the cancellation token for the
//! duration of one dispatch (`'a`). It is cheap to clone and may be run any
//! number of times, including zero.

use crate::error::BoxError;
use futures::future::BoxFuture;
use std::{fmt, sync::Arc};

type Continuation<'a, Res> = dyn Fn() -> BoxFuture<'a, Result<Res, BoxError>> + Send + Sync + 'a;

/// The delayed remainder of a request pipeline.
pub struct Next<'a, Res> {
    inner: Arc<Continuation<'a, Res>>,
}

impl<'a, Res> Next<'a, Res> {
    /// Wraps a zero-argument asynchronous function as a continuation.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> BoxFuture<'a, Result<Res, BoxError>> + Send + Sync + 'a,
    {
        Self { inner: Arc::new(f) }
    }

    /// Runs the rest of the pipeline.
    pub fn run(&self) -> BoxFuture<'a, Result<Res, BoxError>> {
        (self.inner)()
    }
}

impl<Res> Clone for Next<'_, Res> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<Res> fmt::Debug for Next<'_, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn next_can_run_repeatedly() {
        let calls = AtomicUsize::new(0);
        let calls_ref = &calls;
        let next = Next::new(move || {
            Box::pin(async move { Ok::<_, BoxError>(calls_ref.fetch_add(1, Ordering::SeqCst) + 1) })
        });

        assert_eq!(next.run().await.unwrap(), 1);
        assert_eq!(next.clone().run().await.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unrun_next_does_nothing() {
        let calls = AtomicUsize::new(0);
        let calls_ref = &calls;
        let _next: Next<'_, ()> = Next::new(move || {
            calls_ref.fetch_add(1, Ordering::SeqCst);
            Box::pin(async { Ok(()) })
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
