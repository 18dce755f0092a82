//! # Request Handlers
//!
//! A request handler owns the business logic for exactly one
//! (request type, response type) pair. It is the terminal point of a request
//! pipeline: behaviors wrap it, hooks run around it.
//!
//! # Usage Patterns
//!
//! 1. **Struct implementation**: `impl RequestHandler<GetForecast, Forecast> for ForecastHandler`
//! 2. **Closure**: `|req: &GetForecast, _cancel: &CancellationToken| async move { ... }`
//! 3. **No input**: `impl NoInputHandler<Forecast> for LatestForecast`, registered
//!    under the `(Empty, Forecast)` signature through [`NoInput`].
//!
//! Handlers receive the request by reference: a behavior may run the rest of
//! the pipeline more than once, and hooks observe the same request.

use crate::{error::BoxError, message::Empty, message::Message};
use futures::future::BoxFuture;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Handles one request type, producing one response type.
///
/// # Static vs Dynamic Dispatch
///
/// This trait uses native `async fn` for zero-cost static dispatch.
/// Registries store handlers as [`DynRequestHandler`] trait objects.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle `{Req}` requests producing `{Res}`",
    label = "missing `RequestHandler<{Req}, {Res}>` implementation",
    note = "Handlers must implement `handle` for the exact (request, response) pair."
)]
pub trait RequestHandler<Req: Message, Res: Message>: Send + Sync + 'static {
    /// Executes the handler logic.
    fn handle(
        &self,
        request: &Req,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Res, BoxError>> + Send;
}

// Blanket impl for closures
impl<F, Req, Res, Fut> RequestHandler<Req, Res> for F
where
    Req: Message,
    Res: Message,
    F: Fn(&Req, &CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Res, BoxError>> + Send,
{
    fn handle(
        &self,
        request: &Req,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Res, BoxError>> + Send {
        (self)(request, cancel)
    }
}

/// Dynamic object-safe version of [`RequestHandler`].
pub trait DynRequestHandler<Req: Message, Res: Message>: Send + Sync + 'static {
    /// Executes the handler logic (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        request: &'a Req,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<Res, BoxError>>;
}

impl<Req: Message, Res: Message, T: RequestHandler<Req, Res>> DynRequestHandler<Req, Res> for T {
    fn handle_dyn<'a>(
        &'a self,
        request: &'a Req,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<Res, BoxError>> {
        Box::pin(self.handle(request, cancel))
    }
}

/// A handler that takes no request payload.
pub trait NoInputHandler<Res: Message>: Send + Sync + 'static {
    /// Executes the handler logic.
    fn handle(&self, cancel: &CancellationToken)
    -> impl Future<Output = Result<Res, BoxError>> + Send;
}

/// Adapts a [`NoInputHandler`] into a `RequestHandler<Empty, Res>`.
#[derive(Debug, Clone, Default)]
pub struct NoInput<H>(pub H);

impl<Res: Message, H: NoInputHandler<Res>> RequestHandler<Empty, Res> for NoInput<H> {
    async fn handle(&self, _request: &Empty, cancel: &CancellationToken) -> Result<Res, BoxError> {
        self.0.handle(cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Answer;

    impl NoInputHandler<u32> for Answer {
        async fn handle(&self, _cancel: &CancellationToken) -> Result<u32, BoxError> {
            Ok(42)
        }
    }

    #[tokio::test]
    async fn closures_are_handlers() {
        let handler = |req: &u32, _cancel: &CancellationToken| {
            let value = *req;
            async move { Ok::<_, BoxError>(value * 2) }
        };
        let boxed: Box<dyn DynRequestHandler<u32, u32>> = Box::new(handler);
        let cancel = CancellationToken::new();
        assert_eq!(boxed.handle_dyn(&21, &cancel).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn no_input_handlers_serve_the_empty_request() {
        let handler = NoInput(Answer);
        let cancel = CancellationToken::new();
        let answer = RequestHandler::<Empty, u32>::handle(&handler, &Empty, &cancel)
            .await
            .unwrap();
        assert_eq!(answer, 42);
    }
}
