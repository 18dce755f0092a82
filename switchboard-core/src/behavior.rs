//! # Pipeline Behaviors
//!
//! Behaviors are composable middleware around a handler invocation. Each one
//! receives the request, the cancellation token and a [`Next`] continuation
//! for the rest of the pipeline, and decides whether and how to proceed:
//!
//! - run `next` once and pass the response through (logging, metrics)
//! - skip `next` and answer on its own (validation, caching, authorization)
//! - run `next` several times (retrying)
//! - transform the response or the error
//!
//! Behaviors registered for a signature compose in registration order: the
//! first registered behavior is the outermost wrapper.

use crate::{error::BoxError, message::Message, next::Next};
use futures::future::BoxFuture;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Middleware wrapping the handler for one signature.
///
/// # Example
///
/// ```rust,ignore
/// struct Audit;
///
/// impl<Req: Message, Res: Message> PipelineBehavior<Req, Res> for Audit {
///     async fn handle(
///         &self,
///         request: &Req,
///         cancel: &CancellationToken,
///         next: Next<'_, Res>,
///     ) -> Result<Res, BoxError> {
///         let response = next.run().await?;
///         record_audit_entry();
///         Ok(response)
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a pipeline behavior for `{Req}` -> `{Res}`",
    label = "missing `PipelineBehavior<{Req}, {Res}>` implementation",
    note = "Behaviors must implement `handle` for the signature they are registered on."
)]
pub trait PipelineBehavior<Req: Message, Res: Message>: Send + Sync + 'static {
    /// Handles the request, usually by awaiting `next.run()`.
    fn handle(
        &self,
        request: &Req,
        cancel: &CancellationToken,
        next: Next<'_, Res>,
    ) -> impl Future<Output = Result<Res, BoxError>> + Send;
}

/// Dynamic object-safe version of [`PipelineBehavior`].
pub trait DynPipelineBehavior<Req: Message, Res: Message>: Send + Sync + 'static {
    /// Handles the request (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        request: &'a Req,
        cancel: &'a CancellationToken,
        next: Next<'a, Res>,
    ) -> BoxFuture<'a, Result<Res, BoxError>>;
}

impl<Req, Res, T> DynPipelineBehavior<Req, Res> for T
where
    Req: Message,
    Res: Message,
    T: PipelineBehavior<Req, Res>,
{
    fn handle_dyn<'a>(
        &'a self,
        request: &'a Req,
        cancel: &'a CancellationToken,
        next: Next<'a, Res>,
    ) -> BoxFuture<'a, Result<Res, BoxError>> {
        Box::pin(self.handle(request, cancel, next))
    }
}
