//! # Request Hooks
//!
//! Hooks are lightweight extension points that run strictly before or after
//! the handler. Unlike behaviors they never wrap control flow: a registered
//! hook runs exactly once per dispatch, unless an earlier stage failed.
//!
//! Three flavours exist:
//!
//! - [`RequestPreHook`] - before the handler, keyed by request type only, so it
//!   applies to every response type of that request
//! - [`RequestHook`] - both stages for one signature
//! - [`RequestPostHook`] - after the handler, sees the response
//!
//! Execution order inside the pipeline is: pre-hooks, full hooks'
//! `on_executing`, handler, post-hooks, full hooks' `on_executed`. Each group
//! runs in registration order.

use crate::{error::BoxError, message::Message};
use futures::future::BoxFuture;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Runs before the handler of any signature whose request type is `Req`.
pub trait RequestPreHook<Req: Message>: Send + Sync + 'static {
    /// Called before the handler executes.
    fn on_executing(
        &self,
        request: &Req,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Runs before and after the handler of one signature.
pub trait RequestHook<Req: Message, Res: Message>: Send + Sync + 'static {
    /// Called before the handler executes, after every pre-hook.
    fn on_executing(
        &self,
        request: &Req,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;

    /// Called after the handler executed, after every post-hook.
    fn on_executed(
        &self,
        request: &Req,
        response: &Res,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Runs after the handler of one signature.
pub trait RequestPostHook<Req: Message, Res: Message>: Send + Sync + 'static {
    /// Called after the handler executed.
    fn on_executed(
        &self,
        request: &Req,
        response: &Res,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Dynamic object-safe version of [`RequestPreHook`].
pub trait DynRequestPreHook<Req: Message>: Send + Sync + 'static {
    /// Called before the handler executes (dynamic dispatch version).
    fn on_executing_dyn<'a>(
        &'a self,
        request: &'a Req,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>>;
}

impl<Req: Message, T: RequestPreHook<Req>> DynRequestPreHook<Req> for T {
    fn on_executing_dyn<'a>(
        &'a self,
        request: &'a Req,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(self.on_executing(request, cancel))
    }
}

/// Dynamic object-safe version of [`RequestHook`].
pub trait DynRequestHook<Req: Message, Res: Message>: Send + Sync + 'static {
    /// Called before the handler executes (dynamic dispatch version).
    fn on_executing_dyn<'a>(
        &'a self,
        request: &'a Req,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>>;

    /// Called after the handler executed (dynamic dispatch version).
    fn on_executed_dyn<'a>(
        &'a self,
        request: &'a Req,
        response: &'a Res,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>>;
}

impl<Req: Message, Res: Message, T: RequestHook<Req, Res>> DynRequestHook<Req, Res> for T {
    fn on_executing_dyn<'a>(
        &'a self,
        request: &'a Req,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(self.on_executing(request, cancel))
    }

    fn on_executed_dyn<'a>(
        &'a self,
        request: &'a Req,
        response: &'a Res,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(self.on_executed(request, response, cancel))
    }
}

/// Dynamic object-safe version of [`RequestPostHook`].
pub trait DynRequestPostHook<Req: Message, Res: Message>: Send + Sync + 'static {
    /// Called after the handler executed (dynamic dispatch version).
    fn on_executed_dyn<'a>(
        &'a self,
        request: &'a Req,
        response: &'a Res,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>>;
}

impl<Req: Message, Res: Message, T: RequestPostHook<Req, Res>> DynRequestPostHook<Req, Res> for T {
    fn on_executed_dyn<'a>(
        &'a self,
        request: &'a Req,
        response: &'a Res,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(self.on_executed(request, response, cancel))
    }
}
