//! Request dispatch.
//!
//! The [`Sender`] resolves the handler for a request's signature, builds the
//! continuation chain of behaviors and hooks around it, and runs it.
//!
//! ```text
//! behavior 1 ─┐
//!   behavior 2 ─┐
//!     pre-hooks → hooks (executing) → handler → post-hooks → hooks (executed)
//!   behavior 2 ─┘
//! behavior 1 ─┘
//! ```
//!
//! Errors from any stage propagate unchanged inside
//! [`DispatchError::Failed`]. The sender never retries and never logs
//! failures; register a logging behavior for that.

use crate::options::{PipelineOptions, PipelineStages};
use std::{fmt, sync::Arc};
use switchboard_core::{
    BoxError, CancellationToken, DispatchError, DynPipelineBehavior, DynRequestHandler,
    DynRequestHook, DynRequestPostHook, DynRequestPreHook, Empty, HandlerRegistry, Message, Next,
    Signature,
};
use tracing::trace;

/// Dispatches requests to their handler through the request pipeline.
///
/// `Sender` is cheap to clone and can be shared across tasks; every call is
/// independent of the others.
pub struct Sender<R> {
    registry: Arc<R>,
    options: PipelineOptions,
}

impl<R: HandlerRegistry> Sender<R> {
    /// Create a sender with every pipeline stage enabled.
    pub fn new(registry: Arc<R>) -> Self {
        Self::with_options(registry, PipelineOptions::default())
    }

    /// Create a sender with the given options.
    pub fn with_options(registry: Arc<R>, options: PipelineOptions) -> Self {
        Self { registry, options }
    }

    /// The registry this sender resolves from.
    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    /// The options this sender runs with.
    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Dispatch `request` to the handler for `Req -> Res`.
    ///
    /// The response type usually has to be named at the call site:
    ///
    /// ```rust,ignore
    /// let forecast: Forecast = sender.send(GetForecast { city }, &cancel).await?;
    /// ```
    ///
    /// # Errors
    ///
    /// - [`DispatchError::NoHandler`] when nothing handles the signature.
    /// - [`DispatchError::Failed`] carrying the first error raised by a
    ///   behavior, hook or the handler.
    pub async fn send<Req, Res>(
        &self,
        request: Req,
        cancel: &CancellationToken,
    ) -> Result<Res, DispatchError>
    where
        Req: Message,
        Res: Message,
    {
        let signature = Signature::of::<Req, Res>();
        let registry = self.registry.as_ref();
        let handler = registry
            .resolve_handler::<Req, Res>()
            .ok_or(DispatchError::NoHandler(signature))?;

        let behaviors: &[Arc<dyn DynPipelineBehavior<Req, Res>>] =
            if self.options.enabled(PipelineStages::BEHAVIORS) {
                registry.resolve_behaviors::<Req, Res>()
            } else {
                &[]
            };
        let stage = HookStage {
            handler,
            pre_hooks: if self.options.enabled(PipelineStages::PRE_HOOKS) {
                registry.resolve_pre_hooks::<Req>()
            } else {
                &[]
            },
            hooks: if self.options.enabled(PipelineStages::HOOKS) {
                registry.resolve_hooks::<Req, Res>()
            } else {
                &[]
            },
            post_hooks: if self.options.enabled(PipelineStages::POST_HOOKS) {
                registry.resolve_post_hooks::<Req, Res>()
            } else {
                &[]
            },
        };

        if behaviors.is_empty() && stage.has_no_hooks() {
            trace!(%signature, "dispatching directly to handler");
            return handler
                .handle_dyn(&request, cancel)
                .await
                .map_err(DispatchError::Failed);
        }

        trace!(
            %signature,
            behaviors = behaviors.len(),
            pre_hooks = stage.pre_hooks.len(),
            hooks = stage.hooks.len(),
            post_hooks = stage.post_hooks.len(),
            "dispatching through pipeline"
        );

        let request = &request;
        let innermost: Next<'_, Res> = Next::new(move || Box::pin(stage.run(request, cancel)));
        let chain = behaviors.iter().rev().fold(innermost, |next, behavior| {
            Next::new(move || behavior.handle_dyn(request, cancel, next.clone()))
        });

        chain.run().await.map_err(DispatchError::Failed)
    }

    /// Dispatch to the no-input handler producing `Res`.
    ///
    /// This sends [`Empty`], so behaviors and hooks registered for
    /// `Empty -> Res` take part.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn send_empty<Res: Message>(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Res, DispatchError> {
        self.send::<Empty, Res>(Empty, cancel).await
    }
}

impl<R> Clone for Sender<R> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            options: self.options,
        }
    }
}

impl<R> fmt::Debug for Sender<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// The innermost continuation: hooks around the handler.
struct HookStage<'a, Req: Message, Res: Message> {
    handler: &'a dyn DynRequestHandler<Req, Res>,
    pre_hooks: &'a [Arc<dyn DynRequestPreHook<Req>>],
    hooks: &'a [Arc<dyn DynRequestHook<Req, Res>>],
    post_hooks: &'a [Arc<dyn DynRequestPostHook<Req, Res>>],
}

impl<Req: Message, Res: Message> Clone for HookStage<'_, Req, Res> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Req: Message, Res: Message> Copy for HookStage<'_, Req, Res> {}

impl<'a, Req: Message, Res: Message> HookStage<'a, Req, Res> {
    fn has_no_hooks(&self) -> bool {
        self.pre_hooks.is_empty() && self.hooks.is_empty() && self.post_hooks.is_empty()
    }

    async fn run(self, request: &'a Req, cancel: &'a CancellationToken) -> Result<Res, BoxError> {
        for hook in self.pre_hooks {
            hook.on_executing_dyn(request, cancel).await?;
        }
        for hook in self.hooks {
            hook.on_executing_dyn(request, cancel).await?;
        }

        let response = self.handler.handle_dyn(request, cancel).await?;

        for hook in self.post_hooks {
            hook.on_executed_dyn(request, &response, cancel).await?;
        }
        for hook in self.hooks {
            hook.on_executed_dyn(request, &response, cancel).await?;
        }

        Ok(response)
    }
}
