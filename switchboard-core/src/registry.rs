//! # Handler Registry
//!
//! The registry is the collaborator that owns handler, behavior and hook
//! instances. The dispatch engine only borrows what it resolves, for the
//! duration of one dispatch or publish.
//!
//! How a registry is populated (explicit registration, code generation,
//! scanning) is up to the implementation. `switchboard-std` ships a static
//! `Registry` built with a `RegistryBuilder`.

use crate::{
    behavior::DynPipelineBehavior,
    event::{Event, Subscriber},
    handler::DynRequestHandler,
    hook::{DynRequestHook, DynRequestPostHook, DynRequestPreHook},
    message::Message,
};
use std::sync::Arc;

/// Resolves the instances taking part in a dispatch or publish.
///
/// All lists are returned in registration order. Missing entries resolve to
/// `None` or an empty slice.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a handler registry",
    label = "missing `HandlerRegistry` implementation",
    note = "Build a `Registry` with `RegistryBuilder`, or implement `HandlerRegistry`."
)]
pub trait HandlerRegistry: Send + Sync + 'static {
    /// The single handler for `Req -> Res`.
    fn resolve_handler<Req: Message, Res: Message>(&self)
    -> Option<&dyn DynRequestHandler<Req, Res>>;

    /// Behaviors for `Req -> Res`, outermost first.
    fn resolve_behaviors<Req: Message, Res: Message>(
        &self,
    ) -> &[Arc<dyn DynPipelineBehavior<Req, Res>>];

    /// Pre-hooks for requests of type `Req`.
    fn resolve_pre_hooks<Req: Message>(&self) -> &[Arc<dyn DynRequestPreHook<Req>>];

    /// Full hooks for `Req -> Res`.
    fn resolve_hooks<Req: Message, Res: Message>(&self) -> &[Arc<dyn DynRequestHook<Req, Res>>];

    /// Post-hooks for `Req -> Res`.
    fn resolve_post_hooks<Req: Message, Res: Message>(
        &self,
    ) -> &[Arc<dyn DynRequestPostHook<Req, Res>>];

    /// Every subscriber for events of type `E`.
    fn resolve_event_handlers<E: Event>(&self) -> &[Subscriber<E>];
}
