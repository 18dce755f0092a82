//! # switchboard-core
//!
//! Core traits for the Switchboard request/event dispatch framework.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! crates that define handlers, behaviors and hooks without pulling in the
//! full `switchboard-std` implementation.
//!
//! # Request Pipeline
//!
//! A request is dispatched to exactly one [`RequestHandler`], identified by its
//! [`Signature`] (request type, response type). Around the handler:
//!
//! - **Behaviors** ([`PipelineBehavior`]) wrap the rest of the pipeline as a
//!   [`Next`] continuation and may skip, repeat or transform it. The first
//!   registered behavior is the outermost.
//! - **Hooks** ([`RequestPreHook`], [`RequestHook`], [`RequestPostHook`]) run
//!   exactly once before or after the handler without wrapping it.
//!
//! # Event Publication
//!
//! An [`Event`] is delivered to every registered subscriber. Ordinary
//! [`EventHandler`]s get best-effort delivery; [`TransactionalEventHandler`]s
//! run in order and are committed or rolled back together.
//!
//! # Static vs Dynamic Dispatch
//!
//! Every async trait comes in two forms: the native `async fn` trait users
//! implement, and an object-safe `Dyn*` mirror with a blanket implementation,
//! used by registries to store heterogeneous instances.
//!
//! # Error Types
//!
//! - [`SwitchboardError`] - Top-level error type
//! - [`ConfigError`] - Registry construction errors
//! - [`DispatchError`] - Request dispatch errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod behavior;
mod error;
mod event;
mod handler;
mod hook;
mod message;
mod next;
mod registry;
mod signature;

// Re-exports
pub use behavior::{DynPipelineBehavior, PipelineBehavior};
pub use error::{BoxError, ConfigError, DispatchError, SwitchboardError};
pub use event::{
    DynEventHandler, DynTransactionalEventHandler, Event, EventHandler, EventId, Subscriber,
    TransactionalEventHandler,
};
pub use handler::{DynRequestHandler, NoInput, NoInputHandler, RequestHandler};
pub use hook::{
    DynRequestHook, DynRequestPostHook, DynRequestPreHook, RequestHook, RequestPostHook,
    RequestPreHook,
};
pub use message::{Empty, Message};
pub use next::Next;
pub use registry::HandlerRegistry;
pub use signature::Signature;
pub use tokio_util::sync::CancellationToken;
pub use uuid::Uuid;
