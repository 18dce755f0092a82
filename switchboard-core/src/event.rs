//! # Events and Subscribers
//!
//! An event is published to every subscriber registered for its type.
//! Subscribers come in two kinds:
//!
//! - [`EventHandler`] - ordinary, best-effort notification
//! - [`TransactionalEventHandler`] - ordered, with `commit` and `rollback`
//!   compensation, delivered all-or-nothing
//!
//! The kind of a subscriber is fixed when it is registered and carried by
//! [`Subscriber`], so one handler is never delivered twice.

use crate::{error::BoxError, message::Message};
use futures::future::BoxFuture;
use std::{any::type_name, fmt, future::Future, sync::Arc};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Stable identity of one event instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(Uuid);

impl EventId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing identifier.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// The underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for EventId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// An immutable notification published to subscribers of its type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an Event",
    label = "missing `Event` implementation",
    note = "Events need a stable identity; derive `Event` or implement `event_id`."
)]
pub trait Event: Message {
    /// The stable identity of this event.
    fn event_id(&self) -> EventId;
}

/// An ordinary subscriber to events of type `E`.
pub trait EventHandler<E: Event>: Send + Sync + 'static {
    /// Handles the event.
    fn handle(
        &self,
        event: &E,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;

    /// A name used when recording failures. Defaults to the type name.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }
}

/// A subscriber taking part in ordered all-or-nothing delivery.
///
/// Transactional handlers run sequentially by ascending [`order`]; handlers
/// with equal order keep their registration order. When every handler
/// succeeded they are committed in reverse execution order; otherwise every
/// handler that was started, including the failing one, is rolled back in
/// reverse execution order.
///
/// [`order`]: TransactionalEventHandler::order
pub trait TransactionalEventHandler<E: Event>: EventHandler<E> {
    /// Position in the transaction; lower runs first.
    fn order(&self) -> i32;

    /// Makes the effects of `handle` permanent.
    fn commit(
        &self,
        event: &E,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;

    /// Compensates the effects of `handle`, which may have failed half-way.
    fn rollback(
        &self,
        event: &E,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Dynamic object-safe version of [`EventHandler`].
pub trait DynEventHandler<E: Event>: Send + Sync + 'static {
    /// Handles the event (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        event: &'a E,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>>;

    /// A name used when recording failures.
    fn name_dyn(&self) -> &'static str;
}

impl<E: Event, T: EventHandler<E>> DynEventHandler<E> for T {
    fn handle_dyn<'a>(
        &'a self,
        event: &'a E,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(self.handle(event, cancel))
    }

    fn name_dyn(&self) -> &'static str {
        self.name()
    }
}

/// Dynamic object-safe version of [`TransactionalEventHandler`].
pub trait DynTransactionalEventHandler<E: Event>: DynEventHandler<E> {
    /// Position in the transaction; lower runs first.
    fn order_dyn(&self) -> i32;

    /// Commits (dynamic dispatch version).
    fn commit_dyn<'a>(
        &'a self,
        event: &'a E,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>>;

    /// Rolls back (dynamic dispatch version).
    fn rollback_dyn<'a>(
        &'a self,
        event: &'a E,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>>;
}

impl<E: Event, T: TransactionalEventHandler<E>> DynTransactionalEventHandler<E> for T {
    fn order_dyn(&self) -> i32 {
        self.order()
    }

    fn commit_dyn<'a>(
        &'a self,
        event: &'a E,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(self.commit(event, cancel))
    }

    fn rollback_dyn<'a>(
        &'a self,
        event: &'a E,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(self.rollback(event, cancel))
    }
}

/// A registered subscriber, tagged with its delivery kind.
pub enum Subscriber<E: Event> {
    /// Best-effort notification.
    Ordinary(Arc<dyn DynEventHandler<E>>),
    /// Ordered, compensating delivery.
    Transactional(Arc<dyn DynTransactionalEventHandler<E>>),
}

impl<E: Event> Subscriber<E> {
    /// The subscriber's name.
    pub fn name(&self) -> &'static str {
        match self {
            Subscriber::Ordinary(handler) => handler.name_dyn(),
            Subscriber::Transactional(handler) => handler.name_dyn(),
        }
    }

    /// Whether this subscriber takes part in transactional delivery.
    pub fn is_transactional(&self) -> bool {
        matches!(self, Subscriber::Transactional(_))
    }
}

impl<E: Event> Clone for Subscriber<E> {
    fn clone(&self) -> Self {
        match self {
            Subscriber::Ordinary(handler) => Subscriber::Ordinary(Arc::clone(handler)),
            Subscriber::Transactional(handler) => Subscriber::Transactional(Arc::clone(handler)),
        }
    }
}

impl<E: Event> fmt::Debug for Subscriber<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_transactional() {
            "Transactional"
        } else {
            "Ordinary"
        };
        f.debug_tuple(kind).field(&self.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_ids_are_unique_and_displayable() {
        let a = EventId::new();
        let b = EventId::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string(), a.as_uuid().to_string());
        assert_eq!(EventId::from(*a.as_uuid()), a);
    }
}
