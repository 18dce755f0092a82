//! Event publication.
//!
//! [`EventPublisher`] fans one event out to every subscriber registered for
//! its type, in two strictly separated phases:
//!
//! 1. **Ordinary subscribers**, sequentially or concurrently depending on the
//!    [`DeliveryMode`]. Best effort: a failure never stops the others.
//! 2. **Transactional subscribers**, always sequentially, committed or rolled
//!    back together.
//!
//! Publishing never returns an error. Failures are logged and collected in
//! the returned [`PublishReport`].

mod ordinary;
mod report;
mod transactional;

pub use report::{HandlerFailure, Phase, PublishReport, TransactionOutcome};

use std::{fmt, sync::Arc};
use switchboard_core::{CancellationToken, Event, HandlerRegistry, Subscriber};
use tracing::debug;

/// How ordinary subscribers are delivered to.
///
/// Transactional subscribers are always delivered sequentially.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeliveryMode {
    /// One at a time, in registration order.
    #[default]
    Sequential,
    /// All started before any is awaited; no task is spawned.
    Parallel,
}

impl From<bool> for DeliveryMode {
    /// `true` selects [`DeliveryMode::Parallel`].
    fn from(parallel: bool) -> Self {
        if parallel {
            DeliveryMode::Parallel
        } else {
            DeliveryMode::Sequential
        }
    }
}

/// Publishes events to their registered subscribers.
pub struct EventPublisher<R> {
    registry: Arc<R>,
}

impl<R: HandlerRegistry> EventPublisher<R> {
    /// Create a publisher resolving subscribers from `registry`.
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// Publish `event` to every subscriber of its type.
    ///
    /// Ordinary subscribers are fully delivered before the first
    /// transactional subscriber starts.
    pub async fn publish<E: Event>(
        &self,
        event: &E,
        mode: impl Into<DeliveryMode>,
        cancel: &CancellationToken,
    ) -> PublishReport {
        let mode = mode.into();
        let mut report = PublishReport::new(event.event_id());

        let subscribers = self.registry.resolve_event_handlers::<E>();
        let mut ordinary = Vec::new();
        let mut transactional = Vec::new();
        for subscriber in subscribers {
            match subscriber {
                Subscriber::Ordinary(handler) => ordinary.push(handler),
                Subscriber::Transactional(handler) => transactional.push(handler),
            }
        }

        debug!(
            event_id = %report.event_id(),
            ordinary = ordinary.len(),
            transactional = transactional.len(),
            ?mode,
            "publishing event"
        );

        if !ordinary.is_empty() {
            match mode {
                DeliveryMode::Sequential => {
                    ordinary::deliver_sequential(event, &ordinary, cancel, &mut report).await
                }
                DeliveryMode::Parallel => {
                    ordinary::deliver_parallel(event, &ordinary, cancel, &mut report).await
                }
            }
        }

        if !transactional.is_empty() {
            transactional::deliver_transactional(event, transactional, cancel, &mut report).await;
        }

        report
    }
}

impl<R> Clone for EventPublisher<R> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<R> fmt::Debug for EventPublisher<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPublisher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_selects_delivery_mode() {
        assert_eq!(DeliveryMode::from(true), DeliveryMode::Parallel);
        assert_eq!(DeliveryMode::from(false), DeliveryMode::Sequential);
        assert_eq!(DeliveryMode::default(), DeliveryMode::Sequential);
    }
}
