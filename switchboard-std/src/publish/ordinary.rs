//! Best-effort delivery to ordinary subscribers.

use super::report::{Phase, PublishReport};
use futures::future::join_all;
use std::sync::Arc;
use switchboard_core::{BoxError, CancellationToken, DynEventHandler, Event};
use tracing::error;

/// Deliver to each handler in registration order, awaiting each one before
/// starting the next. A failure is recorded and delivery continues.
pub(crate) async fn deliver_sequential<E: Event>(
    event: &E,
    handlers: &[&Arc<dyn DynEventHandler<E>>],
    cancel: &CancellationToken,
    report: &mut PublishReport,
) {
    for handler in handlers {
        let result = handler.handle_dyn(event, cancel).await;
        record(handler.name_dyn(), result, report);
    }
}

/// Start every handler, then wait for all of them. Failures are recorded
/// after the join, in registration order.
pub(crate) async fn deliver_parallel<E: Event>(
    event: &E,
    handlers: &[&Arc<dyn DynEventHandler<E>>],
    cancel: &CancellationToken,
    report: &mut PublishReport,
) {
    let results = join_all(handlers.iter().map(|handler| handler.handle_dyn(event, cancel))).await;

    for (handler, result) in handlers.iter().zip(results) {
        record(handler.name_dyn(), result, report);
    }
}

fn record(name: &'static str, result: Result<(), BoxError>, report: &mut PublishReport) {
    match result {
        Ok(()) => report.record_delivery(),
        Err(err) => {
            error!(
                event_id = %report.event_id(),
                handler = name,
                error = %err,
                "event handler failed"
            );
            report.record_failure(name, Phase::Handle, err);
        }
    }
}
