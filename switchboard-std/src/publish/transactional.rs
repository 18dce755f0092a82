//! Ordered all-or-nothing delivery to transactional subscribers.
//!
//! Handlers run one at a time by ascending order. Each handler is pushed on
//! the execution stack right before it runs, so a handler that fails is
//! still compensated. The stack is then unwound from the top:
//!
//! - all succeeded: `commit`, most recently executed first
//! - one failed: `rollback` on everything on the stack, most recent first
//!
//! Commit and rollback failures are recorded and unwinding carries on.
//! A commit failure does not roll anything back.

use super::report::{Phase, PublishReport, TransactionOutcome};
use std::sync::Arc;
use switchboard_core::{CancellationToken, DynTransactionalEventHandler, Event};
use tracing::{debug, error, info};

pub(crate) async fn deliver_transactional<E: Event>(
    event: &E,
    mut handlers: Vec<&Arc<dyn DynTransactionalEventHandler<E>>>,
    cancel: &CancellationToken,
    report: &mut PublishReport,
) {
    // Stable: equal orders keep registration order.
    handlers.sort_by_key(|handler| handler.order_dyn());

    let mut stack = Vec::with_capacity(handlers.len());
    let mut failed = None;

    for handler in handlers {
        stack.push(handler);
        debug!(
            event_id = %report.event_id(),
            handler = handler.name_dyn(),
            order = handler.order_dyn(),
            "running transactional handler"
        );
        if let Err(err) = handler.handle_dyn(event, cancel).await {
            error!(
                event_id = %report.event_id(),
                handler = handler.name_dyn(),
                error = %err,
                "transactional handler failed, rolling back"
            );
            report.record_failure(handler.name_dyn(), Phase::Handle, err);
            failed = Some(handler.name_dyn());
            break;
        }
    }

    match failed {
        None => {
            let committed = stack.len();
            while let Some(handler) = stack.pop() {
                if let Err(err) = handler.commit_dyn(event, cancel).await {
                    error!(
                        event_id = %report.event_id(),
                        handler = handler.name_dyn(),
                        error = %err,
                        "transactional commit failed"
                    );
                    report.record_failure(handler.name_dyn(), Phase::Commit, err);
                }
            }
            report.record_transaction(TransactionOutcome::Committed {
                handlers: committed,
            });
        }
        Some(failed) => {
            let attempted = stack.len();
            while let Some(handler) = stack.pop() {
                if let Err(err) = handler.rollback_dyn(event, cancel).await {
                    error!(
                        event_id = %report.event_id(),
                        handler = handler.name_dyn(),
                        error = %err,
                        "transactional rollback failed"
                    );
                    report.record_failure(handler.name_dyn(), Phase::Rollback, err);
                }
            }
            info!(
                event_id = %report.event_id(),
                attempted,
                failed,
                "transaction rolled back"
            );
            report.record_transaction(TransactionOutcome::RolledBack { attempted, failed });
        }
    }
}
