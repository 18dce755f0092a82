//! The outcome of one publish call.

use std::fmt;
use switchboard_core::{BoxError, EventId};

/// The step of event delivery a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The subscriber's `handle`.
    Handle,
    /// A transactional subscriber's `commit`.
    Commit,
    /// A transactional subscriber's `rollback`.
    Rollback,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Handle => "handle",
            Phase::Commit => "commit",
            Phase::Rollback => "rollback",
        })
    }
}

/// A recorded subscriber failure.
#[derive(Debug)]
pub struct HandlerFailure {
    /// The failing subscriber's name.
    pub handler: &'static str,
    /// Where it failed.
    pub phase: Phase,
    /// The error it returned.
    pub error: BoxError,
}

/// How the transactional group of a publish ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// Every handler succeeded and commit ran on all of them.
    Committed {
        /// Number of handlers in the transaction.
        handlers: usize,
    },
    /// A handler failed and every started handler was rolled back.
    RolledBack {
        /// Number of handlers started, including the failing one.
        attempted: usize,
        /// Name of the handler whose failure triggered the rollback.
        failed: &'static str,
    },
}

/// Everything recorded while publishing one event.
///
/// Publishing never fails; subscriber failures end up here (and in the
/// logs) instead.
#[derive(Debug)]
pub struct PublishReport {
    event_id: EventId,
    delivered: usize,
    failures: Vec<HandlerFailure>,
    transaction: Option<TransactionOutcome>,
}

impl PublishReport {
    pub(crate) fn new(event_id: EventId) -> Self {
        Self {
            event_id,
            delivered: 0,
            failures: Vec::new(),
            transaction: None,
        }
    }

    pub(crate) fn record_delivery(&mut self) {
        self.delivered += 1;
    }

    pub(crate) fn record_failure(&mut self, handler: &'static str, phase: Phase, error: BoxError) {
        self.failures.push(HandlerFailure {
            handler,
            phase,
            error,
        });
    }

    pub(crate) fn record_transaction(&mut self, outcome: TransactionOutcome) {
        self.transaction = Some(outcome);
    }

    /// The published event's id.
    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Number of ordinary subscribers that handled the event successfully.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Every recorded failure, in the order it was recorded.
    pub fn failures(&self) -> &[HandlerFailure] {
        &self.failures
    }

    /// Failures recorded in `phase`.
    pub fn failures_in(&self, phase: Phase) -> impl Iterator<Item = &HandlerFailure> {
        self.failures.iter().filter(move |failure| failure.phase == phase)
    }

    /// The transactional outcome, if the event had transactional subscribers.
    pub fn transaction(&self) -> Option<TransactionOutcome> {
        self.transaction
    }

    /// Whether nothing failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_filtered_by_phase() {
        let mut report = PublishReport::new(EventId::new());
        assert!(report.is_clean());

        report.record_delivery();
        report.record_failure("a", Phase::Handle, "boom".into());
        report.record_failure("b", Phase::Rollback, "stuck".into());
        report.record_failure("c", Phase::Rollback, "stuck".into());

        assert!(!report.is_clean());
        assert_eq!(report.delivered(), 1);
        assert_eq!(report.failures_in(Phase::Handle).count(), 1);
        let rollbacks: Vec<_> = report
            .failures_in(Phase::Rollback)
            .map(|failure| failure.handler)
            .collect();
        assert_eq!(rollbacks, ["b", "c"]);
        assert_eq!(report.failures_in(Phase::Commit).count(), 0);
    }
}
