#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use switchboard::{
    BoxError, CancellationToken, Event, EventHandler, EventId, Message, Next, NoInputHandler,
    PipelineBehavior, RequestHandler, RequestHook, RequestPostHook, RequestPreHook,
    behaviors::Validate, behaviors::ValidationError, testing::Journal,
};
use thiserror::Error;
use tokio::sync::Barrier;

// ============================================================================
// Test Request Types
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Double {
    pub value: i32,
}

impl Message for Double {}

impl Validate for Double {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.value < 0 {
            return Err(ValidationError::new("value must not be negative"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Doubled {
    pub result: i32,
}

impl Message for Doubled {}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot double {0} without overflowing")]
pub struct Overflow(pub i32);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("rejected by {0}")]
pub struct Rejected(pub &'static str);

// ============================================================================
// Test Handlers
// ============================================================================

/// Doubles the value, failing with [`Overflow`] when it does not fit.
#[derive(Debug, Clone, Default)]
pub struct DoubleHandler {
    pub calls: Arc<AtomicUsize>,
}

impl DoubleHandler {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RequestHandler<Double, Doubled> for DoubleHandler {
    async fn handle(
        &self,
        request: &Double,
        _cancel: &CancellationToken,
    ) -> Result<Doubled, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = request
            .value
            .checked_mul(2)
            .ok_or(Overflow(request.value))?;
        Ok(Doubled { result })
    }
}

pub struct Version;

impl NoInputHandler<String> for Version {
    async fn handle(&self, _cancel: &CancellationToken) -> Result<String, BoxError> {
        Ok("1.0.0".to_string())
    }
}

// ============================================================================
// Test Behaviors and Hooks
// ============================================================================

/// Answers without running the rest of the pipeline.
pub struct ShortCircuit(pub i32);

impl PipelineBehavior<Double, Doubled> for ShortCircuit {
    async fn handle(
        &self,
        _request: &Double,
        _cancel: &CancellationToken,
        _next: Next<'_, Doubled>,
    ) -> Result<Doubled, BoxError> {
        Ok(Doubled { result: self.0 })
    }
}

/// Runs the rest of the pipeline twice and sums the results.
pub struct RunTwice;

impl PipelineBehavior<Double, Doubled> for RunTwice {
    async fn handle(
        &self,
        _request: &Double,
        _cancel: &CancellationToken,
        next: Next<'_, Doubled>,
    ) -> Result<Doubled, BoxError> {
        let first = next.run().await?;
        let second = next.run().await?;
        Ok(Doubled {
            result: first.result + second.result,
        })
    }
}

/// A pre-hook that always fails.
pub struct RejectingPreHook(pub &'static str);

impl RequestPreHook<Double> for RejectingPreHook {
    async fn on_executing(
        &self,
        _request: &Double,
        _cancel: &CancellationToken,
    ) -> Result<(), BoxError> {
        Err(Box::new(Rejected(self.0)))
    }
}

/// A full hook that records both calls and fails in one of them.
pub struct RejectingHook {
    label: &'static str,
    journal: Journal,
    fail_executing: bool,
}

impl RejectingHook {
    /// Fails in `on_executing`, before the handler runs.
    pub fn before(label: &'static str, journal: &Journal) -> Self {
        Self {
            label,
            journal: journal.clone(),
            fail_executing: true,
        }
    }

    /// Fails in `on_executed`, after the handler produced a response.
    pub fn after(label: &'static str, journal: &Journal) -> Self {
        Self {
            fail_executing: false,
            ..Self::before(label, journal)
        }
    }
}

impl RequestHook<Double, Doubled> for RejectingHook {
    async fn on_executing(
        &self,
        _request: &Double,
        _cancel: &CancellationToken,
    ) -> Result<(), BoxError> {
        self.journal.record(format!("{}:executing", self.label));
        if self.fail_executing {
            return Err(Box::new(Rejected(self.label)));
        }
        Ok(())
    }

    async fn on_executed(
        &self,
        _request: &Double,
        _response: &Doubled,
        _cancel: &CancellationToken,
    ) -> Result<(), BoxError> {
        self.journal.record(format!("{}:executed", self.label));
        if !self.fail_executing {
            return Err(Box::new(Rejected(self.label)));
        }
        Ok(())
    }
}

/// A post-hook that always fails.
pub struct RejectingPostHook(pub &'static str);

impl RequestPostHook<Double, Doubled> for RejectingPostHook {
    async fn on_executed(
        &self,
        _request: &Double,
        _response: &Doubled,
        _cancel: &CancellationToken,
    ) -> Result<(), BoxError> {
        Err(Box::new(Rejected(self.0)))
    }
}

/// Records `"{label}:{stage}:{cancelled}"` from every pipeline stage it is
/// registered as.
#[derive(Clone)]
pub struct TokenWitness {
    pub label: &'static str,
    pub journal: Journal,
}

impl TokenWitness {
    pub fn new(label: &'static str, journal: &Journal) -> Self {
        Self {
            label,
            journal: journal.clone(),
        }
    }

    fn see(&self, stage: &str, cancel: &CancellationToken) {
        self.journal
            .record(format!("{}:{}:{}", self.label, stage, cancel.is_cancelled()));
    }
}

impl PipelineBehavior<Double, Doubled> for TokenWitness {
    async fn handle(
        &self,
        _request: &Double,
        cancel: &CancellationToken,
        next: Next<'_, Doubled>,
    ) -> Result<Doubled, BoxError> {
        self.see("behavior", cancel);
        next.run().await
    }
}

impl RequestPreHook<Double> for TokenWitness {
    async fn on_executing(
        &self,
        _request: &Double,
        cancel: &CancellationToken,
    ) -> Result<(), BoxError> {
        self.see("pre", cancel);
        Ok(())
    }
}

impl RequestHook<Double, Doubled> for TokenWitness {
    async fn on_executing(
        &self,
        _request: &Double,
        cancel: &CancellationToken,
    ) -> Result<(), BoxError> {
        self.see("executing", cancel);
        Ok(())
    }

    async fn on_executed(
        &self,
        _request: &Double,
        _response: &Doubled,
        cancel: &CancellationToken,
    ) -> Result<(), BoxError> {
        self.see("executed", cancel);
        Ok(())
    }
}

impl RequestPostHook<Double, Doubled> for TokenWitness {
    async fn on_executed(
        &self,
        _request: &Double,
        _response: &Doubled,
        cancel: &CancellationToken,
    ) -> Result<(), BoxError> {
        self.see("post", cancel);
        Ok(())
    }
}

// ============================================================================
// Test Event Types
// ============================================================================

#[derive(Clone, Debug)]
pub struct OrderPlaced {
    pub id: EventId,
    pub order: u64,
}

impl OrderPlaced {
    pub fn new(order: u64) -> Self {
        Self {
            id: EventId::new(),
            order,
        }
    }
}

impl Message for OrderPlaced {}

impl Event for OrderPlaced {
    fn event_id(&self) -> EventId {
        self.id
    }
}

// ============================================================================
// Test Event Handlers
// ============================================================================

/// Waits until every handler sharing the barrier has started.
pub struct Rendezvous {
    pub barrier: Arc<Barrier>,
}

impl EventHandler<OrderPlaced> for Rendezvous {
    async fn handle(
        &self,
        _event: &OrderPlaced,
        _cancel: &CancellationToken,
    ) -> Result<(), BoxError> {
        self.barrier.wait().await;
        Ok(())
    }
}
