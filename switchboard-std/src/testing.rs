//! Testing utilities for Switchboard.
//!
//! This module provides recording implementations of every extension point,
//! all writing to a shared [`Journal`] so a test can assert on the exact
//! order in which a pipeline or a publish ran.
//!
//! # Features
//!
//! - [`Journal`]: A shared, ordered log of labelled entries
//! - [`RecordingBehavior`], [`RecordingPreHook`], [`RecordingHook`],
//!   [`RecordingPostHook`]: Request pipeline probes
//! - [`RecordingEventHandler`]: An ordinary subscriber that can be told to fail
//! - [`ScriptedTransactionalHandler`]: A transactional subscriber that can be
//!   told to fail in any phase
//! - [`CountingEventHandler`]: A subscriber that counts invocations

use crate::publish::Phase;
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};
use switchboard_core::{
    BoxError, CancellationToken, Event, EventHandler, Message, Next, PipelineBehavior,
    RequestHook, RequestPostHook, RequestPreHook, TransactionalEventHandler,
};
use thiserror::Error;

// ============================================================================
// Journal
// ============================================================================

/// A shared, ordered log of entries such as `"auth:before"`.
///
/// Clones share the same log.
///
/// # Example
///
/// ```rust,ignore
/// let journal = Journal::new();
/// let registry = Registry::builder()
///     .behavior::<Ping, Pong, _>(RecordingBehavior::new("outer", &journal))
///     .build()?;
///
/// // ...dispatch...
///
/// assert_eq!(journal.entries(), ["outer:before", "outer:after"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&self, entry: impl Into<String>) {
        self.lock().push(entry.into());
    }

    /// A copy of every entry so far.
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Entries starting with `prefix`.
    pub fn entries_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|entry| entry.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Entries ending with `suffix`.
    pub fn entries_with_suffix(&self, suffix: &str) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|entry| entry.ends_with(suffix))
            .cloned()
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The error returned by scripted test handlers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{handler} failed during {phase}")]
pub struct ScriptedFailure {
    /// The failing handler's label.
    pub handler: &'static str,
    /// The phase it was told to fail in.
    pub phase: Phase,
}

// ============================================================================
// Request pipeline probes
// ============================================================================

/// A behavior recording `"{label}:before"` and `"{label}:after"` around
/// the rest of the pipeline.
#[derive(Debug, Clone)]
pub struct RecordingBehavior {
    label: &'static str,
    journal: Journal,
}

impl RecordingBehavior {
    /// Create a recording behavior.
    pub fn new(label: &'static str, journal: &Journal) -> Self {
        Self {
            label,
            journal: journal.clone(),
        }
    }
}

impl<Req: Message, Res: Message> PipelineBehavior<Req, Res> for RecordingBehavior {
    async fn handle(
        &self,
        _request: &Req,
        _cancel: &CancellationToken,
        next: Next<'_, Res>,
    ) -> Result<Res, BoxError> {
        self.journal.record(format!("{}:before", self.label));
        let result = next.run().await;
        self.journal.record(format!("{}:after", self.label));
        result
    }
}

/// A pre-hook recording `"{label}:pre"`.
#[derive(Debug, Clone)]
pub struct RecordingPreHook {
    label: &'static str,
    journal: Journal,
}

impl RecordingPreHook {
    /// Create a recording pre-hook.
    pub fn new(label: &'static str, journal: &Journal) -> Self {
        Self {
            label,
            journal: journal.clone(),
        }
    }
}

impl<Req: Message> RequestPreHook<Req> for RecordingPreHook {
    async fn on_executing(
        &self,
        _request: &Req,
        _cancel: &CancellationToken,
    ) -> Result<(), BoxError> {
        self.journal.record(format!("{}:pre", self.label));
        Ok(())
    }
}

/// A full hook recording `"{label}:executing"` and `"{label}:executed"`.
#[derive(Debug, Clone)]
pub struct RecordingHook {
    label: &'static str,
    journal: Journal,
}

impl RecordingHook {
    /// Create a recording hook.
    pub fn new(label: &'static str, journal: &Journal) -> Self {
        Self {
            label,
            journal: journal.clone(),
        }
    }
}

impl<Req: Message, Res: Message> RequestHook<Req, Res> for RecordingHook {
    async fn on_executing(
        &self,
        _request: &Req,
        _cancel: &CancellationToken,
    ) -> Result<(), BoxError> {
        self.journal.record(format!("{}:executing", self.label));
        Ok(())
    }

    async fn on_executed(
        &self,
        _request: &Req,
        _response: &Res,
        _cancel: &CancellationToken,
    ) -> Result<(), BoxError> {
        self.journal.record(format!("{}:executed", self.label));
        Ok(())
    }
}

/// A post-hook recording `"{label}:post"`.
#[derive(Debug, Clone)]
pub struct RecordingPostHook {
    label: &'static str,
    journal: Journal,
}

impl RecordingPostHook {
    /// Create a recording post-hook.
    pub fn new(label: &'static str, journal: &Journal) -> Self {
        Self {
            label,
            journal: journal.clone(),
        }
    }
}

impl<Req: Message, Res: Message> RequestPostHook<Req, Res> for RecordingPostHook {
    async fn on_executed(
        &self,
        _request: &Req,
        _response: &Res,
        _cancel: &CancellationToken,
    ) -> Result<(), BoxError> {
        self.journal.record(format!("{}:post", self.label));
        Ok(())
    }
}

// ============================================================================
// Event subscribers
// ============================================================================

/// An ordinary subscriber recording `"{label}:handle"`, optionally failing
/// afterwards.
#[derive(Debug, Clone)]
pub struct RecordingEventHandler {
    label: &'static str,
    journal: Journal,
    fail: bool,
}

impl RecordingEventHandler {
    /// Create a subscriber that succeeds.
    pub fn new(label: &'static str, journal: &Journal) -> Self {
        Self {
            label,
            journal: journal.clone(),
            fail: false,
        }
    }

    /// Create a subscriber that records its call and then fails.
    pub fn failing(label: &'static str, journal: &Journal) -> Self {
        Self {
            fail: true,
            ..Self::new(label, journal)
        }
    }
}

impl<E: Event> EventHandler<E> for RecordingEventHandler {
    async fn handle(&self, _event: &E, _cancel: &CancellationToken) -> Result<(), BoxError> {
        self.journal.record(format!("{}:handle", self.label));
        if self.fail {
            return Err(Box::new(ScriptedFailure {
                handler: self.label,
                phase: Phase::Handle,
            }));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.label
    }
}

/// A transactional subscriber recording `"{label}:handle"`,
/// `"{label}:commit"` and `"{label}:rollback"`, and failing in the phases it
/// was told to.
#[derive(Debug, Clone)]
pub struct ScriptedTransactionalHandler {
    label: &'static str,
    order: i32,
    journal: Journal,
    fail_in: Vec<Phase>,
}

impl ScriptedTransactionalHandler {
    /// Create a transactional subscriber that always succeeds.
    pub fn new(label: &'static str, order: i32, journal: &Journal) -> Self {
        Self {
            label,
            order,
            journal: journal.clone(),
            fail_in: Vec::new(),
        }
    }

    /// Make the subscriber fail (after recording) in `phase`.
    pub fn failing_in(mut self, phase: Phase) -> Self {
        self.fail_in.push(phase);
        self
    }

    fn step(&self, phase: Phase) -> Result<(), BoxError> {
        self.journal.record(format!("{}:{}", self.label, phase));
        if self.fail_in.contains(&phase) {
            return Err(Box::new(ScriptedFailure {
                handler: self.label,
                phase,
            }));
        }
        Ok(())
    }
}

impl<E: Event> EventHandler<E> for ScriptedTransactionalHandler {
    async fn handle(&self, _event: &E, _cancel: &CancellationToken) -> Result<(), BoxError> {
        self.step(Phase::Handle)
    }

    fn name(&self) -> &'static str {
        self.label
    }
}

impl<E: Event> TransactionalEventHandler<E> for ScriptedTransactionalHandler {
    fn order(&self) -> i32 {
        self.order
    }

    async fn commit(&self, _event: &E, _cancel: &CancellationToken) -> Result<(), BoxError> {
        self.step(Phase::Commit)
    }

    async fn rollback(&self, _event: &E, _cancel: &CancellationToken) -> Result<(), BoxError> {
        self.step(Phase::Rollback)
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A subscriber that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingEventHandler::new();
/// let registry = Registry::builder()
///     .event_handler::<Shipped, _>(counter.clone())
///     .build()?;
///
/// // ...publish...
///
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CountingEventHandler {
    count: Arc<AtomicUsize>,
}

impl CountingEventHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<E: Event> EventHandler<E> for CountingEventHandler {
    async fn handle(&self, _event: &E, _cancel: &CancellationToken) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
