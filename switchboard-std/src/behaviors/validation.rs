//! Validation behavior.

use switchboard_core::{BoxError, CancellationToken, Message, Next, PipelineBehavior};
use thiserror::Error;

/// Error returned when a request fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid request: {reason}")]
pub struct ValidationError {
    /// What is wrong with the request.
    pub reason: String,
}

impl ValidationError {
    /// Create a validation error.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Requests that can check their own invariants.
pub trait Validate {
    /// Returns an error describing the first violated invariant.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// A behavior that rejects invalid requests before anything else runs.
///
/// An invalid request short-circuits the pipeline: inner behaviors, hooks
/// and the handler are skipped and the [`ValidationError`] is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationBehavior;

impl<Req, Res> PipelineBehavior<Req, Res> for ValidationBehavior
where
    Req: Message + Validate,
    Res: Message,
{
    async fn handle(
        &self,
        request: &Req,
        _cancel: &CancellationToken,
        next: Next<'_, Res>,
    ) -> Result<Res, BoxError> {
        request.validate()?;
        next.run().await
    }
}
