//! Timeout behavior for time-limited execution.

use std::time::Duration;
use switchboard_core::{BoxError, CancellationToken, Message, Next, PipelineBehavior};
use thiserror::Error;
use tokio::time::timeout;

/// Error returned when the pipeline does not finish in time.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("request timed out after {0:?}")]
pub struct TimeoutError(pub Duration);

/// A behavior that fails the request when the rest of the pipeline takes
/// longer than `duration`.
///
/// The inner future is dropped on timeout. Handlers that need cleanup should
/// observe the cancellation token instead.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutBehavior {
    duration: Duration,
}

impl TimeoutBehavior {
    /// Create a new timeout behavior.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl<Req: Message, Res: Message> PipelineBehavior<Req, Res> for TimeoutBehavior {
    async fn handle(
        &self,
        _request: &Req,
        _cancel: &CancellationToken,
        next: Next<'_, Res>,
    ) -> Result<Res, BoxError> {
        match timeout(self.duration, next.run()).await {
            Ok(result) => result,
            Err(_) => Err(Box::new(TimeoutError(self.duration))),
        }
    }
}
