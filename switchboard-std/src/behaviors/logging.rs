//! Logging behavior for request observation.

use std::{fmt::Debug, time::Instant};
use switchboard_core::{BoxError, CancellationToken, Message, Next, PipelineBehavior, Signature};
use tracing::{debug, warn};

/// A behavior that logs each request, its duration and its outcome.
///
/// It always runs the rest of the pipeline exactly once and passes the
/// response through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingBehavior;

impl<Req, Res> PipelineBehavior<Req, Res> for LoggingBehavior
where
    Req: Message + Debug,
    Res: Message,
{
    async fn handle(
        &self,
        request: &Req,
        _cancel: &CancellationToken,
        next: Next<'_, Res>,
    ) -> Result<Res, BoxError> {
        let signature = Signature::of::<Req, Res>();
        debug!(%signature, ?request, "handling request");

        let started = Instant::now();
        let result = next.run().await;
        let elapsed = started.elapsed();

        match &result {
            Ok(_) => debug!(%signature, ?elapsed, "request handled"),
            Err(err) => warn!(%signature, ?elapsed, error = %err, "request failed"),
        }
        result
    }
}
