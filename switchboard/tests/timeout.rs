#![cfg(feature = "timeout")]

use std::time::Duration;
use switchboard::{
    BoxError, CancellationToken, Mediator, Registry,
    behaviors::{TimeoutBehavior, TimeoutError},
};

mod common;
use common::{Double, Doubled};

fn sleepy(delay: Duration) -> Mediator<Registry> {
    let registry = Registry::builder()
        .handler::<Double, Doubled, _>(move |request: &Double, _: &CancellationToken| {
            let value = request.value;
            async move {
                tokio::time::sleep(delay).await;
                Ok::<_, BoxError>(Doubled { result: value * 2 })
            }
        })
        .behavior::<Double, Doubled, _>(TimeoutBehavior::new(Duration::from_millis(20)))
        .build()
        .unwrap();
    Mediator::new(registry)
}

#[tokio::test]
async fn test_timeout_behavior_passes_fast_requests() {
    let response = sleepy(Duration::ZERO)
        .send::<Double, Doubled>(Double { value: 2 }, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(response.result, 4);
}

#[tokio::test]
async fn test_timeout_behavior_fails_slow_requests() {
    let err = sleepy(Duration::from_millis(500))
        .send::<Double, Doubled>(Double { value: 2 }, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<TimeoutError>(),
        Some(&TimeoutError(Duration::from_millis(20)))
    );
}
