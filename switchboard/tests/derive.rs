#![cfg(feature = "macros")]

use switchboard::{
    CancellationToken, DeliveryMode, Event, EventId, Mediator, Message, Registry, Uuid,
    testing::CountingEventHandler,
};

#[derive(Clone, Debug, Message)]
struct Ping;

#[derive(Clone, Debug, Event)]
struct Shipped {
    id: EventId,
    parcel: u32,
}

#[derive(Clone, Debug, Event)]
struct Delivered {
    #[event(id)]
    correlation: Uuid,
    id: u64,
}

fn assert_message<M: Message>() {}

#[test]
fn test_derive_message() {
    assert_message::<Ping>();
}

#[test]
fn test_derive_event_uses_id_field() {
    let shipped = Shipped {
        id: EventId::new(),
        parcel: 3,
    };
    assert_eq!(shipped.event_id(), shipped.id);
    assert_eq!(shipped.parcel, 3);
}

#[test]
fn test_derive_event_uses_marked_field() {
    let correlation = Uuid::new_v4();
    let delivered = Delivered { correlation, id: 9 };
    assert_eq!(delivered.event_id(), EventId::from_uuid(correlation));
    assert_eq!(delivered.id, 9);
}

#[tokio::test]
async fn test_derived_event_is_publishable() {
    let counter = CountingEventHandler::new();
    let registry = Registry::builder()
        .event_handler::<Shipped, _>(counter.clone())
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    let event = Shipped {
        id: EventId::new(),
        parcel: 1,
    };
    let report = mediator
        .publish(&event, DeliveryMode::Sequential, &CancellationToken::new())
        .await;

    assert_eq!(report.event_id(), event.id);
    assert_eq!(counter.count(), 1);
}
