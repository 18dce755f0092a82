//! # switchboard - In-Process Request/Event Dispatch
//!
//! `switchboard` routes a request to exactly one handler, wrapped in a
//! configurable pipeline of behaviors and hooks, and publishes events to any
//! number of subscribers with ordinary or transactional delivery.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use switchboard::prelude::*;
//!
//! struct Double { value: i32 }
//! impl Message for Double {}
//!
//! let registry = Registry::builder()
//!     .handler::<Double, i32, _>(|req: &Double, _: &CancellationToken| {
//!         let value = req.value;
//!         async move { Ok::<_, BoxError>(value * 2) }
//!     })
//!     .behavior::<Double, i32, _>(LoggingBehavior)
//!     .build()?;
//!
//! let mediator = Mediator::new(registry);
//! let doubled = mediator
//!     .send::<Double, i32>(Double { value: 21 }, &CancellationToken::new())
//!     .await?;
//! assert_eq!(doubled, 42);
//! ```
//!
//! ## Transactional Events
//!
//! Transactional subscribers run in ascending `order()` after every ordinary
//! subscriber. If all of them succeed they are committed in reverse order; if
//! one fails, every subscriber that ran (the failing one included) is rolled
//! back in reverse order and the rest never run. The outcome is returned as a
//! [`PublishReport`].

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use switchboard_core::{
    // Errors
    BoxError,
    // Cancellation
    CancellationToken,
    ConfigError,
    DispatchError,
    // Behaviors / Hooks
    DynPipelineBehavior,
    // Handlers
    DynRequestHandler,
    DynRequestHook,
    DynRequestPostHook,
    DynRequestPreHook,
    // Events
    DynEventHandler,
    DynTransactionalEventHandler,
    // Message
    Empty,
    Event,
    EventHandler,
    EventId,
    HandlerRegistry,
    Message,
    Next,
    NoInput,
    NoInputHandler,
    PipelineBehavior,
    RequestHandler,
    RequestHook,
    RequestPostHook,
    RequestPreHook,
    Signature,
    Subscriber,
    SwitchboardError,
    TransactionalEventHandler,
    Uuid,
};

pub use switchboard_std::{
    DeliveryMode, EventPublisher, HandlerFailure, Mediator, Phase, PipelineOptions,
    PipelineStages, PublishReport, Registry, RegistryBuilder, Sender, TransactionOutcome,
};

/// Standard pipeline behaviors.
pub mod behaviors {
    #![allow(clippy::wildcard_imports)]
    pub use switchboard_std::behaviors::*;
}

/// Event publication and its report types.
pub mod publish {
    pub use switchboard_std::publish::{
        DeliveryMode, EventPublisher, HandlerFailure, Phase, PublishReport, TransactionOutcome,
    };
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use switchboard_std::testing::*;
}

/// Prelude module - common imports for Switchboard.
///
/// # Usage
///
/// ```rust,ignore
/// use switchboard::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        CancellationToken,
        DispatchError,
        // Events
        DeliveryMode,
        Event,
        EventHandler,
        EventId,
        // Message
        Empty,
        // Dispatch
        Mediator,
        Message,
        Next,
        // Pipeline
        PipelineBehavior,
        PipelineOptions,
        PublishReport,
        Registry,
        RequestHandler,
        RequestHook,
        RequestPostHook,
        RequestPreHook,
        TransactionalEventHandler,
        behaviors::LoggingBehavior,
    };
}

#[cfg(feature = "macros")]
pub use switchboard_macros::{Event, Message};
