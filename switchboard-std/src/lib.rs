//! # switchboard-std
//!
//! Standard implementations for the Switchboard request/event dispatch framework.
//!
//! This crate provides:
//! - **Registry**: [`Registry`] and [`RegistryBuilder`] for explicit registration
//! - **Request dispatch**: [`Sender`], configured by [`PipelineOptions`]
//! - **Event publication**: [`EventPublisher`] with ordinary and transactional delivery
//! - **Mediator**: [`Mediator`], both sides behind one registry
//! - **Standard behaviors**: Logging, Validation, Timeout
//! - **Testing utilities**: recording probes for every extension point

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use switchboard_core;

// Modules
pub mod behaviors;
pub mod mediator;
pub mod options;
pub mod publish;
pub mod registry;
pub mod sender;
pub mod testing;

pub use mediator::Mediator;
pub use options::{PipelineOptions, PipelineStages};
pub use publish::{
    DeliveryMode, EventPublisher, HandlerFailure, Phase, PublishReport, TransactionOutcome,
};
pub use registry::{Registry, RegistryBuilder};
pub use sender::Sender;
