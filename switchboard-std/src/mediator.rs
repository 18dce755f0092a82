//! Requests and events behind one registry.

use crate::{
    options::PipelineOptions,
    publish::{DeliveryMode, EventPublisher, PublishReport},
    sender::Sender,
};
use std::{fmt, sync::Arc};
use switchboard_core::{CancellationToken, DispatchError, Event, HandlerRegistry, Message};

/// A [`Sender`] and an [`EventPublisher`] sharing one registry.
///
/// # Example
///
/// ```rust,ignore
/// let mediator = Mediator::new(registry);
/// let forecast: Forecast = mediator.send(GetForecast { city }, &cancel).await?;
/// mediator.publish(&ForecastCreated::new(city), DeliveryMode::Parallel, &cancel).await;
/// ```
pub struct Mediator<R> {
    sender: Sender<R>,
    publisher: EventPublisher<R>,
}

impl<R: HandlerRegistry> Mediator<R> {
    /// Create a mediator with every pipeline stage enabled.
    pub fn new(registry: R) -> Self {
        Self::with_options(registry, PipelineOptions::default())
    }

    /// Create a mediator whose sender runs with `options`.
    pub fn with_options(registry: R, options: PipelineOptions) -> Self {
        let registry = Arc::new(registry);
        Self {
            sender: Sender::with_options(Arc::clone(&registry), options),
            publisher: EventPublisher::new(registry),
        }
    }

    /// The request side.
    pub fn sender(&self) -> &Sender<R> {
        &self.sender
    }

    /// The event side.
    pub fn publisher(&self) -> &EventPublisher<R> {
        &self.publisher
    }

    /// See [`Sender::send`].
    ///
    /// # Errors
    ///
    /// Same as [`Sender::send`].
    pub async fn send<Req: Message, Res: Message>(
        &self,
        request: Req,
        cancel: &CancellationToken,
    ) -> Result<Res, DispatchError> {
        self.sender.send(request, cancel).await
    }

    /// See [`Sender::send_empty`].
    ///
    /// # Errors
    ///
    /// Same as [`Sender::send`].
    pub async fn send_empty<Res: Message>(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Res, DispatchError> {
        self.sender.send_empty(cancel).await
    }

    /// See [`EventPublisher::publish`].
    pub async fn publish<E: Event>(
        &self,
        event: &E,
        mode: impl Into<DeliveryMode>,
        cancel: &CancellationToken,
    ) -> PublishReport {
        self.publisher.publish(event, mode, cancel).await
    }
}

impl<R> Clone for Mediator<R> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

impl<R> fmt::Debug for Mediator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mediator")
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}
