//! Static registry for explicitly registered handlers.
//!
//! [`RegistryBuilder`] records handlers, behaviors, hooks and event
//! subscribers in registration order. [`RegistryBuilder::build`] validates the
//! configuration once: duplicate handlers and missing required handlers are
//! configuration errors, never dispatch-time surprises.
//!
//! Storage is type-erased. Each map is keyed by a [`Signature`] or a request /
//! event [`TypeId`], and the key fixes the concrete type stored in its slot.

use std::{
    any::{Any, TypeId},
    collections::{HashMap, HashSet},
    fmt,
    sync::Arc,
};
use switchboard_core::{
    ConfigError, DynEventHandler, DynPipelineBehavior, DynRequestHandler, DynRequestHook,
    DynRequestPostHook, DynRequestPreHook, DynTransactionalEventHandler, Empty, Event,
    EventHandler, HandlerRegistry, Message, NoInput, NoInputHandler, PipelineBehavior,
    RequestHandler, RequestHook, RequestPostHook, RequestPreHook, Signature, Subscriber,
    TransactionalEventHandler,
};

type Slot = Box<dyn Any + Send + Sync>;

/// A registry of explicitly registered handlers, behaviors, hooks and
/// event subscribers.
pub struct Registry {
    handlers: HashMap<Signature, Slot>,
    behaviors: HashMap<Signature, Slot>,
    pre_hooks: HashMap<TypeId, Slot>,
    hooks: HashMap<Signature, Slot>,
    post_hooks: HashMap<Signature, Slot>,
    subscribers: HashMap<TypeId, Slot>,
}

impl Registry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Number of registered request handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Whether a handler is registered for `Req -> Res`.
    pub fn contains_handler<Req: Message, Res: Message>(&self) -> bool {
        self.handlers.contains_key(&Signature::of::<Req, Res>())
    }

    /// Every signature with a registered handler, in no particular order.
    pub fn signatures(&self) -> impl Iterator<Item = Signature> + '_ {
        self.handlers.keys().copied()
    }
}

fn list<'a, K, T>(map: &'a HashMap<K, Slot>, key: &K) -> &'a [T]
where
    K: std::hash::Hash + Eq,
    T: Send + Sync + 'static,
{
    map.get(key)
        .and_then(|slot| slot.downcast_ref::<Vec<T>>())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

impl HandlerRegistry for Registry {
    fn resolve_handler<Req: Message, Res: Message>(
        &self,
    ) -> Option<&dyn DynRequestHandler<Req, Res>> {
        self.handlers
            .get(&Signature::of::<Req, Res>())
            .and_then(|slot| slot.downcast_ref::<Arc<dyn DynRequestHandler<Req, Res>>>())
            .map(|handler| handler.as_ref())
    }

    fn resolve_behaviors<Req: Message, Res: Message>(
        &self,
    ) -> &[Arc<dyn DynPipelineBehavior<Req, Res>>] {
        list(&self.behaviors, &Signature::of::<Req, Res>())
    }

    fn resolve_pre_hooks<Req: Message>(&self) -> &[Arc<dyn DynRequestPreHook<Req>>] {
        list(&self.pre_hooks, &TypeId::of::<Req>())
    }

    fn resolve_hooks<Req: Message, Res: Message>(&self) -> &[Arc<dyn DynRequestHook<Req, Res>>] {
        list(&self.hooks, &Signature::of::<Req, Res>())
    }

    fn resolve_post_hooks<Req: Message, Res: Message>(
        &self,
    ) -> &[Arc<dyn DynRequestPostHook<Req, Res>>] {
        list(&self.post_hooks, &Signature::of::<Req, Res>())
    }

    fn resolve_event_handlers<E: Event>(&self) -> &[Subscriber<E>] {
        list(&self.subscribers, &TypeId::of::<E>())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("behaviors", &self.behaviors.len())
            .field("pre_hooks", &self.pre_hooks.len())
            .field("hooks", &self.hooks.len())
            .field("post_hooks", &self.post_hooks.len())
            .field("event_types", &self.subscribers.len())
            .finish()
    }
}

/// Builder for constructing a [`Registry`].
///
/// # Example
///
/// ```rust,ignore
/// let registry = Registry::builder()
///     .handler(ForecastHandler)
///     .behavior::<GetForecast, Forecast, _>(LoggingBehavior)
///     .pre_hook(AuditHook)
///     .event_handler(EmailNotifier)
///     .transactional_event_handler(ReserveStock)
///     .require::<GetForecast, Forecast>()
///     .build()?;
/// ```
pub struct RegistryBuilder {
    registry: Registry,
    duplicates: Vec<Signature>,
    required: Vec<Signature>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Create a new empty registry builder.
    pub fn new() -> Self {
        Self {
            registry: Registry {
                handlers: HashMap::new(),
                behaviors: HashMap::new(),
                pre_hooks: HashMap::new(),
                hooks: HashMap::new(),
                post_hooks: HashMap::new(),
                subscribers: HashMap::new(),
            },
            duplicates: Vec::new(),
            required: Vec::new(),
        }
    }

    /// Register the handler for `Req -> Res`.
    ///
    /// Registering a second handler for the same signature makes
    /// [`build`](Self::build) fail with [`ConfigError::DuplicateHandler`].
    pub fn handler<Req, Res, H>(mut self, handler: H) -> Self
    where
        Req: Message,
        Res: Message,
        H: RequestHandler<Req, Res>,
    {
        let signature = Signature::of::<Req, Res>();
        let handler: Arc<dyn DynRequestHandler<Req, Res>> = Arc::new(handler);
        if self.registry.handlers.contains_key(&signature) {
            self.duplicates.push(signature);
        } else {
            self.registry.handlers.insert(signature, Box::new(handler));
        }
        self
    }

    /// Register a handler that takes no input, served for `Empty -> Res`.
    pub fn no_input_handler<Res, H>(self, handler: H) -> Self
    where
        Res: Message,
        H: NoInputHandler<Res>,
    {
        self.handler::<Empty, Res, _>(NoInput(handler))
    }

    /// Register a behavior for `Req -> Res`. Earlier registrations wrap later ones.
    pub fn behavior<Req, Res, B>(mut self, behavior: B) -> Self
    where
        Req: Message,
        Res: Message,
        B: PipelineBehavior<Req, Res>,
    {
        let behavior: Arc<dyn DynPipelineBehavior<Req, Res>> = Arc::new(behavior);
        push(&mut self.registry.behaviors, Signature::of::<Req, Res>(), behavior);
        self
    }

    /// Register a pre-hook for every signature whose request type is `Req`.
    pub fn pre_hook<Req, H>(mut self, hook: H) -> Self
    where
        Req: Message,
        H: RequestPreHook<Req>,
    {
        let hook: Arc<dyn DynRequestPreHook<Req>> = Arc::new(hook);
        push(&mut self.registry.pre_hooks, TypeId::of::<Req>(), hook);
        self
    }

    /// Register a full (pre + post) hook for `Req -> Res`.
    pub fn hook<Req, Res, H>(mut self, hook: H) -> Self
    where
        Req: Message,
        Res: Message,
        H: RequestHook<Req, Res>,
    {
        let hook: Arc<dyn DynRequestHook<Req, Res>> = Arc::new(hook);
        push(&mut self.registry.hooks, Signature::of::<Req, Res>(), hook);
        self
    }

    /// Register a post-hook for `Req -> Res`.
    pub fn post_hook<Req, Res, H>(mut self, hook: H) -> Self
    where
        Req: Message,
        Res: Message,
        H: RequestPostHook<Req, Res>,
    {
        let hook: Arc<dyn DynRequestPostHook<Req, Res>> = Arc::new(hook);
        push(&mut self.registry.post_hooks, Signature::of::<Req, Res>(), hook);
        self
    }

    /// Register an ordinary subscriber for events of type `E`.
    pub fn event_handler<E, H>(mut self, handler: H) -> Self
    where
        E: Event,
        H: EventHandler<E>,
    {
        let handler: Arc<dyn DynEventHandler<E>> = Arc::new(handler);
        push(
            &mut self.registry.subscribers,
            TypeId::of::<E>(),
            Subscriber::Ordinary(handler),
        );
        self
    }

    /// Register a transactional subscriber for events of type `E`.
    pub fn transactional_event_handler<E, H>(mut self, handler: H) -> Self
    where
        E: Event,
        H: TransactionalEventHandler<E>,
    {
        let handler: Arc<dyn DynTransactionalEventHandler<E>> = Arc::new(handler);
        push(
            &mut self.registry.subscribers,
            TypeId::of::<E>(),
            Subscriber::Transactional(handler),
        );
        self
    }

    /// Declare that `Req -> Res` must have a handler.
    ///
    /// [`build`](Self::build) fails with [`ConfigError::MissingHandler`] otherwise.
    pub fn require<Req: Message, Res: Message>(mut self) -> Self {
        self.required.push(Signature::of::<Req, Res>());
        self
    }

    /// Build the registry.
    pub fn build(self) -> Result<Registry, ConfigError> {
        if let Some(signature) = self.duplicates.first() {
            return Err(ConfigError::DuplicateHandler(*signature));
        }

        let mut seen = HashSet::new();
        for signature in self.required {
            if seen.insert(signature) && !self.registry.handlers.contains_key(&signature) {
                return Err(ConfigError::MissingHandler(signature));
            }
        }

        Ok(self.registry)
    }
}

fn push<K, T>(map: &mut HashMap<K, Slot>, key: K, item: T)
where
    K: std::hash::Hash + Eq,
    T: Send + Sync + 'static,
{
    let slot = map.entry(key).or_insert_with(|| Box::new(Vec::<T>::new()));
    let items = slot.downcast_mut::<Vec<T>>();
    // Every builder method stores one item type per key kind.
    debug_assert!(items.is_some(), "registry slot holds a different type");
    if let Some(items) = items {
        items.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_core::{BoxError, CancellationToken};

    #[derive(Debug, Clone, PartialEq)]
    struct Ping;
    impl Message for Ping {}

    fn pong(
        _req: &Ping,
        _cancel: &CancellationToken,
    ) -> std::future::Ready<Result<String, BoxError>> {
        std::future::ready(Ok("pong".to_string()))
    }

    #[test]
    fn resolves_registered_handler() {
        let registry = Registry::builder()
            .handler::<Ping, String, _>(pong)
            .build()
            .unwrap();

        assert_eq!(registry.handler_count(), 1);
        assert!(registry.contains_handler::<Ping, String>());
        assert_eq!(
            registry.signatures().collect::<Vec<_>>(),
            [Signature::of::<Ping, String>()]
        );
        assert!(registry.resolve_handler::<Ping, String>().is_some());
        assert!(registry.resolve_handler::<Ping, u32>().is_none());
        assert!(registry.resolve_behaviors::<Ping, String>().is_empty());
        assert!(registry.resolve_pre_hooks::<Ping>().is_empty());
    }

    #[test]
    fn duplicate_handler_is_a_config_error() {
        let err = Registry::builder()
            .handler::<Ping, String, _>(pong)
            .handler::<Ping, String, _>(pong)
            .build()
            .unwrap_err();

        assert_eq!(err, ConfigError::DuplicateHandler(Signature::of::<Ping, String>()));
    }

    #[test]
    fn required_signature_must_have_handler() {
        let err = Registry::builder()
            .handler::<Ping, String, _>(pong)
            .require::<Ping, String>()
            .require::<Ping, u32>()
            .build()
            .unwrap_err();

        assert_eq!(err, ConfigError::MissingHandler(Signature::of::<Ping, u32>()));
    }
}
