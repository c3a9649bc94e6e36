use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use parking_lot::RwLock;
use ahash::AHashMap;

/// Typed publish/subscribe bus
///
/// Listeners are keyed by the event's kind and invoked synchronously, in
/// registration order, on the emitting thread. Clones share one listener table,
/// so a view-model and its paired view can both hold the same bus.
pub struct EventBus<E: Event> {
    handlers: Arc<RwLock<AHashMap<E::Kind, Vec<Listener<E>>>>>,
}

/// Event trait that all bus payloads must implement
pub trait Event: Send + Sync + 'static {
    /// Fieldless discriminant used as the subscription key
    type Kind: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// The kind of this event
    fn kind(&self) -> Self::Kind;
}

/// A registered listener
pub type Listener<E> = Arc<dyn Fn(&E) -> anyhow::Result<()> + Send + Sync>;

impl<E: Event> EventBus<E> {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific kind
    pub fn on<F>(&self, kind: E::Kind, handler: F)
    where
        F: Fn(&E) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let mut handlers = self.handlers.write();
        handlers.entry(kind).or_default().push(Arc::new(handler));
    }

    /// Publish an event to every listener of its kind
    ///
    /// The first listener error stops delivery and is returned to the caller.
    /// The listener list is snapshotted first, so listeners may emit on this
    /// bus or subscribe new listeners while being notified.
    pub fn emit(&self, event: E) -> anyhow::Result<()> {
        let kind = event.kind();
        let listeners = match self.handlers.read().get(&kind) {
            Some(listeners) => listeners.clone(),
            None => {
                tracing::trace!("No listeners for {:?}", kind);
                return Ok(());
            }
        };

        for listener in &listeners {
            listener(&event)?;
        }
        Ok(())
    }

    /// Number of listeners registered for a kind
    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.handlers.read().get(&kind).map(Vec::len).unwrap_or(0)
    }
}

impl<E: Event> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl<E: Event> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers = self.handlers.read();
        f.debug_struct("EventBus")
            .field("kinds", &handlers.len())
            .field("listeners", &handlers.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}
