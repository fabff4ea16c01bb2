//! Host notifications and their subscribers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tower_lsp::lsp_types::Url;

/// A notification raised by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The focused document changed. `None` when nothing has focus.
    ActiveEditorChanged(Option<Url>),
    /// The text of a document changed.
    DocumentChanged(Url),
}

type Handler = Arc<dyn Fn(&HostEvent) + Send + Sync>;

/// Handle returned by [`EventBus::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Fan-out of host events to registered handlers.
#[derive(Default)]
pub struct EventBus {
    next_id: AtomicU64,
    handlers: RwLock<Vec<(Subscription, Handler)>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.read().len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for every subsequent event.
    pub fn register<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&HostEvent) + Send + Sync + 'static,
    {
        let subscription = Subscription(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.write().push((subscription, Arc::new(handler)));
        subscription
    }

    /// Removes a handler. Returns false if it was not registered.
    pub fn unregister(&self, subscription: Subscription) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(id, _)| *id != subscription);
        handlers.len() != before
    }

    /// Delivers `event` to every registered handler, in registration order.
    pub fn dispatch(&self, event: &HostEvent) {
        // Handlers may register or unregister, so call them without the lock.
        let handlers: Vec<Handler> = self
            .handlers
            .read()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        for handler in handlers {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    fn uri(path: &str) -> Url {
        Url::parse(&format!("file:///tmp/{path}")).unwrap()
    }

    #[test]
    fn test_dispatch_reaches_all_handlers_in_order() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = seen.clone();
            bus.register(move |event| seen.lock().push((tag, event.clone())));
        }

        let event = HostEvent::DocumentChanged(uri("a.css"));
        bus.dispatch(&event);

        assert_eq!(
            *seen.lock(),
            vec![("first", event.clone()), ("second", event)]
        );
    }

    #[test]
    fn test_unregister_stops_delivery() {
        let bus = EventBus::new();
        let count = Arc::new(Mutex::new(0));

        let c = count.clone();
        let subscription = bus.register(move |_| *c.lock() += 1);
        assert_eq!(bus.len(), 1);

        bus.dispatch(&HostEvent::ActiveEditorChanged(None));
        assert!(bus.unregister(subscription));
        assert!(!bus.unregister(subscription));
        assert!(bus.is_empty());
        bus.dispatch(&HostEvent::ActiveEditorChanged(None));

        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_handler_may_unregister_itself() {
        let bus = Arc::new(EventBus::new());
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let (b, s) = (bus.clone(), slot.clone());
        let subscription = bus.register(move |_| {
            if let Some(id) = s.lock().take() {
                b.unregister(id);
            }
        });
        *slot.lock() = Some(subscription);

        bus.dispatch(&HostEvent::ActiveEditorChanged(None));
        assert!(bus.is_empty());
    }
}
