//! Locale change notifications

use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Name of the page-wide event carrying a [`LocaleChanged`] payload
pub const LOCALE_CHANGED_EVENT: &str = "languageChanged";

/// Payload of a locale switch; serializes as `{"language": "<code>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleChanged {
    pub language: Locale,
}

/// Handle returned by [`LocaleListeners::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&LocaleChanged)>;

/// Synchronous listener registry.
///
/// Listeners run in subscription order, on the caller's stack, before
/// `emit` returns.
#[derive(Default)]
pub struct LocaleListeners {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

impl fmt::Debug for LocaleListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleListeners")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl LocaleListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&LocaleChanged) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns whether it was registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        before != self.listeners.len()
    }

    /// Deliver an event to every listener
    pub fn emit(&mut self, event: &LocaleChanged) {
        debug!(
            "Dispatching locale change to {} listeners: {}",
            self.listeners.len(),
            event.language
        );
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_payload_shape() {
        let event = LocaleChanged {
            language: Locale::new("ru"),
        };
        assert_eq!(serde_json::to_string(&event).unwrap(), r#"{"language":"ru"}"#);
    }

    #[test]
    fn test_listeners_receive_events_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = LocaleListeners::new();

        let first = Rc::clone(&seen);
        listeners.subscribe(move |event| first.borrow_mut().push(format!("a:{}", event.language)));
        let second = Rc::clone(&seen);
        listeners.subscribe(move |event| second.borrow_mut().push(format!("b:{}", event.language)));

        listeners.emit(&LocaleChanged {
            language: Locale::new("en"),
        });
        assert_eq!(*seen.borrow(), vec!["a:en", "b:en"]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners = LocaleListeners::new();

        let counter = Rc::clone(&count);
        let id = listeners.subscribe(move |_| *counter.borrow_mut() += 1);
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        assert!(listeners.is_empty());

        listeners.emit(&LocaleChanged {
            language: Locale::new("ru"),
        });
        assert_eq!(*count.borrow(), 0);
    }
}
