//! Listener registry.

use super::event::GameEvent;

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Synchronous fan-out of [`GameEvent`]s to subscribed callbacks.
///
/// Listeners run in subscription order, on the caller's thread, before the
/// emitting operation returns.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use tileboard::events::{EventBus, GameEvent};
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let mut bus = EventBus::new();
/// let sink = Rc::clone(&seen);
/// bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));
///
/// bus.emit(&GameEvent::GameOver { winner: None });
/// assert_eq!(seen.borrow().len(), 1);
/// ```
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every future event.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Deliver an event to every listener.
    pub fn emit(&mut self, event: &GameEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_all_listeners_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            bus.subscribe(move |_| log.borrow_mut().push(tag));
        }
        assert_eq!(bus.listener_count(), 2);

        bus.emit(&GameEvent::GameOver { winner: None });
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_emit_without_listeners() {
        let mut bus = EventBus::new();
        bus.emit(&GameEvent::GameOver { winner: None });
        assert_eq!(bus.listener_count(), 0);
    }
}
