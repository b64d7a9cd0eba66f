//! Observer lists for change notification.
//!
//! Viewport and tool state are plain structs; anything that needs to react to
//! a change (a renderer, a toolbar) subscribes here. Dropping the returned
//! [`Subscription`] unsubscribes.
//!
//! Listeners run synchronously inside the mutating call and must not re-enter
//! the object that notified them.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener<E> = Rc<dyn Fn(&E)>;
type ListenerList<E> = RefCell<Vec<(u64, Listener<E>)>>;

/// A list of listeners for events of type `E`.
pub struct Observers<E> {
    listeners: Rc<ListenerList<E>>,
    next_id: Cell<u64>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self { listeners: Rc::new(RefCell::new(Vec::new())), next_id: Cell::new(0) }
    }
}

impl<E: 'static> Observers<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it stays registered while the subscription lives.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&E) + 'static) -> Subscription<E> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        Subscription { id, listeners: Rc::downgrade(&self.listeners) }
    }

    /// Deliver `event` to every listener in subscription order.
    pub fn notify(&self, event: &E) {
        let listeners: Vec<Listener<E>> = self.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            listener(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Guard that removes its listener on drop.
pub struct Subscription<E> {
    id: u64,
    listeners: Weak<ListenerList<E>>,
}

impl<E> Drop for Subscription<E> {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}
