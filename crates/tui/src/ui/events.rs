//! Listener hub: the terminal-wide equivalent of document level listeners.
//!
//! Components that need to observe input they do not own (a global Escape
//! key, presses anywhere on screen) register a listener with the
//! [`EventHub`] and keep the returned [`Subscription`]. Dropping the
//! subscription removes the listener, so a listener lives exactly as long as
//! the value holding it.
//!
//! Everything here is single-threaded: listeners are `Rc` closures invoked on
//! the UI thread in registration order.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crossterm::event::{Event, KeyEvent, MouseEvent};
use indexmap::IndexMap;

pub type KeyListener = Rc<dyn Fn(&KeyEvent)>;
pub type PointerListener = Rc<dyn Fn(&MouseEvent)>;

#[derive(Clone)]
enum Listener {
    Key(KeyListener),
    Pointer(PointerListener),
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: IndexMap<u64, Listener>,
}

impl Registry {
    fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.insert(id, listener);
        id
    }
}

/// Shared listener registry. Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct EventHub {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub").field("listeners", &self.listener_count()).finish()
    }
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for every key event.
    pub fn add_key_listener(&self, listener: impl Fn(&KeyEvent) + 'static) -> Subscription {
        self.subscribe(Listener::Key(Rc::new(listener)))
    }

    /// Registers a listener for every mouse event.
    pub fn add_pointer_listener(&self, listener: impl Fn(&MouseEvent) + 'static) -> Subscription {
        self.subscribe(Listener::Pointer(Rc::new(listener)))
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Delivers `event` to every listener of the matching kind.
    ///
    /// The listener set is snapshotted first, so listeners may subscribe or
    /// drop subscriptions while being called. Returns how many listeners ran.
    pub fn dispatch(&self, event: &Event) -> usize {
        let snapshot: Vec<Listener> = self.registry.borrow().listeners.values().cloned().collect();
        let mut delivered = 0;
        for listener in snapshot {
            match (&listener, event) {
                (Listener::Key(listener), Event::Key(key)) => {
                    listener(key);
                    delivered += 1;
                }
                (Listener::Pointer(listener), Event::Mouse(mouse)) => {
                    listener(mouse);
                    delivered += 1;
                }
                _ => {}
            }
        }
        delivered
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = self.registry.borrow_mut().insert(listener);
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }
}

/// Keeps one listener registered until dropped.
#[must_use = "dropping a subscription removes its listener immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().listeners.shift_remove(&self.id);
        }
    }
}
