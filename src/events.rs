//! Pointer-event fan-out for outside-press dismissal.
//!
//! The host owns one [`Dispatcher`] per pointer-event stream and feeds it
//! every press; widgets subscribe on mount and hold the returned
//! [`Subscription`] for as long as they are mounted. Everything is
//! single-threaded and synchronous.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Where a press landed relative to a picker's rendered region. The hit
/// test itself is the rendering surface's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerHit {
    Inside,
    Outside,
}

type Listener = Box<dyn Fn(PointerHit)>;

#[derive(Default)]
struct Registry {
    next_id: Cell<usize>,
    listeners: RefCell<Vec<(usize, Listener)>>,
}

/// Broadcast point for the global pointer-event stream.
#[derive(Clone, Default)]
pub struct Dispatcher {
    registry: Rc<Registry>,
}

impl Dispatcher {
    pub fn new() -> Dispatcher {
        Dispatcher::default()
    }

    /// Registers `listener` and returns the handle keeping it alive;
    /// dropping the handle deregisters it.
    pub fn subscribe<F: Fn(PointerHit) + 'static>(&self, listener: F) -> Subscription {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        self.registry
            .listeners
            .borrow_mut()
            .push((id, Box::new(listener)));

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Delivers one press to every live listener, in subscription order.
    /// Listeners must not subscribe or unsubscribe during delivery.
    pub fn pointer_pressed(&self, hit: PointerHit) {
        for (_, listener) in self.registry.listeners.borrow().iter() {
            listener(hit);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.listeners.borrow().len()
    }
}

/// Registration handle tied to a widget's mounted lifetime.
pub struct Subscription {
    id: usize,
    registry: Weak<Registry>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}
