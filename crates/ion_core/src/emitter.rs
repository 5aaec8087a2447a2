//! Typed notification emitters
//!
//! Widgets publish notifications (value changes, style hints for a parent
//! container) through an [`EventEmitter`]. Listeners are plain closures and
//! run synchronously, in subscription order, on the dispatching thread.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use ion_core::emitter::EventEmitter;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut emitter = EventEmitter::new("ionCount");
//!
//! let sink = seen.clone();
//! emitter.subscribe(move |n: &u32| sink.borrow_mut().push(*n));
//! emitter.emit(&7);
//!
//! assert_eq!(*seen.borrow(), vec![7]);
//! ```

use serde::Serialize;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by [`EventEmitter::subscribe`]
    pub struct ListenerId;
}

/// Listener callback. Single-threaded, so no `Send` bound.
pub type Listener<T> = Box<dyn FnMut(&T)>;

/// A named notification channel with any number of listeners
pub struct EventEmitter<T> {
    name: &'static str,
    ids: SlotMap<ListenerId, ()>,
    listeners: Vec<(ListenerId, Listener<T>)>,
    emitted: u64,
}

impl<T> EventEmitter<T> {
    /// Create an emitter with the notification name hosts listen for
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ids: SlotMap::with_key(),
            listeners: Vec::new(),
            emitted: 0,
        }
    }

    /// Notification name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register a listener
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&T) + 'static,
    {
        let id = self.ids.insert(());
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        if self.ids.remove(id).is_none() {
            return false;
        }
        self.listeners.retain(|(lid, _)| *lid != id);
        true
    }

    /// Registered listeners in subscription order
    pub fn listener_ids(&self) -> impl Iterator<Item = ListenerId> + '_ {
        self.listeners.iter().map(|(id, _)| *id)
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// How many notifications have been emitted so far
    pub fn emitted_count(&self) -> u64 {
        self.emitted
    }
}

impl<T: Serialize> EventEmitter<T> {
    /// Deliver `payload` to every listener
    pub fn emit(&mut self, payload: &T) {
        self.emitted += 1;
        if tracing::enabled!(tracing::Level::DEBUG) {
            let json = serde_json::to_string(payload).unwrap_or_default();
            tracing::debug!(event = self.name, payload = %json, "emit");
        }
        for (_, listener) in self.listeners.iter_mut() {
            listener(payload);
        }
    }
}

impl<T> std::fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("name", &self.name)
            .field("listeners", &self.listeners.len())
            .field("emitted", &self.emitted)
            .finish()
    }
}
