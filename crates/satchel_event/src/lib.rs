//! # satchel_event - Inventory Notifications
//!
//! Small synchronous event primitives used by the inventory crates:
//! - Observer lists with priority-ordered delivery
//! - Queued channels for consumers that poll instead of subscribing
//!
//! Everything runs on the caller's thread. `Observers::notify` invokes the
//! handlers before returning, so a mutation and its notifications complete
//! within the same call.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;

/// Handler priority
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low = 0,
    Normal = 1,
    High = 2,
    Critical = 3,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

/// Trait for events
pub trait Event: Send + Sync + 'static {}

// Blanket implementation
impl<T: Send + Sync + 'static> Event for T {}

/// Event handler function type
pub type EventHandler<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

/// An ordered list of handlers for one event type
pub struct Observers<E: Event> {
    /// Handlers, highest priority first
    handlers: Vec<(SubscriberId, Priority, EventHandler<E>)>,
    /// Next subscriber ID
    next_subscriber_id: u64,
}

impl<E: Event> Observers<E> {
    /// Create an empty observer list
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_subscriber_id: 1,
        }
    }

    /// Subscribe a handler
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.subscribe_with_priority(handler, Priority::Normal)
    }

    /// Subscribe with priority
    pub fn subscribe_with_priority<F>(&mut self, handler: F, priority: Priority) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;

        self.handlers.push((id, priority, Box::new(handler)));

        // Stable sort keeps subscription order within a priority band
        self.handlers.sort_by(|a, b| b.1.cmp(&a.1));

        id
    }

    /// Unsubscribe. Returns false if the ID was unknown.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sub_id, _, _)| *sub_id != id);
        self.handlers.len() != before
    }

    /// Deliver an event to every handler
    pub fn notify(&self, event: &E) {
        for (_, _, handler) in &self.handlers {
            handler(event);
        }
    }

    /// Number of subscribed handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if nobody is listening
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Remove all handlers
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl<E: Event> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Channel for single-type events
pub struct EventChannel<E: Event> {
    queue: Mutex<VecDeque<E>>,
}

impl<E: Event> EventChannel<E> {
    /// Create a new channel
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Send an event
    pub fn send(&self, event: E) {
        self.queue.lock().push_back(event);
    }

    /// Receive the oldest event
    pub fn receive(&self) -> Option<E> {
        self.queue.lock().pop_front()
    }

    /// Drain all events in send order
    pub fn drain(&self) -> Vec<E> {
        self.queue.lock().drain(..).collect()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Get pending count
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }
}

impl<E: Event> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for EventChannel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("pending", &self.len())
            .finish()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{Event, EventChannel, EventHandler, Observers, Priority, SubscriberId};
}
