//! State bus - push-based change notifications.
//!
//! Mutation methods dispatch a `StateEvent` after the write completes;
//! renderers subscribe and redraw the affected projection. This keeps
//! the data flow unidirectional: nothing in the render path writes
//! state.

use std::sync::{Arc, Mutex};

use super::notifications::Notification;
use super::view::View;

/// What changed. Coarse-grained on purpose: renderers re-project the
/// slice they care about rather than patching individual items.
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    CharactersChanged,
    ChatsChanged,
    ScenariosChanged,
    CurrentCharacterChanged,
    CurrentChatChanged,
    SettingsChanged,
    ViewChanged(View),
    Notified(Notification),
    LoadingChanged(bool),
}

type Subscriber = Box<dyn FnMut(StateEvent) + Send>;

/// Subscription bus for state change events.
///
/// Holds strong references to subscribers; they persist until the bus
/// is dropped. Dispatch is synchronous and happens on the caller's
/// thread, after the corresponding state write has completed.
#[derive(Clone, Default)]
pub struct StateBus {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl StateBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked for every event.
    pub fn subscribe(&self, callback: impl FnMut(StateEvent) + Send + 'static) {
        self.lock().push(Box::new(callback));
    }

    /// Deliver an event to every subscriber, in registration order.
    pub fn dispatch(&self, event: StateEvent) {
        let mut subscribers = self.lock();
        for subscriber in subscribers.iter_mut() {
            subscriber(event.clone());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Subscriber>> {
        match self.subscribers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
