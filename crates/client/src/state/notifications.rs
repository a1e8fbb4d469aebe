//! Notification surface - ephemeral, queue-free, last-write-wins.
//!
//! The loading indicator is reference-counted and cleared through a
//! drop guard, so no early return or error path can leave the spinner
//! visible.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::bus::{StateBus, StateEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

#[derive(Clone)]
pub struct Notifier {
    slot: Arc<Mutex<Option<Notification>>>,
    loading: Arc<AtomicUsize>,
    bus: StateBus,
}

impl Notifier {
    pub fn new(bus: StateBus) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            loading: Arc::new(AtomicUsize::new(0)),
            bus,
        }
    }

    /// Replace whatever is currently shown. There is no queue.
    pub fn notify(&self, severity: Severity, message: impl Into<String>) {
        let notification = Notification {
            severity,
            message: message.into(),
        };
        *self.lock() = Some(notification.clone());
        self.bus.dispatch(StateEvent::Notified(notification));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(Severity::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Severity::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Severity::Error, message);
    }

    pub fn current(&self) -> Option<Notification> {
        self.lock().clone()
    }

    pub fn dismiss(&self) {
        *self.lock() = None;
    }

    /// Show the loading indicator until the returned guard drops.
    /// Guards nest; the indicator clears when the last one drops.
    pub fn begin_loading(&self) -> LoadingGuard {
        if self.loading.fetch_add(1, Ordering::SeqCst) == 0 {
            self.bus.dispatch(StateEvent::LoadingChanged(true));
        }
        LoadingGuard {
            notifier: self.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst) > 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Notification>> {
        match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Clears the loading indicator on drop, success or failure alike.
pub struct LoadingGuard {
    notifier: Notifier,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if self.notifier.loading.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.notifier.bus.dispatch(StateEvent::LoadingChanged(false));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_notification_wins() {
        let notifier = Notifier::new(StateBus::new());
        notifier.info("loading characters");
        notifier.error("network error");

        let shown = notifier.current().expect("notification");
        assert_eq!(shown.severity, Severity::Error);
        assert_eq!(shown.message, "network error");
    }

    #[test]
    fn loading_clears_when_the_last_guard_drops() {
        let notifier = Notifier::new(StateBus::new());
        assert!(!notifier.is_loading());

        let outer = notifier.begin_loading();
        let inner = notifier.begin_loading();
        assert!(notifier.is_loading());

        drop(inner);
        assert!(notifier.is_loading());
        drop(outer);
        assert!(!notifier.is_loading());
    }

    #[test]
    fn loading_clears_even_on_an_error_path() {
        let notifier = Notifier::new(StateBus::new());

        let result: Result<(), ()> = (|| {
            let _guard = notifier.begin_loading();
            Err(())
        })();

        assert!(result.is_err());
        assert!(!notifier.is_loading());
    }
}
