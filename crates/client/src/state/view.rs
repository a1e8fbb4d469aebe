//! View controller - the three mutually exclusive top-level views.
//!
//! A single `View` value is the whole truth about visibility. There is
//! no per-view boolean to drift out of sync and no second writer; every
//! transition funnels through `set_view`.

use std::sync::{Arc, Mutex};

use super::bus::{StateBus, StateEvent};

/// The top-level views. Exactly one is visible at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Landing page with the character/scenario overview.
    #[default]
    Homepage,
    /// Shown when no character is selected.
    Welcome,
    /// Active conversation with a character.
    Chat,
}

/// Visibility projection for the render layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewFlags {
    pub homepage: bool,
    pub welcome: bool,
    pub chat: bool,
}

impl View {
    pub fn flags(self) -> ViewFlags {
        ViewFlags {
            homepage: self == View::Homepage,
            welcome: self == View::Welcome,
            chat: self == View::Chat,
        }
    }
}

/// Owner of the current view.
///
/// Always starts at `Homepage`, regardless of what was selected in a
/// previous session.
#[derive(Clone)]
pub struct ViewController {
    current: Arc<Mutex<View>>,
    bus: StateBus,
}

impl ViewController {
    pub fn new(bus: StateBus) -> Self {
        Self {
            current: Arc::new(Mutex::new(View::default())),
            bus,
        }
    }

    pub fn current(&self) -> View {
        *self.lock()
    }

    pub fn flags(&self) -> ViewFlags {
        self.current().flags()
    }

    /// The only writer of visibility.
    pub fn set_view(&self, view: View) {
        {
            let mut current = self.lock();
            if *current == view {
                return;
            }
            *current = view;
        }
        tracing::debug!(?view, "view changed");
        self.bus.dispatch(StateEvent::ViewChanged(view));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, View> {
        match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
