//! Client state - the single source of truth plus view machine.

pub mod app_state;
pub mod bus;
pub mod notifications;
pub mod view;

pub use app_state::{AppState, CharacterRemoval, ChatRemoval, LoadTicket, SidebarTab};
pub use bus::{StateBus, StateEvent};
pub use notifications::{LoadingGuard, Notification, Notifier, Severity};
pub use view::{View, ViewController, ViewFlags};
