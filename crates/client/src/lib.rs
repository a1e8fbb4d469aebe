//! Taleforge client - the browser-side application layer, headless.
//!
//! Layout follows the unified-client convention: `ports/` holds the
//! outbound interfaces, `application/` the services and error taxonomy,
//! `infrastructure/` the concrete adapters, `state/` the single source
//! of truth plus view machine, and `presentation/` the list and form
//! controllers that project state into view models.

pub mod application;
pub mod controller;
pub mod infrastructure;
pub mod ports;
pub mod presentation;
pub mod state;

pub use controller::AppController;
