//! Entities - objects with identity and lifecycle

mod character;
mod chat_instance;
mod scenario;

pub use character::Character;
pub use chat_instance::{ChatInstance, Turn, TurnInput};
pub use scenario::{NamedSection, Scenario, WorldSize};
