//! Taleforge domain types.
//!
//! Entities and value objects for the character-chat client: characters,
//! chat instances, scenarios, and user settings. All invariants that can
//! live in the type system (stat clamping, turn input exclusivity,
//! world-size gating) live here, away from any I/O.

pub mod entities;
pub mod ids;
pub mod value_objects;

pub use entities::{Character, ChatInstance, NamedSection, Scenario, Turn, TurnInput, WorldSize};
pub use ids::{CharacterId, ChatId, ScenarioId};
pub use value_objects::{CharacterOverlay, CharacterPresentation, Settings, StatBlock};
