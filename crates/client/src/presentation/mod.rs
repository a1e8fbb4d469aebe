//! Headless presentation layer.
//!
//! Pure projections from state to view-models, plus the modal form
//! controllers. Nothing here touches the DOM or a widget toolkit; a
//! host UI consumes these and draws.

pub mod character_list;
pub mod chat_list;
pub mod chat_view;
pub mod forms;
pub mod list;
pub mod scenario_grid;
pub mod sidebar;

pub use forms::{CharacterForm, ScenarioForm, SectionVisibility, SettingsForm, SubmitOutcome};
pub use list::{ListItem, RenderedList};
