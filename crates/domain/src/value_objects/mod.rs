//! Value objects - immutable data with no identity

mod overlay;
mod settings;
mod stats;

pub use overlay::{CharacterOverlay, CharacterPresentation};
pub use settings::Settings;
pub use stats::StatBlock;
