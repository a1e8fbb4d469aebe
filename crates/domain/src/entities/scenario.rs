//! Scenario entity - an authored world template with size-gated
//! optional sections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ScenarioId;

/// World size drives which optional sections exist and how many entries
/// the authoring form suggests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorldSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl WorldSize {
    /// Conflicts are authored for medium and large worlds.
    pub fn shows_conflicts(self) -> bool {
        matches!(self, WorldSize::Medium | WorldSize::Large)
    }

    /// Settlements, political structure, geography, and economy are
    /// authored for large worlds only.
    pub fn shows_large_world_sections(self) -> bool {
        matches!(self, WorldSize::Large)
    }

    /// Suggested number of location entries in the authoring form.
    pub fn suggested_location_count(self) -> usize {
        match self {
            WorldSize::Small => 3,
            WorldSize::Medium => 6,
            WorldSize::Large => 8,
        }
    }

    /// Suggested number of NPC entries in the authoring form.
    pub fn suggested_npc_count(self) -> usize {
        match self {
            WorldSize::Small => 2,
            WorldSize::Medium => 5,
            WorldSize::Large => 10,
        }
    }
}

/// A named, described entry in one of the scenario collections
/// (location, NPC, conflict, settlement).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedSection {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// An authored world/setting template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub starting_location: String,
    #[serde(default)]
    pub world_size: WorldSize,
    #[serde(default)]
    pub world_rules: String,

    // Present at all sizes
    #[serde(default)]
    pub locations: Vec<NamedSection>,
    #[serde(default)]
    pub npcs: Vec<NamedSection>,

    // Medium and large only
    #[serde(default)]
    pub conflicts: Vec<NamedSection>,

    // Large only
    #[serde(default)]
    pub settlements: Vec<NamedSection>,
    #[serde(default)]
    pub political_structure: String,
    #[serde(default)]
    pub geography: String,
    #[serde(default)]
    pub economy: String,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Scenario {
    pub fn new(title: impl Into<String>, world_size: WorldSize) -> Self {
        Self {
            id: ScenarioId::new(),
            title: title.into(),
            description: String::new(),
            starting_location: String::new(),
            world_size,
            world_rules: String::new(),
            locations: Vec::new(),
            npcs: Vec::new(),
            conflicts: Vec::new(),
            settlements: Vec::new(),
            political_structure: String::new(),
            geography: String::new(),
            economy: String::new(),
            updated_at: Utc::now(),
        }
    }
}
