//! Character entity - an AI persona with descriptive and stat attributes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::CharacterId;
use crate::value_objects::StatBlock;

fn default_neutral() -> String {
    "neutral".to_string()
}

fn default_action() -> String {
    "standing still".to_string()
}

fn default_category() -> String {
    "fantasy".to_string()
}

/// An AI persona.
///
/// The derived UI fields (`mood`, `opinion_of_user`, `action`,
/// `location`) are filled with their documented defaults when absent
/// from a server payload, so downstream display code never deals with
/// missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub personality: String,
    #[serde(default)]
    pub greeting: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub appearance: String,
    #[serde(default)]
    pub speaking_style: String,

    // Derived UI fields
    #[serde(default = "default_neutral")]
    pub mood: String,
    #[serde(default = "default_neutral")]
    pub opinion_of_user: String,
    #[serde(default = "default_action")]
    pub action: String,
    #[serde(default)]
    pub location: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatBlock>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            description: String::new(),
            personality: String::new(),
            greeting: String::new(),
            category: default_category(),
            appearance: String::new(),
            speaking_style: String::new(),
            mood: default_neutral(),
            opinion_of_user: default_neutral(),
            action: default_action(),
            location: String::new(),
            stats: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_stats(mut self, stats: StatBlock) -> Self {
        self.stats = Some(stats);
        self
    }

    /// The stat block to display, falling back to defaults when the
    /// character has none of its own.
    pub fn effective_stats(&self) -> StatBlock {
        self.stats.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_payload_fills_ui_defaults() {
        let character: Character =
            serde_json::from_value(serde_json::json!({"id": "c1", "name": "Aria"}))
                .expect("character json");
        assert_eq!(character.mood, "neutral");
        assert_eq!(character.opinion_of_user, "neutral");
        assert_eq!(character.action, "standing still");
        assert_eq!(character.category, "fantasy");
        assert!(character.stats.is_none());
    }

    #[test]
    fn effective_stats_fall_back_to_defaults() {
        let character = Character::new("Aria");
        assert_eq!(character.effective_stats(), StatBlock::default());
    }
}
