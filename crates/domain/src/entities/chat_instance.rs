//! ChatInstance entity - a persisted conversation session bound to one
//! character.
//!
//! The instance references its character by id; it never owns it. Turns
//! are append-only and immutable once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CharacterId, ChatId};
use crate::value_objects::CharacterOverlay;

/// What the user contributed to a turn. Exactly one variant is ever
/// meaningful, which is why this is an enum rather than two optional
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnInput {
    UserMessage(String),
    PlayerAction {
        description: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        success: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

/// One resolved conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub input: TurnInput,
    pub character_response: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub emotions: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub scene_description: String,
}

/// A persisted conversation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatInstance {
    pub id: ChatId,
    pub character_id: CharacterId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub character_state: CharacterOverlay,
    #[serde(default)]
    pub conversations: Vec<Turn>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl ChatInstance {
    pub fn new(character_id: CharacterId) -> Self {
        Self {
            id: ChatId::new(),
            character_id,
            title: None,
            location: String::new(),
            character_state: CharacterOverlay::default(),
            conversations: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Display title: the explicit title, or `Chat with {name}` derived
    /// from the referenced character.
    pub fn title_or_default(&self, character_name: &str) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => format!("Chat with {character_name}"),
        }
    }

    /// Append a turn. Turns are immutable once added; there is no API
    /// for editing or removing one.
    pub fn push_turn(&mut self, turn: Turn) {
        self.conversations.push(turn);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_title_uses_character_name() {
        let chat = ChatInstance::new(CharacterId::from("c1"));
        assert_eq!(chat.title_or_default("Aria"), "Chat with Aria");
    }

    #[test]
    fn explicit_title_wins_but_blank_title_does_not() {
        let mut chat = ChatInstance::new(CharacterId::from("c1"));
        chat.title = Some("First meeting".to_string());
        assert_eq!(chat.title_or_default("Aria"), "First meeting");

        chat.title = Some("   ".to_string());
        assert_eq!(chat.title_or_default("Aria"), "Chat with Aria");
    }

    #[test]
    fn turn_input_serializes_one_variant_only() {
        let turn = Turn {
            input: TurnInput::PlayerAction {
                description: "pick the lock".to_string(),
                success: Some(true),
                details: Some("rolled 18".to_string()),
            },
            character_response: "The door creaks open.".to_string(),
            mood: String::new(),
            emotions: String::new(),
            action: String::new(),
            location: String::new(),
            scene_description: String::new(),
        };
        let json = serde_json::to_value(&turn).expect("turn json");
        assert!(json["input"].get("player_action").is_some());
        assert!(json["input"].get("user_message").is_none());
    }
}
