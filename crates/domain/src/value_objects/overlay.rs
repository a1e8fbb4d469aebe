//! CharacterOverlay - per-chat display overrides for a character.
//!
//! A chat instance snapshots how its character currently presents
//! (mood, emotions, opinion of the user, action) without mutating the
//! character entity itself. The overlay is merged on top of the
//! referenced character for display only.

use serde::{Deserialize, Serialize};

use crate::entities::Character;

/// Display-only overrides applied on top of a referenced character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterOverlay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opinion_of_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// The merged, display-ready presentation of a character within a chat.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterPresentation {
    pub mood: String,
    pub emotions: String,
    pub opinion_of_user: String,
    pub action: String,
}

impl CharacterOverlay {
    pub fn is_empty(&self) -> bool {
        self.mood.is_none()
            && self.emotions.is_none()
            && self.opinion_of_user.is_none()
            && self.action.is_none()
    }

    /// Merge this overlay on top of the character's own derived fields.
    /// Overlay values win; missing values fall through to the character.
    pub fn apply_to(&self, character: &Character) -> CharacterPresentation {
        CharacterPresentation {
            mood: self.mood.clone().unwrap_or_else(|| character.mood.clone()),
            emotions: self.emotions.clone().unwrap_or_default(),
            opinion_of_user: self
                .opinion_of_user
                .clone()
                .unwrap_or_else(|| character.opinion_of_user.clone()),
            action: self
                .action
                .clone()
                .unwrap_or_else(|| character.action.clone()),
        }
    }
}
