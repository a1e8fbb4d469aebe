//! Request and response DTOs for the backend API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use taleforge_domain::{CharacterId, StatBlock};

/// Character fields collected by the editor form; used for both create
/// (POST) and edit (PUT) round trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveCharacterRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub personality: String,
    #[serde(default)]
    pub greeting: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub appearance: String,
    #[serde(default)]
    pub speaking_style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateChatRequest {
    pub character_id: CharacterId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Request body for `POST /api/chat/{id}`. Player actions travel as a
/// JSON-encoded `message` with the action flags set, matching the wire
/// format the server expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
    pub use_local_model: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_player_action: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_success: Option<bool>,
}

/// Response body for `POST /api/chat/{id}`: the character's reply plus
/// its updated presentation. `emotions` arrives as a free-form JSON
/// object keyed by emotion name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageResponse {
    pub response: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub emotions: serde_json::Value,
    #[serde(default)]
    pub opinion_of_user: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub scene_description: String,
}

/// Free-text prompt wrapper used by the generation endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Request body for `/api/generate-field-content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateFieldRequest {
    pub field_name: String,
    #[serde(default)]
    pub context: serde_json::Value,
}

/// Response body for field generation: `{"content": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub content: String,
}

/// Request body for `/api/generate-entities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateEntitiesRequest {
    /// One of `location`, `npc`, `conflict`.
    pub entity_type: String,
    pub count: u32,
    #[serde(default)]
    pub context: serde_json::Value,
    #[serde(default)]
    pub existing_entities: Vec<String>,
}

/// Request body for `/api/config/test-connection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestConnectionRequest {
    pub api_key: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_model_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestConnectionResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
}

/// Envelope for `GET /api/models`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

/// Prompt templates are a flat name-to-template map; the server does
/// not fix the set of names, so neither do we.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptTemplates(pub BTreeMap<String, String>);

impl PromptTemplates {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, template: impl Into<String>) {
        self.0.insert(name.into(), template.into());
    }
}
