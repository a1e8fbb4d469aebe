//! User settings - the flat preference record persisted client-side.

use serde::{Deserialize, Serialize};

/// User preferences.
///
/// Loaded once at startup, mutated only through the settings form's
/// explicit save, and mirrored back to storage on save. Defaults match
/// the values applied when a key has never been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    pub use_local_model: bool,
    pub local_model_url: String,
    pub theme: String,
    pub font_size: String,
    pub message_display: String,
    pub temperature: f64,
    pub response_length: String,
    pub conversation_memory: u32,
    pub interaction_mode: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "openai/gpt-3.5-turbo".to_string(),
            use_local_model: false,
            local_model_url: "http://localhost:11434/api/generate".to_string(),
            theme: "light".to_string(),
            font_size: "medium".to_string(),
            message_display: "bubbles".to_string(),
            temperature: 0.7,
            response_length: "medium".to_string(),
            conversation_memory: 10,
            interaction_mode: "simple".to_string(),
        }
    }
}
