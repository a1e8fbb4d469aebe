//! Character service - listing, CRUD, and AI generation for characters.

use std::sync::Arc;

use taleforge_domain::{Character, CharacterId};

use crate::application::dto::{GenerateFieldRequest, GenerateRequest, GeneratedContent, SaveCharacterRequest};
use crate::application::error::ServiceError;
use crate::application::services::{body, parse};
use crate::ports::outbound::RawApiPort;

#[derive(Clone)]
pub struct CharacterService {
    api: Arc<dyn RawApiPort>,
}

impl CharacterService {
    pub fn new(api: Arc<dyn RawApiPort>) -> Self {
        Self { api }
    }

    /// List all characters.
    pub async fn list(&self) -> Result<Vec<Character>, ServiceError> {
        let value = self.api.get_json("/api/characters").await?;
        parse(value)
    }

    /// Fetch full detail for a single character.
    pub async fn get(&self, id: &CharacterId) -> Result<Character, ServiceError> {
        let value = self.api.get_json(&format!("/api/characters/{id}")).await?;
        parse(value)
    }

    /// Create a new character.
    pub async fn create(&self, request: &SaveCharacterRequest) -> Result<Character, ServiceError> {
        let value = self.api.post_json("/api/characters", &body(request)).await?;
        parse(value)
    }

    /// Update an existing character.
    pub async fn update(
        &self,
        id: &CharacterId,
        request: &SaveCharacterRequest,
    ) -> Result<Character, ServiceError> {
        let value = self
            .api
            .put_json(&format!("/api/characters/{id}"), &body(request))
            .await?;
        parse(value)
    }

    /// Delete a character.
    pub async fn delete(&self, id: &CharacterId) -> Result<(), ServiceError> {
        self.api.delete(&format!("/api/characters/{id}")).await?;
        Ok(())
    }

    /// Generate a full character from a free-text prompt.
    pub async fn generate(&self, prompt: &str) -> Result<Character, ServiceError> {
        let request = GenerateRequest {
            prompt: prompt.to_string(),
        };
        let value = self
            .api
            .post_json("/api/generate-character", &body(&request))
            .await?;
        parse(value)
    }

    /// Generate content for one editor field.
    pub async fn generate_field(
        &self,
        field_name: &str,
        context: serde_json::Value,
    ) -> Result<String, ServiceError> {
        let request = GenerateFieldRequest {
            field_name: field_name.to_string(),
            context,
        };
        let value = self
            .api
            .post_json("/api/generate-field-content", &body(&request))
            .await?;
        let content: GeneratedContent = parse(value)?;
        Ok(content.content)
    }
}
