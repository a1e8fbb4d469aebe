//! Scenario service - scenario CRUD and authoring-time generation.

use std::sync::Arc;

use taleforge_domain::{NamedSection, Scenario, ScenarioId};

use crate::application::dto::{
    GenerateEntitiesRequest, GenerateFieldRequest, GenerateRequest, GeneratedContent,
};
use crate::application::error::ServiceError;
use crate::application::services::{body, parse};
use crate::ports::outbound::RawApiPort;

#[derive(Clone)]
pub struct ScenarioService {
    api: Arc<dyn RawApiPort>,
}

impl ScenarioService {
    pub fn new(api: Arc<dyn RawApiPort>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Scenario>, ServiceError> {
        let value = self.api.get_json("/api/scenarios").await?;
        parse(value)
    }

    pub async fn get(&self, id: &ScenarioId) -> Result<Scenario, ServiceError> {
        let value = self.api.get_json(&format!("/api/scenarios/{id}")).await?;
        parse(value)
    }

    pub async fn create(&self, scenario: &Scenario) -> Result<Scenario, ServiceError> {
        let value = self.api.post_json("/api/scenarios", &body(scenario)).await?;
        parse(value)
    }

    pub async fn update(&self, scenario: &Scenario) -> Result<Scenario, ServiceError> {
        let value = self
            .api
            .put_json(&format!("/api/scenarios/{}", scenario.id), &body(scenario))
            .await?;
        parse(value)
    }

    pub async fn delete(&self, id: &ScenarioId) -> Result<(), ServiceError> {
        self.api.delete(&format!("/api/scenarios/{id}")).await?;
        Ok(())
    }

    /// Generate a complete scenario draft from a free-text prompt.
    pub async fn generate_from_prompt(&self, prompt: &str) -> Result<Scenario, ServiceError> {
        let request = GenerateRequest {
            prompt: prompt.to_string(),
        };
        let value = self
            .api
            .post_json("/api/generate-scenario-from-prompt", &body(&request))
            .await?;
        parse(value)
    }

    /// Generate entries for one of the scenario collections
    /// (locations, NPCs, conflicts).
    pub async fn generate_entities(
        &self,
        request: &GenerateEntitiesRequest,
    ) -> Result<Vec<NamedSection>, ServiceError> {
        let value = self
            .api
            .post_json("/api/generate-entities", &body(request))
            .await?;
        // The server wraps the list as {"entities": [...]}.
        let entities = value
            .get("entities")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        parse(entities)
    }

    /// Generate content for one scenario form field.
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
