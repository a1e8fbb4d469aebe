//! Prompt service - the single, authoritative prompt-template model.

use std::sync::Arc;

use crate::application::dto::PromptTemplates;
use crate::application::error::ServiceError;
use crate::application::services::{body, parse};
use crate::ports::outbound::RawApiPort;

#[derive(Clone)]
pub struct PromptService {
    api: Arc<dyn RawApiPort>,
}

impl PromptService {
    pub fn new(api: Arc<dyn RawApiPort>) -> Self {
        Self { api }
    }

    /// Current prompt templates.
    pub async fn get(&self) -> Result<PromptTemplates, ServiceError> {
        let value = self.api.get_json("/api/prompts").await?;
        parse(value)
    }

    /// Built-in default templates.
    pub async fn defaults(&self) -> Result<PromptTemplates, ServiceError> {
        let value = self.api.get_json("/api/prompts/default").await?;
        parse(value)
    }

    /// Persist edited templates.
    pub async fn save(&self, templates: &PromptTemplates) -> Result<(), ServiceError> {
        self.api.put_json("/api/prompts", &body(templates)).await?;
        Ok(())
    }

    /// Reset templates to defaults; returns the restored set.
    pub async fn reset(&self) -> Result<PromptTemplates, ServiceError> {
        let value = self
            .api
            .post_json("/api/prompts/reset", &serde_json::Value::Null)
            .await?;
        parse(value)
    }
}
