//! System service - model listing and connection testing.

use std::sync::Arc;

use crate::application::dto::{ModelInfo, ModelsResponse, TestConnectionRequest, TestConnectionResult};
use crate::application::error::ServiceError;
use crate::application::services::{body, parse};
use crate::ports::outbound::RawApiPort;

#[derive(Clone)]
pub struct SystemService {
    api: Arc<dyn RawApiPort>,
}

impl SystemService {
    pub fn new(api: Arc<dyn RawApiPort>) -> Self {
        Self { api }
    }

    /// Models the backend can route requests to.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, ServiceError> {
        let value = self.api.get_json("/api/models").await?;
        let response: ModelsResponse = parse(value)?;
        Ok(response.models)
    }

    /// Verify the configured API key and model reach the provider.
    ///
    /// A failed check comes back as a normal result, not an error; the
    /// server reports unreachable providers with `success: false`.
    pub async fn test_connection(
        &self,
        request: &TestConnectionRequest,
    ) -> Result<TestConnectionResult, ServiceError> {
        match self
            .api
            .post_json("/api/config/test-connection", &body(request))
            .await
        {
            Ok(value) => parse(value),
            // The endpoint signals a failed check with a 400 carrying
            // the same {success, message} body.
            Err(crate::ports::outbound::ApiError::Status { status: 400, body }) => {
                serde_json::from_str(&body).map_err(|_| ServiceError::MalformedResponse)
            }
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{ApiError, ScriptedApi};
    use serde_json::json;

    #[tokio::test]
    async fn models_envelope_is_unwrapped() {
        let api = ScriptedApi::new();
        api.respond(
            "GET",
            "/api/models",
            json!({"success": true, "models": [
                {"id": "openai/gpt-3.5-turbo", "name": "GPT-3.5 Turbo"},
                {"id": "local", "name": "Local Model"}
            ]}),
        );

        let service = SystemService::new(Arc::new(api));
        let models = service.list_models().await.expect("models");
        assert_eq!(models.len(), 2);
        assert_eq!(models[1].id, "local");
    }

    #[tokio::test]
    async fn failed_check_is_a_result_not_an_error() {
        let api = ScriptedApi::new();
        api.fail(
            "POST",
            "/api/config/test-connection",
            ApiError::Status {
                status: 400,
                body: r#"{"success": false, "message": "API key is required"}"#.to_string(),
            },
        );

        let service = SystemService::new(Arc::new(api));
        let result = service
            .test_connection(&TestConnectionRequest {
                api_key: String::new(),
                model: "openai/gpt-3.5-turbo".to_string(),
                local_model_url: None,
            })
            .await
            .expect("check result");
        assert!(!result.success);
        assert_eq!(result.message, "API key is required");
    }
}
