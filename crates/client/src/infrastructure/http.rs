//! HTTP adapter - `RawApiPort` over reqwest.

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use url::Url;

use crate::application::REQUEST_TIMEOUT_SECS;
use crate::ports::outbound::{ApiError, RawApiPort};

/// Header carrying the user's API key, when one is configured.
const API_KEY_HEADER: &str = "X-API-Key";

/// Backend HTTP client.
///
/// One instance per backend origin. Applies the client-side timeout to
/// every request and forwards the API key header when configured. No
/// retries; callers decide whether to prompt the user.
#[derive(Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base: Url,
    api_key: Option<String>,
}

impl HttpApi {
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = (!api_key.is_empty()).then_some(api_key);
        self
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|error| ApiError::Network(format!("invalid request path {path}: {error}")))
    }

    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.prepare(builder).send().await.map_err(map_transport)?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn send_json(&self, builder: RequestBuilder) -> Result<Value, ApiError> {
        let response = self.send(builder).await?;
        let text = response.text().await.map_err(map_transport)?;
        serde_json::from_str(&text).map_err(|_| {
            tracing::debug!("response body was not valid JSON");
            ApiError::Malformed
        })
    }
}

fn map_transport(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(error.to_string())
    }
}

#[async_trait::async_trait]
impl RawApiPort for HttpApi {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.url(path)?;
        self.send_json(self.client.get(url)).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = self.url(path)?;
        self.send_json(self.client.post(url).json(body)).await
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = self.url(path)?;
        self.send_json(self.client.put(url).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path)?;
        // Delete responses carry no payload the client needs.
        self.send(self.client.delete(url)).await.map(|_| ())
    }
}
