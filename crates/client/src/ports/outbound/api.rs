//! Raw API port - object-safe HTTP boundary.
//!
//! Application services need an abstraction they can store behind
//! `Arc<dyn ...>`, so this trait works in `serde_json::Value` and leaves
//! typed (de)serialization to the service layer.

use serde_json::Value;

/// Transport-level failure, before any domain interpretation.
///
/// The three remote kinds map one-to-one onto the user-facing error
/// taxonomy; `Timeout` is kept distinct from `Network` so the client can
/// tell "took too long" apart from "could not reach".
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Request could not be sent or no response was received.
    #[error("network error: {0}")]
    Network(String),
    /// No response within the client-side deadline.
    #[error("request timed out")]
    Timeout,
    /// Response received with a non-success status.
    #[error("HTTP {status}")]
    Status { status: u16, body: String },
    /// Response body was not valid JSON when JSON was expected.
    #[error("malformed response body")]
    Malformed,
}

/// Object-safe HTTP boundary implemented by adapters.
///
/// One method per verb the backend uses; no retries, no deduplication.
/// Callers decide what to do with failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RawApiPort: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn delete(&self, path: &str) -> Result<(), ApiError>;
}
