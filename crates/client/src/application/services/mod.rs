//! Application services - one thin service per backend area.
//!
//! Each service holds an `Arc<dyn RawApiPort>` and translates between
//! typed DTOs/domain entities and the JSON boundary. No service retries
//! or caches; callers own those decisions.

mod character_service;
mod chat_service;
mod prompt_service;
mod scenario_service;
mod settings_service;
mod system_service;

pub use character_service::CharacterService;
pub use chat_service::{ChatExchange, ChatService};
pub use prompt_service::PromptService;
pub use scenario_service::ScenarioService;
pub use settings_service::SettingsService;
pub use system_service::SystemService;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::application::error::ServiceError;

/// Decode a JSON payload into `T`, collapsing schema mismatches into
/// the malformed-response error kind.
pub(crate) fn parse<T: DeserializeOwned>(value: Value) -> Result<T, ServiceError> {
    serde_json::from_value(value).map_err(|error| {
        tracing::debug!(%error, "response did not match the expected shape");
        ServiceError::MalformedResponse
    })
}

/// Encode a request DTO. Our DTOs contain only maps, strings, and
/// numbers, so encoding cannot fail in practice; a `Null` body would
/// be rejected by the server and surfaced like any other bad request.
pub(crate) fn body<T: Serialize>(request: &T) -> Value {
    serde_json::to_value(request).unwrap_or(Value::Null)
}
