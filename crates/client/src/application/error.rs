//! Application error taxonomy.
//!
//! Everything a service can fail with, already shaped for the
//! notification surface. Transport errors come in as `ApiError` and are
//! converted here; validation failures never touch the network.

use crate::ports::outbound::ApiError;

/// Client-side request timeout, applied per request by the HTTP adapter.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// A failed service operation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    /// Request could not be sent or no response was received.
    #[error("network error: {0}")]
    Network(String),
    /// No response within the client-side deadline.
    #[error("request timed out")]
    Timeout,
    /// Server answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Http { status: u16, message: String },
    /// Response body was not the JSON the endpoint promises.
    #[error("invalid response from server")]
    MalformedResponse,
    /// Local pre-network check failed; `field` names the input that
    /// should regain focus.
    #[error("validation failed on {field}: {message}")]
    Validation { field: String, message: String },
}

impl ServiceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The text shown in the notification surface.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Network(_) => {
                "Could not reach the server. Please try again later.".to_string()
            }
            ServiceError::Timeout => "The server took too long to respond.".to_string(),
            ServiceError::Http { message, .. } => message.clone(),
            ServiceError::MalformedResponse => "Invalid response from server.".to_string(),
            ServiceError::Validation { message, .. } => message.clone(),
        }
    }
}

impl From<ApiError> for ServiceError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Network(message) => ServiceError::Network(message),
            ApiError::Timeout => ServiceError::Timeout,
            ApiError::Status { status, body } => ServiceError::Http {
                status,
                message: server_message(status, &body),
            },
            ApiError::Malformed => ServiceError::MalformedResponse,
        }
    }
}

/// Derive a displayable message from an error response body.
///
/// JSON bodies with an `error` or `message` field are surfaced as-is.
/// Anything that looks like an HTML error page or a stack trace is
/// replaced with a generic message so server internals never reach the
/// notification surface.
fn server_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.trim().is_empty() && !looks_like_internals(text) {
                    return text.to_string();
                }
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() || looks_like_internals(trimmed) {
        format!("Server error ({status})")
    } else {
        trimmed.to_string()
    }
}

fn looks_like_internals(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.starts_with("<!doctype")
        || lowered.starts_with("<html")
        || lowered.contains("traceback (most recent call last)")
        || lowered.contains("internal server error</")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_body_is_surfaced() {
        let err: ServiceError = ApiError::Status {
            status: 400,
            body: r#"{"error": "Name is required"}"#.to_string(),
        }
        .into();
        assert_eq!(err.user_message(), "Name is required");
    }

    #[test]
    fn html_error_page_is_not_leaked() {
        let err: ServiceError = ApiError::Status {
            status: 500,
            body: "<!DOCTYPE html><html><body>Werkzeug debugger</body></html>".to_string(),
        }
        .into();
        assert_eq!(err.user_message(), "Server error (500)");
    }

    #[test]
    fn stack_trace_is_not_leaked() {
        let err: ServiceError = ApiError::Status {
            status: 500,
            body: "Traceback (most recent call last):\n  File \"app.py\"...".to_string(),
        }
        .into();
        assert_eq!(err.user_message(), "Server error (500)");
    }

    #[test]
    fn timeout_is_a_distinct_kind() {
        let err: ServiceError = ApiError::Timeout.into();
        assert!(matches!(err, ServiceError::Timeout));
    }
}
