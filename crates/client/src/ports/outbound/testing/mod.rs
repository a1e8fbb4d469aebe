//! Scripted fake `RawApiPort` for tests.
//!
//! Lets tests queue responses per endpoint and assert the outbound
//! calls afterwards. Lives in the ports layer next to the trait it
//! fakes so both unit and integration tests can reach it.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;

use super::api::{ApiError, RawApiPort};

/// One recorded outbound request.
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

struct Scripted {
    result: Result<Value, ApiError>,
    delay: Option<Duration>,
}

#[derive(Default)]
struct State {
    responses: HashMap<(String, String), VecDeque<Scripted>>,
    sent: Vec<SentRequest>,
}

/// Scripted `RawApiPort` fake.
///
/// Responses are consumed in FIFO order per `(method, path)` key. An
/// unscripted request fails loudly with `ApiError::Network` so the test
/// points straight at the missing script entry.
#[derive(Clone, Default)]
pub struct ScriptedApi {
    state: Arc<Mutex<State>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a success response for `method path`.
    pub fn respond(&self, method: &str, path: &str, value: Value) {
        self.push(method, path, Ok(value), None);
    }

    /// Queue a success response delivered after `delay` of (tokio) time.
    /// Used to model out-of-order network completions.
    pub fn respond_after(&self, method: &str, path: &str, value: Value, delay: Duration) {
        self.push(method, path, Ok(value), Some(delay));
    }

    /// Queue a failure for `method path`.
    pub fn fail(&self, method: &str, path: &str, error: ApiError) {
        self.push(method, path, Err(error), None);
    }

    /// All requests issued so far, in order.
    pub fn sent(&self) -> Vec<SentRequest> {
        self.lock().sent.clone()
    }

    /// Number of requests issued to `method path`.
    pub fn request_count(&self, method: &str, path: &str) -> usize {
        self.lock()
            .sent
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    fn push(&self, method: &str, path: &str, result: Result<Value, ApiError>, delay: Option<Duration>) {
        self.lock()
            .responses
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back(Scripted { result, delay });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A poisoned lock in a test fake is unrecoverable anyway.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    async fn take(
        &self,
        method: &'static str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let scripted = {
            let mut state = self.lock();
            state.sent.push(SentRequest {
                method,
                path: path.to_string(),
                body: body.cloned(),
            });
            state
                .responses
                .get_mut(&(method.to_string(), path.to_string()))
                .and_then(VecDeque::pop_front)
        };

        match scripted {
            Some(Scripted { result, delay }) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Err(ApiError::Network(format!(
                "no scripted response for {method} {path}"
            ))),
        }
    }
}

#[async_trait::async_trait]
impl RawApiPort for ScriptedApi {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        self.take("GET", path, None).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.take("POST", path, Some(body)).await
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.take("PUT", path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.take("DELETE", path, None).await.map(|_| ())
    }
}
