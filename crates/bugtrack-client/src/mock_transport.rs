//! Scripted transport for tests and offline demos
//!
//! Replies are registered per `(method, url)` pair. Every request is recorded
//! in a history so callers can assert on how many round trips happened.
//! A [`MockGate`] can hold replies back, which lets a test observe state
//! while a request is still in flight.

use crate::error::ApiError;
use crate::request::{ApiRequest, HttpMethod};
use crate::transport::Transport;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Canned reply for one route
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Answer with a status code and body; non-2xx becomes [`ApiError`]
    Json { status: u16, body: Value },
    /// Fail before any status is received
    NetworkError(String),
}

#[derive(Debug, Default)]
struct MockState {
    routes: HashMap<(HttpMethod, String), MockReply>,
    history: Vec<ApiRequest>,
}

/// Transport answering from a table of canned replies
///
/// Cloning shares the route table, history and gate.
#[derive(Debug, Clone)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
    gate: watch::Receiver<bool>,
    gate_tx: Arc<watch::Sender<bool>>,
    requests_tx: Arc<watch::Sender<usize>>,
}

/// Holds mock replies until released
///
/// Requests that arrive while the gate is closed are recorded immediately
/// but only answered after [`MockGate::release`].
#[derive(Debug)]
pub struct MockGate {
    gate_tx: Arc<watch::Sender<bool>>,
}

impl MockGate {
    /// Let every held and future request through
    pub fn release(self) {
        self.gate_tx.send_replace(true);
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        let (gate_tx, gate) = watch::channel(true);
        let (requests_tx, _) = watch::channel(0);
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
            gate,
            gate_tx: Arc::new(gate_tx),
            requests_tx: Arc::new(requests_tx),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a reply for `method url`, replacing any previous one
    pub fn on(&self, method: HttpMethod, url: impl Into<String>, reply: MockReply) -> &Self {
        self.lock().routes.insert((method, url.into()), reply);
        self
    }

    /// Shorthand for a JSON reply
    pub fn reply(
        &self,
        method: HttpMethod,
        url: impl Into<String>,
        status: u16,
        body: Value,
    ) -> &Self {
        self.on(method, url, MockReply::Json { status, body })
    }

    /// Close the gate: replies wait until the returned guard is released
    pub fn hold(&self) -> MockGate {
        self.gate_tx.send_replace(false);
        MockGate {
            gate_tx: Arc::clone(&self.gate_tx),
        }
    }

    /// All requests received so far, in arrival order
    pub fn history(&self) -> Vec<ApiRequest> {
        self.lock().history.clone()
    }

    /// Number of requests received with the given method
    pub fn count(&self, method: HttpMethod) -> usize {
        self.lock()
            .history
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    /// Wait until at least `n` requests have been received
    pub async fn wait_for_requests(&self, n: usize) {
        let mut rx = self.requests_tx.subscribe();
        // The sender lives as long as self, so this cannot fail
        let _ = rx.wait_for(|count| *count >= n).await;
    }

    fn record(&self, request: &ApiRequest) -> Option<MockReply> {
        let mut state = self.lock();
        state.history.push(request.clone());
        let count = state.history.len();
        let reply = state
            .routes
            .get(&(request.method, request.url.clone()))
            .cloned();
        drop(state);
        self.requests_tx.send_replace(count);
        reply
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let reply = self.record(request);

        let mut gate = self.gate.clone();
        let _ = gate.wait_for(|open| *open).await;

        match reply {
            Some(MockReply::Json { status, body }) if (200..300).contains(&status) => Ok(body),
            Some(MockReply::Json { status, .. }) => Err(ApiError::from_status_code(status)),
            Some(MockReply::NetworkError(message)) => Err(ApiError::network(message)),
            None => {
                log::debug!("MockTransport: no reply for {} {}", request.method, request.url);
                Err(ApiError::from_status_code(404))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiErrorKind;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_reply_success_returns_body() {
        let mock = MockTransport::new();
        mock.reply(HttpMethod::Post, "/bugs", 200, json!({ "id": 1 }));

        let body = mock
            .request(&ApiRequest::post("/bugs", json!({})))
            .await
            .unwrap();
        assert_eq!(body, json!({ "id": 1 }));
    }

    #[tokio::test]
    async fn test_non_2xx_is_status_error() {
        let mock = MockTransport::new();
        mock.reply(HttpMethod::Patch, "/bugs/1", 500, Value::Null);

        let error = mock
            .request(&ApiRequest::patch("/bugs/1", json!({ "resolved": true })))
            .await
            .unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::Status);
        assert_eq!(error.status, Some(500));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let mock = MockTransport::new();
        let error = mock.request(&ApiRequest::get("/nope")).await.unwrap_err();
        assert_eq!(error.status, Some(404));
    }

    #[tokio::test]
    async fn test_network_error_reply() {
        let mock = MockTransport::new();
        mock.on(
            HttpMethod::Get,
            "/bugs",
            MockReply::NetworkError("connection reset".into()),
        );
        let error = mock.request(&ApiRequest::get("/bugs")).await.unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::Network);
        assert_eq!(error.message, "connection reset");
    }

    #[tokio::test]
    async fn test_history_counts_by_method() {
        let mock = MockTransport::new();
        mock.reply(HttpMethod::Get, "/bugs", 200, json!([]));

        mock.request(&ApiRequest::get("/bugs")).await.unwrap();
        mock.request(&ApiRequest::get("/bugs")).await.unwrap();
        let _ = mock.request(&ApiRequest::delete("/bugs/1")).await;

        assert_eq!(mock.count(HttpMethod::Get), 2);
        assert_eq!(mock.count(HttpMethod::Delete), 1);
        assert_eq!(mock.history().len(), 3);
    }

    #[tokio::test]
    async fn test_gate_holds_reply_until_released() {
        let mock = MockTransport::new();
        mock.reply(HttpMethod::Get, "/bugs", 200, json!([{ "id": 1 }]));
        let gate = mock.hold();

        let pending = tokio::spawn({
            let mock = mock.clone();
            async move { mock.request(&ApiRequest::get("/bugs")).await }
        });

        mock.wait_for_requests(1).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!pending.is_finished());

        gate.release();
        let body = pending.await.unwrap().unwrap();
        assert_eq!(body, json!([{ "id": 1 }]));
    }
}
