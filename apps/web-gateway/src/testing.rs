//! Test doubles for handler tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use sylva_core::ApiError;
use sylva_core::ports::{ApiRequest, HttpTransport, RawResponse};

use crate::config::GatewayConfig;
use crate::state::{AppState, Backends};

/// Answers by request path; unknown paths fail like an unreachable host.
#[derive(Clone, Default)]
pub struct StubTransport {
    routes: Arc<Mutex<HashMap<String, RawResponse>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, path: &str, status: u16, body: Value) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), RawResponse::json(status, &body));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_to(&self, path: &str) -> Option<ApiRequest> {
        self.requests().into_iter().find(|r| r.path == path)
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let response = self.routes.lock().unwrap().get(&request.path).cloned();
        self.requests.lock().unwrap().push(request);
        response.ok_or_else(|| ApiError::Transport("connection refused".to_string()))
    }
}

pub struct TestState {
    content: StubTransport,
    plant_bible: StubTransport,
    garden: StubTransport,
    auth: StubTransport,
    config: GatewayConfig,
}

pub fn test_state() -> TestState {
    TestState {
        content: StubTransport::new(),
        plant_bible: StubTransport::new(),
        garden: StubTransport::new(),
        auth: StubTransport::new(),
        config: GatewayConfig::default(),
    }
}

impl TestState {
    pub fn content(mut self, stub: StubTransport) -> Self {
        self.content = stub;
        self
    }

    pub fn plant_bible(mut self, stub: StubTransport) -> Self {
        self.plant_bible = stub;
        self
    }

    pub fn garden(mut self, stub: StubTransport) -> Self {
        self.garden = stub;
        self
    }

    pub fn auth(mut self, stub: StubTransport) -> Self {
        self.auth = stub;
        self
    }

    pub fn build(self) -> AppState {
        let backends = Backends {
            content: Arc::new(self.content),
            plant_bible: Arc::new(self.plant_bible),
            garden: Arc::new(self.garden),
            auth: Arc::new(self.auth),
        };
        AppState::with_backends(backends, &self.config)
    }
}
