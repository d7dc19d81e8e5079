//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use sylva_core::ApiError;
use sylva_core::ports::{ApiRequest, HttpTransport, RawResponse};

/// Answers calls from a queue and records every request it sees.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<RawResponse, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(RawResponse::json(status, &body)));
        self
    }

    pub fn fail(self, cause: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Transport(cause.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request sent")
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())))
    }
}
