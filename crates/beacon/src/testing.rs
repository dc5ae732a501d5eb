//! In-memory transport for exercising the client without a browser.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::{Value, json};

use crate::api::{ApiRequest, ApiResponse, HttpApiClient, Transport, TransportError};
use crate::config::ClientConfig;
use crate::loading::LoadingTracker;

#[derive(Default)]
struct MockState {
    replies: VecDeque<Result<ApiResponse, TransportError>>,
    requests: Vec<ApiRequest>,
    observed_pending: Vec<usize>,
    tracker: Option<LoadingTracker>,
}

/// Replays queued replies in order and records every request it sees.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Rc<RefCell<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that also records the tracker's pending count at send time.
    pub fn observing(tracker: &LoadingTracker) -> Self {
        let mock = Self::new();
        mock.state.borrow_mut().tracker = Some(tracker.clone());
        mock
    }

    pub fn push_ok(&self, status: u16, body: &str) {
        self.state.borrow_mut().replies.push_back(Ok(ApiResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn push_envelope(&self, data: Value) {
        let body = json!({"code": 0, "message": "", "data": data}).to_string();
        self.push_ok(200, &body);
    }

    pub fn push_business(&self, code: i64, message: &str) {
        let body = json!({"code": code, "message": message}).to_string();
        self.push_ok(200, &body);
    }

    pub fn push_err(&self, err: TransportError) {
        self.state.borrow_mut().replies.push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn observed_pending(&self) -> Vec<usize> {
        self.state.borrow().observed_pending.clone()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut state = self.state.borrow_mut();
        if let Some(pending) = state.tracker.as_ref().map(LoadingTracker::pending) {
            state.observed_pending.push(pending);
        }
        state.requests.push(request);
        state
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no reply queued".into())))
    }
}

pub fn client(mock: &MockTransport) -> HttpApiClient<MockTransport> {
    client_with_tracker(mock, LoadingTracker::new())
}

pub fn client_with_tracker(
    mock: &MockTransport,
    tracker: LoadingTracker,
) -> HttpApiClient<MockTransport> {
    HttpApiClient::with_transport(ClientConfig::default(), tracker, mock.clone())
}
