//! Scripted in-memory transport for tests.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::error::TransportError;

/// Replays queued responses in order and records every request.
///
/// With nothing queued, `send` fails with a network error.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a raw body.
    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        lock(&self.responses).push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    /// Queue a response with a JSON body.
    pub fn respond_json<B: Serialize>(&self, status: u16, body: &B) -> &Self {
        let body = serde_json::to_string(body).unwrap_or_default();
        self.respond(status, body)
    }

    /// Queue a transport failure.
    pub fn fail(&self, error: TransportError) -> &Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        lock(&self.requests).last().cloned()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        lock(&self.requests).push(request);
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".into())))
    }
}
