//! Mock transport for unit testing.
//!
//! This module provides a scripted transport that can be used in tests
//! without making real network requests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::TransportError;
use crate::registry::HttpMethod;

use super::{OutgoingRequest, RawResponse, Transport};

/// What the mock answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Return this response.
    Response(RawResponse),
    /// Fail at the transport level.
    Failure(TransportError),
}

impl MockReply {
    /// A JSON response.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockReply::Response(RawResponse::json(status, &value))
    }

    /// A response with a raw text body.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        MockReply::Response(RawResponse::new(status, body))
    }

    /// A connection failure.
    pub fn network_error(message: impl Into<String>) -> Self {
        MockReply::Failure(TransportError::Network(message.into()))
    }
}

/// Scripted transport keyed by method and path.
#[derive(Debug, Clone)]
pub struct MockTransport {
    /// Replies by (method, path).
    routes: Arc<Mutex<HashMap<(HttpMethod, String), MockReply>>>,
    /// Reply for unrouted requests.
    fallback: Arc<Mutex<MockReply>>,
    /// Every request seen, in order.
    requests: Arc<Mutex<Vec<OutgoingRequest>>>,
    /// Simulated latency before replying.
    latency: Duration,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    /// A mock that answers 404 for every request until routes are added.
    pub fn new() -> Self {
        Self {
            routes: Arc::new(Mutex::new(HashMap::new())),
            fallback: Arc::new(Mutex::new(MockReply::json(
                404,
                serde_json::json!({ "error": "Endpoint not found" }),
            ))),
            requests: Arc::new(Mutex::new(Vec::new())),
            latency: Duration::ZERO,
        }
    }

    /// Delay every reply by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Answer `method path` with `reply`.
    pub fn on(&self, method: HttpMethod, path: impl Into<String>, reply: MockReply) {
        lock(&self.routes).insert((method, path.into()), reply);
    }

    /// Answer every unrouted request with `reply`.
    pub fn set_fallback(&self, reply: MockReply) {
        *lock(&self.fallback) = reply;
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<OutgoingRequest> {
        lock(&self.requests).clone()
    }

    /// Number of requests seen so far.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Clear routes and recorded requests.
    pub fn clear(&self) {
        lock(&self.routes).clear();
        lock(&self.requests).clear();
    }

    fn reply_for(&self, request: &OutgoingRequest) -> MockReply {
        let key = (request.method, request.url.path().to_string());
        lock(&self.routes)
            .get(&key)
            .cloned()
            .unwrap_or_else(|| lock(&self.fallback).clone())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    async fn execute(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        let reply = self.reply_for(&request);
        lock(&self.requests).push(request);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match reply {
            MockReply::Response(response) => Ok(response),
            MockReply::Failure(err) => Err(err),
        }
    }
}
