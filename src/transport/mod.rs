//! HTTP transport seam.
//!
//! This module handles:
//! - Outgoing request and raw response types
//! - The [`Transport`] trait the console and poller are generic over
//! - The reqwest-backed client
//! - A scripted mock for tests

pub mod client;
pub mod mock;

use std::future::Future;
use std::sync::Arc;

use url::Url;

use crate::error::TransportError;
use crate::registry::HttpMethod;

pub use client::HttpTransport;
pub use mock::{MockReply, MockTransport};

/// Content type attached to JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A fully built request, ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Target URL including the query string.
    pub url: Url,
    /// Compact JSON body, if any.
    pub body: Option<String>,
}

impl OutgoingRequest {
    /// A body-less GET.
    pub fn get(url: Url) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            body: None,
        }
    }

    /// Content type header value, set only when a JSON body is attached.
    pub fn content_type(&self) -> Option<&'static str> {
        self.body.as_ref().map(|_| JSON_CONTENT_TYPE)
    }

    /// Query pairs in order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

/// Status line and full body text of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Numeric status code.
    pub status: u16,
    /// Canonical reason phrase.
    pub reason: String,
    /// Body as text.
    pub body: String,
}

impl RawResponse {
    /// A response with the canonical reason for `status`.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string();

        Self {
            status,
            reason,
            body: body.into(),
        }
    }

    /// A response whose body is `value` serialized as JSON.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can dispatch an [`OutgoingRequest`].
pub trait Transport: Send + Sync {
    /// Send the request and read the whole response body.
    fn execute(
        &self,
        request: OutgoingRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn execute(
        &self,
        request: OutgoingRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        (**self).execute(request)
    }
}

/// `base` with `path` appended to its path; any query on `base` is dropped.
pub fn endpoint_url(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let joined = format!("{}{}", base.path().trim_end_matches('/'), path);
    url.set_path(&joined);
    url.set_query(None);
    url
}
