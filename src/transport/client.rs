//! reqwest-backed transport.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument, warn};

use crate::error::TransportError;

use super::{OutgoingRequest, RawResponse, Transport, JSON_CONTENT_TYPE};

/// Transport that talks to a real HTTP server.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Upper bound for one round trip, body included.
    request_timeout: Option<Duration>,
}

impl HttpTransport {
    /// Create a transport with connection reuse enabled and no overall
    /// request timeout.
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            // TCP_NODELAY for low-latency (disable Nagle's algorithm)
            .tcp_nodelay(true)
            // Keep idle connections for 90 seconds
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http,
            request_timeout: None,
        })
    }

    /// Like [`new`](Self::new), but fail requests that take longer than
    /// `timeout` with [`TransportError::Timeout`].
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut transport = Self::new()?;
        transport.request_timeout = Some(timeout);
        Ok(transport)
    }

    async fn round_trip(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self.http.request(request.method.into(), request.url);

        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        debug!(status = status.as_u16(), "Response received");

        let body = response.text().await?;

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, self.round_trip(request))
                .await
                .map_err(|_| {
                    warn!(timeout_ms = limit.as_millis() as u64, "Request timed out");
                    TransportError::Timeout(limit)
                })?,
            None => self.round_trip(request).await,
        }
    }
}
