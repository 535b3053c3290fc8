//! Single connectivity check against the health endpoint.

use std::time::Duration;

use strum::Display;
use tracing::{debug, instrument};
use url::Url;

use crate::metrics;
use crate::transport::{OutgoingRequest, Transport};

/// Backend reachability as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Default)]
pub enum Connectivity {
    /// No check has completed yet.
    #[default]
    #[strum(serialize = "Checking...")]
    Unknown,
    /// Health endpoint answered with a success status.
    #[strum(serialize = "Server Online")]
    Online,
    /// Health endpoint answered with an error status.
    #[strum(serialize = "Server Error")]
    ServerError,
    /// No answer, or no answer in time.
    #[strum(serialize = "Server Offline")]
    Offline,
}

impl Connectivity {
    /// Whether the backend is reachable and healthy.
    pub fn is_online(&self) -> bool {
        matches!(self, Connectivity::Online)
    }

    /// Short label for metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Connectivity::Unknown => "unknown",
            Connectivity::Online => "online",
            Connectivity::ServerError => "server_error",
            Connectivity::Offline => "offline",
        }
    }
}

/// GET `url` and classify the outcome, giving up after `timeout`.
#[instrument(skip(transport), fields(url = %url))]
pub async fn check_health<T: Transport>(transport: &T, url: &Url, timeout: Duration) -> Connectivity {
    let request = OutgoingRequest::get(url.clone());

    let connectivity = match tokio::time::timeout(timeout, transport.execute(request)).await {
        Ok(Ok(response)) if response.is_success() => Connectivity::Online,
        Ok(Ok(response)) => {
            debug!(status = response.status, "Health check returned error status");
            Connectivity::ServerError
        }
        Ok(Err(err)) => {
            debug!(error = %err, "Health check failed");
            Connectivity::Offline
        }
        Err(_) => {
            debug!(timeout_ms = timeout.as_millis() as u64, "Health check timed out");
            Connectivity::Offline
        }
    };

    metrics::inc_health_checks(connectivity.as_label());
    connectivity
}
