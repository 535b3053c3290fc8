//! Metrics for request latency, failures and connectivity checks.
//!
//! Only the `metrics` facade is used; with no recorder installed every call
//! is a no-op.

use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

use crate::error::SendErrorKind;

// === Metric Name Constants ===

/// Requests dispatched counter metric name.
pub const METRIC_REQUESTS_SENT: &str = "console_requests_sent_total";
/// Request failures counter metric name.
pub const METRIC_REQUEST_ERRORS: &str = "console_request_errors_total";
/// Request round-trip latency metric name.
pub const METRIC_REQUEST_LATENCY: &str = "console_request_latency_ms";
/// Health checks counter metric name.
pub const METRIC_HEALTH_CHECKS: &str = "console_health_checks_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_REQUESTS_SENT, "Total number of requests dispatched");
    describe_counter!(
        METRIC_REQUEST_ERRORS,
        "Total number of failed sends, labelled by kind"
    );
    describe_histogram!(
        METRIC_REQUEST_LATENCY,
        "Request round-trip latency in milliseconds"
    );
    describe_counter!(
        METRIC_HEALTH_CHECKS,
        "Total number of health checks, labelled by result"
    );

    debug!("Metrics initialized");
}

/// Increment requests dispatched counter.
pub fn inc_requests_sent() {
    counter!(METRIC_REQUESTS_SENT).increment(1);
}

/// Increment request failures counter.
pub fn inc_request_errors(kind: SendErrorKind) {
    counter!(METRIC_REQUEST_ERRORS, "kind" => kind.to_string()).increment(1);
}

/// Record request round-trip latency.
pub fn record_request_latency(elapsed: Duration) {
    histogram!(METRIC_REQUEST_LATENCY).record(elapsed.as_secs_f64() * 1000.0);
}

/// Increment health checks counter.
pub fn inc_health_checks(result: &'static str) {
    counter!(METRIC_HEALTH_CHECKS, "result" => result).increment(1);
}
