//! Unified error types for the API console.

use std::time::Duration;

use strum::Display;
use thiserror::Error;

/// Process-level error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration values failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Console operation error.
    #[error("console error: {0}")]
    Console(#[from] ConsoleError),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while building an endpoint registry.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// A registry needs at least one endpoint to have a default selection.
    #[error("endpoint registry is empty")]
    Empty,

    /// Two definitions share the same key.
    #[error("duplicate endpoint key: {0}")]
    DuplicateKey(String),
}

/// Errors from console controller operations that never reach the network.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConsoleError {
    /// The requested endpoint key is not registered.
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// The selected endpoint has no parameter with this name.
    #[error("endpoint {endpoint} has no parameter named {name}")]
    UnknownParameter {
        /// Selected endpoint key.
        endpoint: String,
        /// Parameter name that was requested.
        name: String,
    },

    /// The selected endpoint does not take a request body.
    #[error("endpoint {0} does not accept a request body")]
    BodyNotAccepted(String),

    /// A send is already in flight for this console.
    #[error("a request is already in flight")]
    RequestInFlight,

    /// There is no successful response to export.
    #[error("no response to export")]
    NothingToExport,
}

/// Failures of a single send, rendered into the response area.
#[derive(Error, Debug)]
pub enum SendError {
    /// A required parameter was left empty.
    #[error("Parameter \"{name}\" is required")]
    MissingParameter {
        /// Name of the missing parameter.
        name: String,
    },

    /// The outgoing body text is not valid JSON.
    #[error("Invalid JSON in request body: {0}")]
    InvalidRequestBody(#[source] serde_json::Error),

    /// The transport failed before a response arrived.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {reason}")]
    HttpStatus {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase, possibly empty.
        reason: String,
    },

    /// The response body is not valid JSON.
    #[error("Invalid JSON response: {0}")]
    InvalidResponseJson(#[source] serde_json::Error),
}

/// Coarse classification of [`SendError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SendErrorKind {
    /// Reported before any network call.
    Validation,
    /// Outgoing body rejected before sending.
    RequestBody,
    /// Network failure, timeout or non-OK status.
    Transport,
    /// Response body could not be decoded.
    ResponseDecode,
}

impl SendError {
    /// Classify this error.
    pub fn kind(&self) -> SendErrorKind {
        match self {
            SendError::MissingParameter { .. } => SendErrorKind::Validation,
            SendError::InvalidRequestBody(_) => SendErrorKind::RequestBody,
            SendError::Transport(_) | SendError::HttpStatus { .. } => SendErrorKind::Transport,
            SendError::InvalidResponseJson(_) => SendErrorKind::ResponseDecode,
        }
    }

    /// Message shown in the response area.
    ///
    /// Errors raised after dispatch are prefixed with `Request failed:`.
    pub fn user_message(&self) -> String {
        match self.kind() {
            SendErrorKind::Validation | SendErrorKind::RequestBody => self.to_string(),
            SendErrorKind::Transport | SendErrorKind::ResponseDecode => {
                format!("Request failed: {self}")
            }
        }
    }
}

/// Transport-level failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No response within the allowed time.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Connection refused, DNS failure, reset, etc.
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Network(err.to_string())
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
