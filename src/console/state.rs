//! Application state driven by the console controller.

use serde_json::Value;
use strum::Display;

use crate::error::ConsoleError;

use super::form::RenderedForm;

/// Text shown before the first send.
pub const RESPONSE_PLACEHOLDER: &str = "Click \"Send Request\" to see the response";

/// Text shown while a request is in flight.
pub const RESPONSE_LOADING: &str = "Loading...";

/// Send control state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Default)]
pub enum TriggerState {
    /// Enabled.
    #[default]
    #[strum(serialize = "Send Request")]
    Ready,
    /// Disabled while a request is outstanding.
    #[strum(serialize = "Sending...")]
    Sending,
}

/// Content of the response area.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResponseView {
    /// Nothing sent yet for this selection.
    #[default]
    Placeholder,
    /// Waiting for the response.
    Loading,
    /// Decoded response.
    Success {
        /// Parsed response body.
        value: Value,
        /// Pretty-printed body as displayed.
        pretty: String,
    },
    /// Inline error panel.
    Error {
        /// Human-readable message.
        message: String,
    },
}

/// Status badge next to the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusIndicator {
    /// Cleared.
    #[default]
    None,
    /// Numeric status of a successful send.
    Http(u16),
    /// Last send failed.
    Error,
}

impl std::fmt::Display for StatusIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusIndicator::None => Ok(()),
            StatusIndicator::Http(code) => write!(f, "Status: {}", code),
            StatusIndicator::Error => f.write_str("Error"),
        }
    }
}

/// Everything the console displays.
///
/// Exactly one endpoint is selected at any time and `form` always belongs
/// to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleState {
    pub(crate) form: RenderedForm,
    pub(crate) trigger: TriggerState,
    pub(crate) response: ResponseView,
    pub(crate) status: StatusIndicator,
    pub(crate) elapsed_ms: Option<u64>,
}

impl ConsoleState {
    pub(crate) fn new(form: RenderedForm) -> Self {
        Self {
            form,
            trigger: TriggerState::Ready,
            response: ResponseView::Placeholder,
            status: StatusIndicator::None,
            elapsed_ms: None,
        }
    }

    /// Key of the selected endpoint.
    pub fn selected(&self) -> &str {
        &self.form.endpoint_key
    }

    /// Form of the selected endpoint.
    pub fn form(&self) -> &RenderedForm {
        &self.form
    }

    /// Send control state.
    pub fn trigger(&self) -> TriggerState {
        self.trigger
    }

    /// Response area content.
    pub fn response(&self) -> &ResponseView {
        &self.response
    }

    /// Status badge.
    pub fn status(&self) -> StatusIndicator {
        self.status
    }

    /// Round-trip time of the last successful send.
    pub fn elapsed_ms(&self) -> Option<u64> {
        self.elapsed_ms
    }

    /// Parsed body of the last successful send.
    pub fn last_response(&self) -> Option<&Value> {
        match &self.response {
            ResponseView::Success { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Set a parameter field of the selected endpoint.
    pub fn set_param(&mut self, name: &str, value: impl Into<String>) -> Result<(), ConsoleError> {
        let endpoint = self.form.endpoint_key.clone();
        let field = self
            .form
            .field_mut(name)
            .ok_or_else(|| ConsoleError::UnknownParameter {
                endpoint,
                name: name.to_string(),
            })?;
        field.value = value.into();
        Ok(())
    }

    /// Replace the body editor text.
    pub fn set_body(&mut self, text: impl Into<String>) -> Result<(), ConsoleError> {
        match self.form.body.as_mut() {
            Some(body) => {
                *body = text.into();
                Ok(())
            }
            None => Err(ConsoleError::BodyNotAccepted(self.form.endpoint_key.clone())),
        }
    }

    pub(crate) fn reset_response(&mut self) {
        self.response = ResponseView::Placeholder;
        self.status = StatusIndicator::None;
        self.elapsed_ms = None;
    }

    pub(crate) fn show_success(&mut self, status: u16, elapsed_ms: u64, value: Value) {
        let pretty = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
        self.response = ResponseView::Success { value, pretty };
        self.status = StatusIndicator::Http(status);
        self.elapsed_ms = Some(elapsed_ms);
    }

    pub(crate) fn show_error(&mut self, message: String) {
        self.response = ResponseView::Error { message };
        self.status = StatusIndicator::Error;
        self.elapsed_ms = None;
    }
}
