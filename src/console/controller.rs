//! Console controller: endpoint selection and request execution.

use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::{ConsoleError, SendError};
use crate::metrics;
use crate::registry::EndpointRegistry;
use crate::transport::{OutgoingRequest, RawResponse, Transport};

use super::form::RenderedForm;
use super::state::{ConsoleState, ResponseView, TriggerState};

/// Drives a [`ConsoleState`] against a registry and a transport.
#[derive(Debug, Clone)]
pub struct ConsoleController<'r, T> {
    registry: &'r EndpointRegistry,
    base: Url,
    transport: T,
}

/// Result of a dispatched request, waiting to be rendered.
#[derive(Debug)]
pub struct SendOutcome {
    result: Result<(u16, Value), SendError>,
    elapsed: Duration,
}

/// Re-enables the trigger when dropped, whatever the exit path.
struct InFlight<'a> {
    state: &'a mut ConsoleState,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.trigger = TriggerState::Ready;
    }
}

impl<'r, T: Transport> ConsoleController<'r, T> {
    /// Create a controller for `base`.
    pub fn new(registry: &'r EndpointRegistry, base: Url, transport: T) -> Self {
        Self {
            registry,
            base,
            transport,
        }
    }

    /// The registry endpoints are selected from.
    pub fn registry(&self) -> &'r EndpointRegistry {
        self.registry
    }

    /// Base address requests are sent to.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// State with the first registry entry selected.
    pub fn initial_state(&self) -> ConsoleState {
        let endpoint = self.registry.default_endpoint();
        ConsoleState::new(RenderedForm::for_endpoint(endpoint, &self.base))
    }

    /// Select `key`, regenerate the form and clear the response area.
    ///
    /// Unknown keys are rejected and leave `state` untouched.
    pub fn select_endpoint(&self, state: &mut ConsoleState, key: &str) -> Result<(), ConsoleError> {
        let endpoint = self.registry.get(key).ok_or_else(|| {
            warn!(key, "Unknown endpoint selected");
            ConsoleError::UnknownEndpoint(key.to_string())
        })?;

        state.form = RenderedForm::for_endpoint(endpoint, &self.base);
        state.reset_response();

        debug!(key, method = %endpoint.method, url = %state.form.url, "Endpoint selected");
        Ok(())
    }

    /// Build the request for the current selection without sending it.
    pub fn prepare_request(&self, state: &ConsoleState) -> Result<OutgoingRequest, SendError> {
        let form = &state.form;
        let mut url = form.url.clone();
        let mut pairs = Vec::new();

        for field in &form.fields {
            if field.required && field.value.is_empty() {
                return Err(SendError::MissingParameter {
                    name: field.name.clone(),
                });
            }

            if !field.value.is_empty() {
                pairs.push((field.name.as_str(), field.value.as_str()));
            }
        }

        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let body = match &form.body {
            Some(text) if !text.trim().is_empty() => {
                let parsed: Value =
                    serde_json::from_str(text).map_err(SendError::InvalidRequestBody)?;
                Some(parsed.to_string())
            }
            _ => None,
        };

        Ok(OutgoingRequest {
            method: form.method,
            url,
            body,
        })
    }

    /// Validate the current form and mark the trigger as sending.
    ///
    /// Returns the request to dispatch, or `None` when validation failed and
    /// the error has already been rendered into `state`. A second call before
    /// [`finish_send`](Self::finish_send) is rejected with
    /// [`ConsoleError::RequestInFlight`].
    pub fn begin_send(
        &self,
        state: &mut ConsoleState,
    ) -> Result<Option<OutgoingRequest>, ConsoleError> {
        if state.trigger == TriggerState::Sending {
            return Err(ConsoleError::RequestInFlight);
        }

        let request = match self.prepare_request(state) {
            Ok(request) => request,
            Err(err) => {
                fail(state, &err);
                return Ok(None);
            }
        };

        state.trigger = TriggerState::Sending;
        state.response = ResponseView::Loading;

        info!(method = %request.method, url = %request.url, "Sending request");
        metrics::inc_requests_sent();

        Ok(Some(request))
    }

    /// Send `request` and decode the reply. Does not touch any state, so
    /// the console can keep serving input while this is pending.
    pub async fn dispatch(&self, request: OutgoingRequest) -> SendOutcome {
        let started = Instant::now();
        let result = self.transport.execute(request).await;
        let elapsed = started.elapsed();
        metrics::record_request_latency(elapsed);

        SendOutcome {
            result: decode_response(result),
            elapsed,
        }
    }

    /// Render `outcome` and re-enable the trigger.
    pub fn finish_send(&self, state: &mut ConsoleState, outcome: SendOutcome) {
        state.trigger = TriggerState::Ready;

        match outcome.result {
            Ok((status, value)) => {
                let elapsed_ms = round_millis(outcome.elapsed);
                info!(status, elapsed_ms, "Response decoded");
                state.show_success(status, elapsed_ms, value);
            }
            Err(err) => fail(state, &err),
        }
    }

    /// Validate, send and render the result of the current selection.
    ///
    /// Every send failure is rendered into `state`; the only error returned
    /// is [`ConsoleError::RequestInFlight`].
    #[instrument(skip(self, state), fields(endpoint = %state.selected()))]
    pub async fn send_request(&self, state: &mut ConsoleState) -> Result<(), ConsoleError> {
        let Some(request) = self.begin_send(state)? else {
            return Ok(());
        };

        let in_flight = InFlight { state };
        let outcome = self.dispatch(request).await;
        self.finish_send(in_flight.state, outcome);

        Ok(())
    }
}

fn fail(state: &mut ConsoleState, err: &SendError) {
    warn!(kind = %err.kind(), error = %err, "Request error");
    metrics::inc_request_errors(err.kind());
    state.show_error(err.user_message());
}

fn decode_response(
    result: Result<RawResponse, crate::error::TransportError>,
) -> Result<(u16, Value), SendError> {
    let response = result?;

    if !response.is_success() {
        return Err(SendError::HttpStatus {
            status: response.status,
            reason: response.reason,
        });
    }

    let value = serde_json::from_str(&response.body).map_err(|e| {
        debug!(body = %response.body, "Response was not JSON");
        SendError::InvalidResponseJson(e)
    })?;

    Ok((response.status, value))
}

/// Whole milliseconds, rounded half up.
pub fn round_millis(elapsed: Duration) -> u64 {
    (elapsed.as_secs_f64() * 1000.0).round() as u64
}
