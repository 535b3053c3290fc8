//! Plain-text rendering of the console for the terminal.

use std::fmt::Write as _;

use crate::health::HealthSnapshot;
use crate::registry::{EndpointRegistry, InputKind};

use super::state::{ConsoleState, ResponseView, RESPONSE_LOADING, RESPONSE_PLACEHOLDER};

/// Endpoint list with the selected entry marked active.
pub fn render_endpoint_list(registry: &EndpointRegistry, selected: &str) -> String {
    let mut out = String::new();
    for endpoint in registry.iter() {
        let marker = if endpoint.key == selected { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {:<16} {:<6} {}",
            marker, endpoint.key, endpoint.method, endpoint.path
        );
    }
    out
}

/// Method, URL, parameter fields, body editor and send control.
pub fn render_form(state: &ConsoleState) -> String {
    let form = state.form();
    let mut out = String::new();

    let _ = writeln!(out, "[{}] {}", form.method, form.url);

    if form.params_visible() {
        let _ = writeln!(out, "Parameters:");
        for field in &form.fields {
            let shown = if field.value.is_empty() {
                format!("<{}>", field.placeholder)
            } else {
                field.value.clone()
            };
            match field.input {
                InputKind::SingleLine => {
                    let _ = writeln!(out, "  {} {}", field.label, shown);
                }
                InputKind::MultiLine => {
                    let _ = writeln!(out, "  {}", field.label);
                    for line in shown.lines() {
                        let _ = writeln!(out, "    | {}", line);
                    }
                }
            }
        }
    }

    if let Some(body) = &form.body {
        let _ = writeln!(out, "Body:");
        for line in body.lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }

    let _ = writeln!(out, "[{}]", state.trigger());
    out
}

/// Status badge, elapsed time and response area.
pub fn render_response(state: &ConsoleState) -> String {
    let mut out = String::new();

    let status = state.status().to_string();
    match (status.is_empty(), state.elapsed_ms()) {
        (false, Some(ms)) => {
            let _ = writeln!(out, "{}  {}ms", status, ms);
        }
        (false, None) => {
            let _ = writeln!(out, "{}", status);
        }
        _ => {}
    }

    match state.response() {
        ResponseView::Placeholder => {
            let _ = writeln!(out, "{}", RESPONSE_PLACEHOLDER);
        }
        ResponseView::Loading => {
            let _ = writeln!(out, "{}", RESPONSE_LOADING);
        }
        ResponseView::Success { pretty, .. } => {
            let _ = writeln!(out, "{}", pretty);
        }
        ResponseView::Error { message } => {
            let _ = writeln!(out, "Error: {}", message);
        }
    }

    out
}

/// One-line connectivity indicator.
pub fn render_connectivity(snapshot: &HealthSnapshot) -> String {
    let dot = if snapshot.connectivity.is_online() { '●' } else { '○' };
    format!("{} {}", dot, snapshot.connectivity)
}
