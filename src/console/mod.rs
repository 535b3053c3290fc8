//! Console controller module.
//!
//! This module handles:
//! - Console state (selection, form values, trigger, response area)
//! - Form generation from endpoint definitions
//! - Request validation, dispatch and response rendering
//! - Interactive command parsing, text views and the session loop

pub mod command;
pub mod controller;
pub mod form;
pub mod session;
pub mod state;
pub mod view;

pub use command::{parse_command, Command};
pub use controller::{ConsoleController, SendOutcome};
pub use form::{FormField, RenderedForm};
pub use session::Session;
pub use state::{ConsoleState, ResponseView, StatusIndicator, TriggerState};
