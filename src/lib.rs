//! Terminal console for the local game catalogue API.
//!
//! Pick one of a fixed set of REST endpoints, fill in its parameters, send
//! the request and read the pretty-printed JSON response, while a background
//! poller reports whether the backend is reachable.
//!
//! ```text
//! > use search
//! [GET] http://localhost:8000/api/games/search
//! Parameters:
//!   title*: <e.g., Minecraft>
//! > set title Minecraft
//! > send
//! Status: 200  14ms
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`registry`]: Endpoint definitions and the built-in catalogue
//! - [`console`]: Console state, form rendering and request execution
//! - [`transport`]: HTTP transport seam, reqwest client and mock
//! - [`health`]: Connectivity check and poller
//! - [`export`]: Saving responses to disk
//! - [`metrics`]: Request and health metrics

pub mod config;
pub mod console;
pub mod error;
pub mod export;
pub mod health;
pub mod metrics;
pub mod registry;
pub mod transport;

pub use config::Config;
pub use error::{AppError, Result};
