//! Backend connectivity monitoring.

pub mod check;
pub mod poller;

pub use check::{check_health, Connectivity};
pub use poller::{ConnectivityPoller, HealthSnapshot, PollSettings};
