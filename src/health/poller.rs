//! Recurring connectivity poller.

use std::time::Duration;

use time::OffsetDateTime;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use url::Url;

use crate::config::Config;
use crate::transport::Transport;

use super::check::{check_health, Connectivity};

/// Poll timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Delay between a result and the next check.
    pub interval: Duration,
    /// Upper bound for one check.
    pub timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            timeout: Duration::from_secs(3),
        }
    }
}

impl PollSettings {
    /// Settings from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.health_interval(),
            timeout: config.health_timeout(),
        }
    }
}

/// Latest poller result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HealthSnapshot {
    /// Result of the last completed check.
    pub connectivity: Connectivity,
    /// Number of completed checks.
    pub checks_completed: u64,
    /// Wall-clock time of the last completed check.
    pub last_checked: Option<OffsetDateTime>,
    /// When the single pending check is due.
    pub next_check_due: Option<Instant>,
}

/// Handle to the background poll task.
///
/// Dropping the handle cancels the task.
#[derive(Debug)]
pub struct ConnectivityPoller {
    task: JoinHandle<()>,
    updates: watch::Receiver<HealthSnapshot>,
}

impl ConnectivityPoller {
    /// Check `health_url` now and then every `settings.interval`.
    pub fn spawn<T>(transport: T, health_url: Url, settings: PollSettings) -> Self
    where
        T: Transport + 'static,
    {
        let (tx, updates) = watch::channel(HealthSnapshot::default());
        let task = tokio::spawn(run(transport, health_url, settings, tx));

        Self { task, updates }
    }

    /// Receiver notified after every completed check.
    pub fn subscribe(&self) -> watch::Receiver<HealthSnapshot> {
        self.updates.clone()
    }

    /// Latest snapshot.
    pub fn snapshot(&self) -> HealthSnapshot {
        self.updates.borrow().clone()
    }

    /// Whether the poll task is still alive.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop polling.
    pub fn shutdown(self) {
        // Drop aborts the task.
    }
}

impl Drop for ConnectivityPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T: Transport>(
    transport: T,
    health_url: Url,
    settings: PollSettings,
    tx: watch::Sender<HealthSnapshot>,
) {
    loop {
        let connectivity = check_health(&transport, &health_url, settings.timeout).await;
        let next_due = Instant::now() + settings.interval;

        let mut previous = Connectivity::Unknown;
        tx.send_modify(|snapshot| {
            previous = snapshot.connectivity;
            snapshot.connectivity = connectivity;
            snapshot.checks_completed += 1;
            snapshot.last_checked = Some(OffsetDateTime::now_utc());
            snapshot.next_check_due = Some(next_due);
        });

        if previous != connectivity {
            info!(status = %connectivity, "Connectivity changed");
        } else {
            debug!(status = %connectivity, "Connectivity unchanged");
        }

        tokio::time::sleep_until(next_due).await;
    }
}
