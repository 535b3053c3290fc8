//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Backend ===
    /// Base address every registered path is appended to.
    #[serde(default = "default_api_base")]
    pub console_api_base: String,

    // === Connectivity Poller ===
    /// Seconds between health checks.
    #[serde(default = "default_health_interval")]
    pub console_health_interval_secs: u64,

    /// Seconds before a health check counts as offline.
    #[serde(default = "default_health_timeout")]
    pub console_health_timeout_secs: u64,

    // === Requests ===
    /// Seconds before a sent request fails with a timeout.
    #[serde(default = "default_request_timeout")]
    pub console_request_timeout_secs: u64,

    // === Export ===
    /// Directory for exported responses when no path is given.
    #[serde(default = "default_export_dir")]
    pub console_export_dir: PathBuf,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_api_base() -> String {
    "http://localhost:8000".to_string()
}

fn default_health_interval() -> u64 {
    10
}

fn default_health_timeout() -> u64 {
    3
}

fn default_request_timeout() -> u64 {
    30
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            console_api_base: default_api_base(),
            console_health_interval_secs: default_health_interval(),
            console_health_timeout_secs: default_health_timeout(),
            console_request_timeout_secs: default_request_timeout(),
            console_export_dir: default_export_dir(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        self.api_base()?;

        if self.console_health_interval_secs == 0 {
            return Err("CONSOLE_HEALTH_INTERVAL_SECS must be greater than 0".to_string());
        }

        if self.console_health_timeout_secs == 0 {
            return Err("CONSOLE_HEALTH_TIMEOUT_SECS must be greater than 0".to_string());
        }

        if self.console_request_timeout_secs == 0 {
            return Err("CONSOLE_REQUEST_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Parsed base address.
    pub fn api_base(&self) -> Result<Url, String> {
        let url = Url::parse(&self.console_api_base)
            .map_err(|e| format!("CONSOLE_API_BASE is not a valid URL: {}", e))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(format!("CONSOLE_API_BASE must use http or https, got {}", other)),
        }
    }

    /// Delay between the end of one health check and the start of the next.
    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.console_health_interval_secs)
    }

    /// Upper bound for a single health check.
    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.console_health_timeout_secs)
    }

    /// Upper bound for a request sent from the console.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.console_request_timeout_secs)
    }
}
