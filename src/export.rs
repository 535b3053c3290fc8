//! Saving responses to disk.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde_json::Value;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use tracing::info;

use crate::console::ConsoleState;
use crate::error::{AppError, ConsoleError, Result};

static LOCAL_OFFSET: OnceCell<UtcOffset> = OnceCell::new();

/// Look up and remember the local UTC offset, falling back to UTC.
///
/// The lookup fails on some platforms once other threads exist, so call
/// this before starting the runtime.
pub fn capture_local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}

/// Current time in the captured local offset.
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(capture_local_offset())
}

/// `<dir>/exported_logs_<YYYYmmdd_HHMMSS>.json` for `now`, in `now`'s own
/// offset.
pub fn default_export_path(dir: &Path, now: OffsetDateTime) -> PathBuf {
    let stamp = now
        .format(format_description!("[year][month][day]_[hour][minute][second]"))
        .unwrap_or_else(|_| now.unix_timestamp().to_string());
    dir.join(format!("exported_logs_{}.json", stamp))
}

/// Write `value` as pretty JSON to `path`, creating parent directories.
pub fn export_value(value: &Value, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    fs::write(path, text)?;

    match value.get("count").and_then(Value::as_u64) {
        Some(count) => info!(path = %path.display(), count, "Exported logs"),
        None => info!(path = %path.display(), "Exported response"),
    }

    Ok(path.to_path_buf())
}

/// Export the last successful response of `state`.
///
/// Without an explicit `path`, a timestamped file under `dir` is used.
pub fn export_last_response(state: &ConsoleState, path: Option<&Path>, dir: &Path) -> Result<PathBuf> {
    let value = state
        .last_response()
        .ok_or(AppError::Console(ConsoleError::NothingToExport))?;

    let target = match path {
        Some(path) => path.to_path_buf(),
        None => default_export_path(dir, local_now()),
    };

    export_value(value, &target)
}
