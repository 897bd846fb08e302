//! Tracing subscriber setup.
//!
//! The terminal owns stdout and stderr while the TUI runs, so events go to
//! a plain-text log file under the user cache directory. The filter comes
//! from `HOTNEWS_LOG` (same syntax as `RUST_LOG`), defaulting to `info`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "HOTNEWS_LOG";
const DEFAULT_LEVEL: &str = "info";

/// `<cache dir>/hotnews/hotnews.log`, if a cache dir exists on this platform.
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("hotnews").join("hotnews.log"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global subscriber writing to [`log_file_path`].
///
/// Returns the path written to. Fails if the file cannot be opened or a
/// subscriber is already installed; callers may carry on without logs.
pub fn init() -> AppResult<PathBuf> {
    let path = log_file_path()
        .ok_or_else(|| AppError::Logging("no cache directory on this platform".to_string()))?;
    init_at(path)
}

/// Same as [`init`] with an explicit file.
pub fn init_at(path: PathBuf) -> AppResult<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::Logging(format!("{}: {}", parent.display(), e)))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| AppError::Logging(format!("{}: {}", path.display(), e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    tracing::info!(path = %path.display(), version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(path)
}
