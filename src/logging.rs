//! Logging configuration
//!
//! The terminal belongs to the UI, so tracing output goes to a file.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{GigdeckError, GigdeckResult};

pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_FILE_NAME: &str = "gigdeck.log";

/// `<cache dir>/gigdeck/gigdeck.log`, falling back to the temp dir.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("gigdeck")
        .join(LOG_FILE_NAME)
}

/// Build the filter: `RUST_LOG` wins, then `level`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initializes logging to `path` at `level`, appending to an existing file.
pub fn init_logging(path: &Path, level: &str) -> GigdeckResult<()> {
    let file = open_log_file(path)?;

    fmt()
        .with_env_filter(env_filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| GigdeckError::Logging {
            message: e.to_string(),
        })?;

    tracing::info!(path = %path.display(), "Logging initialized");
    Ok(())
}

fn open_log_file(path: &Path) -> GigdeckResult<fs::File> {
    let to_error = |source| GigdeckError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)
}
