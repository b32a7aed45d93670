//! Unified error type for the gigdeck application.

use std::path::PathBuf;

use thiserror::Error;

use super::category::ErrorCategory;
use crate::api::FetchError;
use crate::traits::HttpError;

/// Startup, terminal and logging failures.
///
/// Fetch errors inside a pagination session stay plain [`FetchError`]s on the
/// coordinator and are classified with [`fetch_category`].
#[derive(Debug, Error)]
pub enum GigdeckError {
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Logging already initialized: {message}")]
    Logging { message: String },

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Failed to start async runtime: {source}")]
    Runtime {
        #[source]
        source: std::io::Error,
    },
}

impl GigdeckError {
    pub fn config(message: impl Into<String>) -> Self {
        GigdeckError::Config {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GigdeckError::Config { .. } => ErrorCategory::Configuration,
            GigdeckError::LogFile { .. }
            | GigdeckError::Logging { .. }
            | GigdeckError::Terminal(_)
            | GigdeckError::Runtime { .. } => ErrorCategory::System,
        }
    }

    /// Message shown on stderr when startup fails.
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.category().description(), self)
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            GigdeckError::Config { .. } => {
                "Check the command-line flags and the DICE_API_BASE_URL environment variable"
            }
            other => other.category().recovery_hint(),
        }
    }
}

/// Classify a fetch error.
pub fn fetch_category(err: &FetchError) -> ErrorCategory {
    match err {
        FetchError::MissingApiKey => ErrorCategory::Configuration,
        FetchError::Api { status, .. } if *status >= 500 => ErrorCategory::Server,
        FetchError::Api { status: 401 | 403, .. } => ErrorCategory::Configuration,
        FetchError::Api { .. } | FetchError::Decode(_) => ErrorCategory::Client,
        FetchError::Transport(HttpError::InvalidUrl(_)) => ErrorCategory::Configuration,
        FetchError::Transport(_) => ErrorCategory::Network,
    }
}
