//! Application configuration.
//!
//! Values come from the environment first and can then be overridden by
//! command-line flags (see [`crate::cli::Cli::apply`]).

use std::time::Duration;

use crate::api::{API_BASE_URL, API_KEY_ENV, DEFAULT_PAGE_SIZE};
use crate::error::{GigdeckError, GigdeckResult};

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "DICE_API_BASE_URL";

pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(30);
pub const DEFAULT_REFETCH_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Runtime configuration for the events client and the pagination session.
///
/// # Example
///
/// ```
/// use gigdeck::config::AppConfig;
/// use std::time::Duration;
///
/// let config = AppConfig::default()
///     .with_page_size(24)
///     .with_stale_time(Duration::from_secs(10));
/// assert_eq!(config.page_size, 24);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// API key sent as `x-api-key`; absence fails every fetch
    pub api_key: Option<String>,
    pub base_url: String,
    /// Events per page (at least 1)
    pub page_size: u32,
    /// How long a loaded session counts as fresh
    pub stale_time: Duration,
    /// Period of the background refresh check
    pub refetch_interval: Duration,
    pub request_timeout: Duration,
    /// Venue searched immediately on startup
    pub initial_venue: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("stale_time", &self.stale_time)
            .field("refetch_interval", &self.refetch_interval)
            .field("request_timeout", &self.request_timeout)
            .field("initial_venue", &self.initial_venue)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            stale_time: DEFAULT_STALE_TIME,
            refetch_interval: DEFAULT_REFETCH_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            initial_venue: None,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `DICE_API_KEY` and `DICE_API_BASE_URL`.
    ///
    /// Empty values are treated as unset.
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        config.api_key = read(API_KEY_ENV);
        if let Some(url) = read(BASE_URL_ENV) {
            config.base_url = url;
        }
        config
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the page size. Zero is raised to 1.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    pub fn with_refetch_interval(mut self, interval: Duration) -> Self {
        self.refetch_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_initial_venue(mut self, venue: impl Into<String>) -> Self {
        self.initial_venue = Some(venue.into());
        self
    }

    /// Check settings that would otherwise only fail on the first request.
    ///
    /// The base URL must be an absolute http(s) URL without a query string.
    pub fn validate(&self) -> GigdeckResult<()> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            GigdeckError::config(format!("base URL \"{}\" is not a valid URL: {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GigdeckError::config(format!(
                "base URL \"{}\" must use http or https",
                self.base_url
            )));
        }
        if url.query().is_some() {
            return Err(GigdeckError::config(format!(
                "base URL \"{}\" must not carry a query string",
                self.base_url
            )));
        }
        if self.page_size == 0 {
            return Err(GigdeckError::config("page size must be at least 1"));
        }
        Ok(())
    }
}
