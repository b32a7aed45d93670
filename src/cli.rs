//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::AppConfig;
use crate::logging::DEFAULT_LOG_LEVEL;

/// Browse upcoming events at a venue from the terminal
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "gigdeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Venue to search for on startup
    #[arg(short, long)]
    pub venue: Option<String>,

    /// Events requested per page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Seconds before loaded results are considered stale
    #[arg(long)]
    pub stale_secs: Option<u64>,

    /// Seconds between background refresh checks
    #[arg(long)]
    pub refresh_secs: Option<u64>,

    /// Events API base URL (overrides DICE_API_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log file path (defaults to the user cache directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl Cli {
    /// Layer the flags that were given over `config`.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(venue) = self.venue.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            config = config.with_initial_venue(venue);
        }
        if let Some(size) = self.page_size {
            config = config.with_page_size(size);
        }
        if let Some(secs) = self.stale_secs {
            config = config.with_stale_time(Duration::from_secs(secs));
        }
        if let Some(secs) = self.refresh_secs {
            config = config.with_refetch_interval(Duration::from_secs(secs));
        }
        if let Some(url) = self.base_url.as_deref() {
            config = config.with_base_url(url);
        }
        config
    }
}
