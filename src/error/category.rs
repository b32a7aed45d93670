//! Error category classification.
//!
//! Categories drive what the UI suggests to the user and whether a failed
//! request is worth trying again.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS or timeout failures. Transient.
    Network,

    /// The events API answered with a 5xx. Transient.
    Server,

    /// The events API rejected the request (4xx) or sent an unreadable body.
    Client,

    /// Missing or invalid settings, such as the API key.
    Configuration,

    /// Terminal, filesystem or other OS failures.
    System,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::System => "system",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network connectivity issue",
            ErrorCategory::Server => "Events service issue",
            ErrorCategory::Client => "Request rejected",
            ErrorCategory::Configuration => "Configuration problem",
            ErrorCategory::System => "System error",
        }
    }

    /// Suggested recovery action for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Server => {
                "The events service may be experiencing issues. Please try again later"
            }
            ErrorCategory::Client => "Try searching for a different venue",
            ErrorCategory::Configuration => "Set DICE_API_KEY and restart gigdeck",
            ErrorCategory::System => "Check file permissions and your terminal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
