//! Error handling for gigdeck.
//!
//! - [`ErrorCategory`] classifies failures for retry and messaging decisions
//! - [`GigdeckError`] unifies application-level failures
//! - [`GigdeckResult`] is the matching result alias
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, DNS, timeout | Yes |
//! | Server | Events API 5xx | Yes |
//! | Client | Events API 4xx, bad payload | No |
//! | Configuration | Missing API key, bad base URL | No |
//! | System | Terminal, log file, runtime | No |

mod category;
mod gigdeck_error;

pub use category::ErrorCategory;
pub use gigdeck_error::{fetch_category, GigdeckError};

/// Result alias using [`GigdeckError`].
pub type GigdeckResult<T> = Result<T, GigdeckError>;
