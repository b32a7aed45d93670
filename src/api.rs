//! Events API client.
//!
//! One call, one page: [`EventsClient::fetch_events`] issues a single GET
//! against `{base_url}/events` with paging parameters and the API key header.
//! The client does not validate the payload beyond JSON decoding.

use std::sync::Arc;

use thiserror::Error;

use crate::config::AppConfig;
use crate::models::EventsPage;
use crate::traits::{Headers, HttpClient, HttpError, Response};

pub const API_BASE_URL: &str = "https://partners-endpoint.dice.fm/api/v2";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "DICE_API_KEY";

pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Errors returned by [`EventsClient::fetch_events`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// No API key configured. Raised before any request is made.
    #[error("Missing {} environment variable", API_KEY_ENV)]
    MissingApiKey,

    /// The server answered with a non-2xx status.
    ///
    /// `body` is the parsed JSON error body, or `Null` when it was not JSON.
    #[error("Dice API error: {status} {status_text} — {body}")]
    Api {
        status: u16,
        status_text: String,
        body: serde_json::Value,
    },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Transport(#[from] HttpError),

    /// A 2xx response whose body is not a page of events.
    #[error("Invalid response from events API: {0}")]
    Decode(String),
}

impl FetchError {
    /// HTTP status, when the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, FetchError::MissingApiKey)
    }
}

/// Parameters for a single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchEventsParams {
    /// Literal venue filter; omitted from the query when `None` or empty
    pub venue: Option<String>,
    pub page_size: u32,
    /// 1-based page number
    pub page: u32,
}

impl Default for FetchEventsParams {
    fn default() -> Self {
        Self {
            venue: None,
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

impl FetchEventsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// Build the request URL for a page of events.
pub fn build_events_url(base_url: &str, params: &FetchEventsParams) -> String {
    let mut pairs = vec![
        ("page[size]", params.page_size.to_string()),
        ("page[number]", params.page.to_string()),
    ];
    if let Some(venue) = params.venue.as_deref().filter(|v| !v.is_empty()) {
        pairs.push(("filter[venues][]", venue.to_string()));
    }

    let query = pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{}/events?{}", base_url.trim_end_matches('/'), query)
}

/// Client for the paginated events endpoint.
#[derive(Clone)]
pub struct EventsClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for EventsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventsClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl EventsClient {
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Build a client from application configuration.
    pub fn from_config(http: Arc<dyn HttpClient>, config: &AppConfig) -> Self {
        Self::new(http, config.base_url.clone(), config.api_key.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Fetch one page of events.
    pub async fn fetch_events(&self, params: &FetchEventsParams) -> Result<EventsPage, FetchError> {
        let api_key = match self.api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => key,
            None => {
                tracing::error!("{} is not set; refusing to call events API", API_KEY_ENV);
                return Err(FetchError::MissingApiKey);
            }
        };

        let url = build_events_url(&self.base_url, params);
        let mut headers = Headers::new();
        headers.insert("x-api-key".to_string(), api_key.to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());

        tracing::debug!(
            venue = params.venue.as_deref().unwrap_or(""),
            page = params.page,
            page_size = params.page_size,
            "Fetching events page"
        );

        let response = self.http.get(&url, &headers).await.map_err(|e| {
            tracing::warn!("Events request failed: {}", e);
            FetchError::from(e)
        })?;

        if !response.is_success() {
            let error = api_error(&response);
            tracing::warn!("{}", error);
            return Err(error);
        }

        response
            .json::<EventsPage>()
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Map a non-2xx response, parsing the body as JSON on a best-effort basis.
fn api_error(response: &Response) -> FetchError {
    let body = response
        .json::<serde_json::Value>()
        .unwrap_or(serde_json::Value::Null);
    FetchError::Api {
        status: response.status,
        status_text: response.status_text().to_string(),
        body,
    }
}
