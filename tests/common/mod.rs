//! Common test utilities for integration tests.

use gigdeck::adapters::ReqwestHttpClient;
use gigdeck::api::EventsClient;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

pub const TEST_API_KEY: &str = "test-api-key";

/// Events client backed by real reqwest, pointed at `base_url`.
pub fn reqwest_events_client(base_url: &str, api_key: Option<&str>) -> EventsClient {
    let http = Arc::new(ReqwestHttpClient::with_timeout(Duration::from_secs(5)));
    EventsClient::new(http, base_url, api_key.map(String::from))
}

/// A page body with `n` minimal events whose ids start with `prefix`.
pub fn page_body(prefix: &str, n: usize) -> Value {
    let data: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "id": format!("{}-{}", prefix, i),
                "name": format!("{} show {}", prefix, i),
                "date": "2026-03-14T20:00:00Z",
                "venue": "Test Venue"
            })
        })
        .collect();
    json!({ "data": data, "links": {}, "meta": {} })
}
