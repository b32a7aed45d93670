//! Mock implementations for testing.
//!
//! Enables unit testing of the events client and the app without network
//! access.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
