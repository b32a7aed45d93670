//! AppMessage enum for async communication within the application.

use crate::api::FetchError;
use crate::models::EventsPage;
use crate::pagination::RequestToken;

/// Messages received from spawned fetch tasks
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A page request finished, successfully or not
    PageLoaded {
        token: RequestToken,
        result: Result<EventsPage, FetchError>,
    },
}
