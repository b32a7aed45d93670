//! Application state and logic for the TUI.
//!
//! The [`App`] owns the [`PaginationCoordinator`] and is the only place that
//! turns its [`FetchTicket`]s into network calls. Each ticket is run on a
//! spawned task; the outcome comes back as an [`AppMessage`] on an unbounded
//! channel and is applied on the UI task, so coordinator state is only ever
//! touched from one place.

mod handlers;
mod messages;
mod navigation;
mod types;

pub use messages::AppMessage;
pub use navigation::Direction;
pub use types::{Focus, SearchInput};

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::api::EventsClient;
use crate::config::AppConfig;
use crate::models::Event;
use crate::pagination::{CoordinatorOptions, FetchTicket, PaginationCoordinator, Resolution};
use crate::traits::HttpClient;

/// Main application state
pub struct App {
    pub client: EventsClient,
    pub pagination: PaginationCoordinator,
    pub search: SearchInput,
    pub focus: Focus,
    /// Index of the selected card in the accumulated events
    pub selected: usize,
    /// Ids of cards whose "More Info" section is open
    pub expanded: HashSet<String>,
    /// Cards per grid row, updated by the renderer
    pub grid_columns: usize,
    /// First visible grid row, updated by the renderer
    pub scroll_row: usize,
    pub should_quit: bool,
    /// Set whenever state changes; cleared after a draw
    pub needs_redraw: bool,
    pub tick_count: u64,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
}

impl App {
    pub fn new(client: EventsClient, options: CoordinatorOptions) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            client,
            pagination: PaginationCoordinator::new(options),
            search: SearchInput::new(),
            focus: Focus::default(),
            selected: 0,
            expanded: HashSet::new(),
            grid_columns: 1,
            scroll_row: 0,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            message_tx,
            message_rx: Some(message_rx),
        }
    }

    /// Build the app from configuration, pre-filling the search bar with the
    /// configured initial venue.
    pub fn from_config(http: Arc<dyn HttpClient>, config: &AppConfig) -> Self {
        let client = EventsClient::from_config(http, config);
        let mut app = Self::new(client, CoordinatorOptions::from_config(config));
        if let Some(venue) = config.initial_venue.as_deref() {
            app.search = SearchInput::with_value(venue);
        }
        app
    }

    /// Submit the pre-filled search, if any. Must run inside a tokio runtime.
    pub fn start(&mut self) {
        if !self.client.has_api_key() {
            tracing::warn!("No API key configured; event searches will fail");
        }
        if self.search.submitted_venue().is_some() {
            self.submit_search();
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Accumulated events for the current venue.
    pub fn events(&self) -> Arc<[Event]> {
        self.pagination.events()
    }

    pub fn selected_event(&self) -> Option<Event> {
        self.events().get(self.selected).cloned()
    }

    pub fn is_expanded(&self, event: &Event) -> bool {
        self.expanded.contains(&event.id)
    }

    /// Run the search bar contents as the new venue query.
    ///
    /// A blank search returns to the idle state.
    pub fn submit_search(&mut self) {
        let venue = self.search.submitted_venue().map(str::to_string);
        let changed = self.pagination.venue() != venue.as_deref();

        let ticket = self.pagination.set_venue(venue.as_deref());
        if changed || ticket.is_some() {
            self.selected = 0;
            self.scroll_row = 0;
            self.expanded.clear();
        }
        if let Some(ticket) = ticket {
            tracing::info!(venue = venue.as_deref().unwrap_or(""), "Searching venue");
            self.focus = Focus::Grid;
            self.dispatch(ticket);
        }
        self.mark_dirty();
    }

    /// Request the next page if the coordinator allows it.
    pub fn load_more(&mut self) {
        if let Some(ticket) = self.pagination.fetch_next_page() {
            self.dispatch(ticket);
            self.mark_dirty();
        }
    }

    pub fn dismiss_load_more_error(&mut self) {
        self.pagination.dismiss_load_more_error();
        self.mark_dirty();
    }

    /// Open or close the selected card's details. Cards without details ignore this.
    pub fn toggle_details(&mut self) {
        let Some(event) = self.selected_event() else {
            return;
        };
        if !event.has_details() {
            return;
        }
        if !self.expanded.remove(&event.id) {
            self.expanded.insert(event.id);
        }
        self.mark_dirty();
    }

    /// The terminal regained focus.
    pub fn on_focus_gained(&mut self) {
        if let Some(ticket) = self.pagination.on_focus(Instant::now()) {
            self.dispatch(ticket);
            self.mark_dirty();
        }
    }

    /// Periodic tick from the event loop.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if let Some(ticket) = self.pagination.poll(Instant::now()) {
            self.dispatch(ticket);
        }
        if self.pagination.is_loading()
            || self.pagination.is_fetching_more()
            || self.pagination.is_refreshing()
        {
            // Spinner and refresh marker animation
            self.mark_dirty();
        }
    }

    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::PageLoaded { token, result } => {
                let resolution = self.pagination.resolve(token, result, Instant::now());
                if resolution != Resolution::Stale {
                    self.clamp_selection();
                    self.mark_dirty();
                }
            }
        }
    }

    /// Run `ticket` on a spawned task and report back through the channel.
    fn dispatch(&self, ticket: FetchTicket) {
        let client = self.client.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_events(&ticket.params()).await;
            let _ = tx.send(AppMessage::PageLoaded {
                token: ticket.token,
                result,
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::pagination::Phase;
    use crate::traits::Response;
    use serde_json::json;

    const BASE: &str = "https://api.test/v2";

    fn page_json(prefix: &str, n: usize) -> serde_json::Value {
        let data: Vec<_> = (0..n)
            .map(|i| json!({"id": format!("{}-{}", prefix, i), "name": format!("Gig {}", i)}))
            .collect();
        json!({ "data": data })
    }

    fn app_with(mock: &MockHttpClient, page_size: u32) -> App {
        let config = AppConfig::default()
            .with_api_key("key")
            .with_base_url(BASE)
            .with_page_size(page_size);
        App::from_config(Arc::new(mock.clone()), &config)
    }

    async fn pump(app: &mut App) {
        let msg = app
            .message_rx
            .as_mut()
            .unwrap()
            .recv()
            .await
            .expect("channel open");
        app.handle_message(msg);
    }

    #[tokio::test]
    async fn test_search_loads_first_page() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::json_body(
            200,
            &page_json("a", 2),
        )));
        let mut app = app_with(&mock, 12);
        app.search = SearchInput::with_value(" Test Venue ");

        app.submit_search();
        assert_eq!(app.pagination.phase(), Phase::Loading);
        assert_eq!(app.focus, Focus::Grid);

        pump(&mut app).await;
        assert_eq!(app.pagination.phase(), Phase::Ready);
        assert_eq!(app.events().len(), 2);
        assert_eq!(app.pagination.venue(), Some("Test Venue"));

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.contains("filter%5Bvenues%5D%5B%5D=Test%20Venue"));
    }

    #[tokio::test]
    async fn test_load_more_appends() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &format!("{}/events?page%5Bsize%5D=2&page%5Bnumber%5D=1", BASE),
            MockResponse::Success(Response::json_body(200, &page_json("p1", 2))),
        );
        mock.set_response(
            &format!("{}/events?page%5Bsize%5D=2&page%5Bnumber%5D=2", BASE),
            MockResponse::Success(Response::json_body(200, &page_json("p2", 1))),
        );
        let mut app = app_with(&mock, 2);
        app.search = SearchInput::with_value("Venue");
        app.submit_search();
        pump(&mut app).await;
        assert!(app.pagination.has_more());

        app.load_more();
        assert!(app.pagination.is_fetching_more());
        // A second press while in flight does nothing
        app.load_more();
        pump(&mut app).await;

        let ids: Vec<_> = app.events().iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec!["p1-0", "p1-1", "p2-0"]);
        assert!(!app.pagination.has_more());
        assert_eq!(mock.get_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_key_shows_failure() {
        let mock = MockHttpClient::new();
        let config = AppConfig::default().with_base_url(BASE);
        let mut app = App::from_config(Arc::new(mock.clone()), &config);
        app.search = SearchInput::with_value("Venue");
        app.submit_search();
        pump(&mut app).await;

        assert_eq!(app.pagination.phase(), Phase::Failed);
        assert!(app.pagination.error().unwrap().is_configuration());
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_blank_search_goes_idle() {
        let mock = MockHttpClient::new();
        let mut app = app_with(&mock, 12);
        app.search = SearchInput::with_value("   ");
        app.submit_search();
        assert_eq!(app.pagination.phase(), Phase::Idle);
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_venue_change_resets_selection() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::json_body(
            200,
            &page_json("a", 5),
        )));
        let mut app = app_with(&mock, 12);
        app.search = SearchInput::with_value("One");
        app.submit_search();
        pump(&mut app).await;
        app.selected = 3;

        app.search = SearchInput::with_value("Two");
        app.submit_search();
        assert_eq!(app.selected, 0);
        assert!(app.events().is_empty());
    }

    #[tokio::test]
    async fn test_initial_venue_from_config() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::json_body(
            200,
            &page_json("a", 1),
        )));
        let config = AppConfig::default()
            .with_api_key("key")
            .with_base_url(BASE)
            .with_initial_venue("Koko");
        let mut app = App::from_config(Arc::new(mock.clone()), &config);
        assert_eq!(app.search.value(), "Koko");

        app.start();
        pump(&mut app).await;
        assert_eq!(app.events().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_details_requires_details() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::json_body(
            200,
            &json!({"data": [
                {"id": "plain", "name": "Plain"},
                {"id": "rich", "name": "Rich", "description": "Doors at 7"}
            ]}),
        )));
        let mut app = app_with(&mock, 12);
        app.search = SearchInput::with_value("Venue");
        app.submit_search();
        pump(&mut app).await;

        app.toggle_details();
        assert!(app.expanded.is_empty());

        app.selected = 1;
        app.toggle_details();
        assert!(app.expanded.contains("rich"));
        app.toggle_details();
        assert!(app.expanded.is_empty());
    }
}
