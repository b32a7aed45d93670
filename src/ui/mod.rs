//! UI rendering for gigdeck
//!
//! Layout, top to bottom:
//! - Venue search bar
//! - Body: a state banner, or the event grid with its load-more footer
//! - Key help line

mod card;
mod grid;
mod search_bar;
mod states;
pub mod theme;

pub use card::{card_lines, details_lines, CARD_HEIGHT, CARD_WIDTH};
pub use grid::{grid_header, load_more_label};
pub use states::{empty_message, ERROR_SUGGESTION, ERROR_TITLE, IDLE_MESSAGE, LOADING_MESSAGE};

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    Frame,
};

use crate::app::{App, Focus};
use crate::pagination::Phase;
use theme::COLOR_DIM;

/// Render the whole screen.
pub fn render(frame: &mut Frame, app: &mut App) {
    let [search_area, body_area, help_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    search_bar::render_search_bar(frame, search_area, app);
    render_body(frame, body_area, app);
    render_help(frame, help_area, app);
}

fn render_body(frame: &mut Frame, area: Rect, app: &mut App) {
    let venue = app.pagination.venue().map(str::to_string);

    match app.pagination.phase() {
        Phase::Idle => states::render_message(frame, area, IDLE_MESSAGE.to_string()),
        Phase::Loading => states::render_loading(frame, area, app.tick_count),
        Phase::Failed => match app.pagination.error() {
            Some(error) => states::render_error(frame, area, error, venue.as_deref()),
            None => states::render_message(frame, area, ERROR_TITLE.to_string()),
        },
        Phase::Ready | Phase::FetchingMore if app.events().is_empty() => {
            states::render_message(frame, area, empty_message(venue.as_deref().unwrap_or("")))
        }
        Phase::Ready | Phase::FetchingMore => grid::render_grid(frame, area, app, Utc::now()),
    }
}

fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let help = match app.focus {
        Focus::Search => "Enter search · Tab grid · Esc clear · Ctrl+C quit",
        Focus::Grid => "←↑↓→ move · Enter details · m load more · / search · q quit",
    };
    frame.render_widget(Line::styled(help, Style::default().fg(COLOR_DIM)), area);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::adapters::mock::MockHttpClient;
    use crate::api::FetchError;
    use crate::config::AppConfig;
    use crate::models::{Event, EventsPage};
    use crate::traits::HttpError;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::sync::Arc;
    use std::time::Instant;

    pub(crate) fn buffer_lines(buffer: &Buffer) -> Vec<String> {
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn create_test_app(page_size: u32) -> App {
        let config = AppConfig::default().with_page_size(page_size);
        App::from_config(Arc::new(MockHttpClient::new()), &config)
    }

    fn events(n: usize) -> Vec<Event> {
        (0..n)
            .map(|i| {
                let mut e = Event::new(i.to_string(), format!("Gig {}", i));
                e.venue = Some("Roundhouse".to_string());
                e
            })
            .collect()
    }

    fn draw(app: &mut App) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        buffer_lines(terminal.backend().buffer())
    }

    fn contains(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|l| l.contains(needle))
    }

    #[test]
    fn test_idle_screen() {
        let mut app = create_test_app(12);
        let lines = draw(&mut app);
        assert!(contains(&lines, IDLE_MESSAGE));
        assert!(contains(&lines, "Venue"));
    }

    #[test]
    fn test_loading_screen() {
        let mut app = create_test_app(12);
        app.pagination.set_venue(Some("Roundhouse")).unwrap();
        assert!(contains(&draw(&mut app), LOADING_MESSAGE));
    }

    #[test]
    fn test_failed_screen() {
        let mut app = create_test_app(12);
        let ticket = app.pagination.set_venue(Some("Roundhouse")).unwrap();
        app.pagination.resolve(
            ticket.token,
            Err(FetchError::Transport(HttpError::ConnectionFailed("refused".into()))),
            Instant::now(),
        );
        let lines = draw(&mut app);
        assert!(contains(&lines, ERROR_TITLE));
        assert!(contains(&lines, "refused"));
        assert!(contains(&lines, ERROR_SUGGESTION));
    }

    #[test]
    fn test_empty_results_screen() {
        let mut app = create_test_app(12);
        let ticket = app.pagination.set_venue(Some("Nowhere")).unwrap();
        app.pagination
            .resolve(ticket.token, Ok(EventsPage::from_events(vec![])), Instant::now());
        assert!(contains(&draw(&mut app), "No events found for \"Nowhere\""));
    }

    #[test]
    fn test_grid_with_load_more() {
        let mut app = create_test_app(3);
        let ticket = app.pagination.set_venue(Some("Roundhouse")).unwrap();
        app.pagination
            .resolve(ticket.token, Ok(EventsPage::from_events(events(3))), Instant::now());

        let lines = draw(&mut app);
        assert!(contains(&lines, "Upcoming events at Roundhouse"));
        assert!(contains(&lines, "Gig 0"));
        assert!(contains(&lines, "Gig 2"));
        assert!(contains(&lines, "Load More"));
        assert_eq!(app.grid_columns, (100 / CARD_WIDTH) as usize);

        app.pagination.fetch_next_page().unwrap();
        let lines = draw(&mut app);
        assert!(contains(&lines, "Loading..."));
        assert!(!contains(&lines, "Load More"));
    }

    #[test]
    fn test_load_more_hidden_on_last_page() {
        let mut app = create_test_app(12);
        let ticket = app.pagination.set_venue(Some("Roundhouse")).unwrap();
        app.pagination
            .resolve(ticket.token, Ok(EventsPage::from_events(events(2))), Instant::now());
        let lines = draw(&mut app);
        assert!(!contains(&lines, "Load More"));
        assert!(!contains(&lines, "Loading..."));
    }

    #[test]
    fn test_load_more_error_line() {
        let mut app = create_test_app(2);
        let ticket = app.pagination.set_venue(Some("Roundhouse")).unwrap();
        let now = Instant::now();
        app.pagination
            .resolve(ticket.token, Ok(EventsPage::from_events(events(2))), now);
        let more = app.pagination.fetch_next_page().unwrap();
        app.pagination.resolve(
            more.token,
            Err(FetchError::Transport(HttpError::Timeout("15s".into()))),
            now,
        );

        let lines = draw(&mut app);
        assert!(contains(&lines, "Gig 1"));
        assert!(contains(&lines, "Couldn't load more events"));
        assert!(contains(&lines, "Load More"));
    }

    #[test]
    fn test_expanded_card_shows_details_panel() {
        let mut app = create_test_app(12);
        let ticket = app.pagination.set_venue(Some("Roundhouse")).unwrap();
        let mut evs = events(1);
        evs[0].description = Some("Doors at seven".to_string());
        app.pagination
            .resolve(ticket.token, Ok(EventsPage::from_events(evs)), Instant::now());
        app.toggle_details();

        let lines = draw(&mut app);
        assert!(contains(&lines, "Doors at seven"));
        assert!(contains(&lines, "Hide details"));
    }
}
