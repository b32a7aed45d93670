//! Banner rendering for the non-grid states: idle, loading, failed, empty.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::theme::{spinner, COLOR_DIM, COLOR_ERROR};
use crate::api::FetchError;
use crate::error::{fetch_category, ErrorCategory};

pub const IDLE_MESSAGE: &str = "Enter a venue name to search for events";
pub const LOADING_MESSAGE: &str = "Loading events...";
pub const ERROR_TITLE: &str = "Error loading events";
pub const ERROR_SUGGESTION: &str = "Try searching for a different venue";
pub const RETRY_HINT: &str = "Press / then Enter to retry";

pub fn empty_message(venue: &str) -> String {
    format!("No events found for \"{}\"", venue)
}

/// Render `text` centered vertically in `area`.
fn render_centered(frame: &mut Frame, area: Rect, text: Text<'static>) {
    let height = (text.lines.len() as u16).min(area.height);
    let y_offset = area.height.saturating_sub(height) / 2;
    let centered = Rect::new(area.x, area.y + y_offset, area.width, height);

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered);
}

/// Plain informational message (idle and empty results)
pub fn render_message(frame: &mut Frame, area: Rect, message: String) {
    render_centered(
        frame,
        area,
        Text::from(Line::styled(message, Style::default().fg(COLOR_DIM))),
    );
}

pub fn render_loading(frame: &mut Frame, area: Rect, tick: u64) {
    render_centered(
        frame,
        area,
        Text::from(Line::raw(format!("{} {}", spinner(tick), LOADING_MESSAGE))),
    );
}

/// Failed initial load: title, the error message, then a suggestion.
pub fn render_error(frame: &mut Frame, area: Rect, error: &FetchError, venue: Option<&str>) {
    let mut lines = vec![
        Line::styled(
            ERROR_TITLE,
            Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(error.to_string()),
    ];

    let category = fetch_category(error);
    if category == ErrorCategory::Configuration {
        lines.push(Line::styled(
            category.recovery_hint(),
            Style::default().fg(COLOR_DIM),
        ));
    } else if category.is_retryable() {
        lines.push(Line::styled(RETRY_HINT, Style::default().fg(COLOR_DIM)));
    }
    if venue.is_some() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(ERROR_SUGGESTION, Style::default().fg(COLOR_DIM)));
    }

    render_centered(frame, area, Text::from(lines));
}
