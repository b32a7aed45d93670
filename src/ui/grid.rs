//! Event grid with header, load-more footer and details panel.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::card::{render_card, render_details, CARD_HEIGHT, CARD_WIDTH};
use super::theme::{spinner, COLOR_ACCENT, COLOR_DIM, COLOR_ERROR, COLOR_HEADER};
use crate::app::App;
use crate::models::Event;

/// Details panel width when shown beside the grid
const DETAILS_WIDTH: u16 = 44;

/// "Upcoming events at <venue>" from the first event, if it names a venue.
pub fn grid_header(events: &[Event]) -> Option<String> {
    events
        .first()
        .and_then(|e| e.venue.as_deref())
        .map(|venue| format!("Upcoming events at {}", venue))
}

/// Footer line: "Load More", "Loading..." while fetching, nothing when done.
pub fn load_more_label(app: &App) -> Option<String> {
    if !app.pagination.has_more() {
        return None;
    }
    if app.pagination.is_fetching_more() {
        Some(format!("{} Loading...", spinner(app.tick_count)))
    } else {
        Some("[ Load More ]  (m)".to_string())
    }
}

pub fn render_grid(frame: &mut Frame, area: Rect, app: &mut App, now: DateTime<Utc>) {
    let events = app.events();

    let [header_area, body_area, footer_area, error_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(CARD_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let mut header = Vec::new();
    if let Some(title) = grid_header(&events) {
        header.push(Span::styled(
            title,
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ));
    }
    if app.pagination.is_refreshing() {
        header.push(Span::styled("  ↻", Style::default().fg(COLOR_DIM)));
    }
    frame.render_widget(Line::from(header), header_area);

    let selected = events.get(app.selected);
    let details = selected.filter(|e| app.is_expanded(e));

    let grid_area = match details {
        Some(event) if body_area.width >= CARD_WIDTH + DETAILS_WIDTH => {
            let [grid, panel] =
                Layout::horizontal([Constraint::Min(CARD_WIDTH), Constraint::Length(DETAILS_WIDTH)])
                    .areas(body_area);
            render_details(frame, panel, event);
            grid
        }
        Some(event) => {
            let [grid, panel] =
                Layout::vertical([Constraint::Length(CARD_HEIGHT), Constraint::Min(0)])
                    .areas(body_area);
            render_details(frame, panel, event);
            grid
        }
        None => body_area,
    };

    let columns = (grid_area.width / CARD_WIDTH).max(1);
    let visible_rows = (grid_area.height / CARD_HEIGHT).max(1) as usize;
    app.grid_columns = columns as usize;
    app.ensure_selection_visible(visible_rows);

    let card_width = grid_area.width / columns;
    let first = app.scroll_row * app.grid_columns;
    let last = (first + visible_rows * app.grid_columns).min(events.len());

    for (offset, event) in events[first.min(last)..last].iter().enumerate() {
        let row = (offset / app.grid_columns) as u16;
        let col = (offset % app.grid_columns) as u16;
        let card_area = Rect::new(
            grid_area.x + col * card_width,
            grid_area.y + row * CARD_HEIGHT,
            card_width,
            CARD_HEIGHT.min(grid_area.height.saturating_sub(row * CARD_HEIGHT)),
        );
        let index = first + offset;
        render_card(
            frame,
            card_area,
            event,
            index == app.selected,
            app.is_expanded(event),
            now,
        );
    }

    if let Some(label) = load_more_label(app) {
        frame.render_widget(
            Paragraph::new(Line::styled(label, Style::default().fg(COLOR_ACCENT)))
                .alignment(Alignment::Center),
            footer_area,
        );
    }

    if let Some(err) = app.pagination.load_more_error() {
        frame.render_widget(
            Line::styled(
                format!("Couldn't load more events: {}  (Esc to dismiss)", err),
                Style::default().fg(COLOR_ERROR),
            ),
            error_area,
        );
    }
}
