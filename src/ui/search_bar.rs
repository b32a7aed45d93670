//! Venue search bar.

use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM};
use crate::app::{App, Focus};

const PLACEHOLDER: &str = "Search for a venue...";

pub fn render_search_bar(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Search;
    let border = if focused { COLOR_ACCENT } else { COLOR_BORDER };

    let block = Block::bordered()
        .title(" Venue ")
        .border_style(Style::default().fg(border));

    let inner_width = area.width.saturating_sub(2) as usize;
    let scroll = app.search.visual_scroll(inner_width);

    let paragraph = if app.search.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            PLACEHOLDER,
            Style::default().fg(COLOR_DIM),
        )))
    } else {
        Paragraph::new(app.search.value()).scroll((0, scroll as u16))
    };
    frame.render_widget(paragraph.block(block), area);

    if focused {
        let column = app.search.visual_cursor().saturating_sub(scroll);
        let x = area.x + 1 + column.min(inner_width) as u16;
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}
