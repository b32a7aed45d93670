//! Color theme constants for the gigdeck UI

use ratatui::style::Color;

/// Card and panel borders
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Focused input border and the selected card
pub const COLOR_ACCENT: Color = Color::Cyan;

/// Headings
pub const COLOR_HEADER: Color = Color::White;

/// Secondary text
pub const COLOR_DIM: Color = Color::DarkGray;

pub const COLOR_FEATURED: Color = Color::Yellow;

/// "On sale" badge and GET REMINDED action
pub const COLOR_ON_SALE: Color = Color::Magenta;

/// BOOK NOW action and prices
pub const COLOR_BOOK: Color = Color::Rgb(4, 181, 117);

pub const COLOR_ERROR: Color = Color::Red;

/// Spinner frames for loading indicators
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner frame for a tick count
pub fn spinner(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize / 4) % SPINNER_FRAMES.len()]
}
