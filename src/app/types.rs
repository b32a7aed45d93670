//! Type definitions for the application state.
//!
//! - [`Focus`] - Which UI component receives key presses
//! - [`SearchInput`] - Single-line venue search buffer

use tui_input::{Input, InputRequest};

/// Represents which UI component has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    Grid,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Search => Focus::Grid,
            Focus::Grid => Focus::Search,
        }
    }
}

/// Venue search field backed by [`tui_input::Input`].
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    input: Input,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input pre-filled with `value`, cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            input: Input::new(value.into()),
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    /// Cursor column in terminal cells.
    pub fn visual_cursor(&self) -> usize {
        self.input.visual_cursor()
    }

    /// Horizontal scroll needed to keep the cursor inside `width` cells.
    pub fn visual_scroll(&self, width: usize) -> usize {
        self.input.visual_scroll(width)
    }

    pub fn is_empty(&self) -> bool {
        self.input.value().is_empty()
    }

    /// Trimmed value, `None` when blank.
    pub fn submitted_venue(&self) -> Option<&str> {
        Some(self.input.value().trim()).filter(|v| !v.is_empty())
    }

    /// Apply one edit. Returns true when the value or cursor changed.
    pub fn handle(&mut self, request: InputRequest) -> bool {
        self.input.handle(request).is_some()
    }

    pub fn clear(&mut self) {
        self.input.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_toggle() {
        assert_eq!(Focus::default(), Focus::Search);
        assert_eq!(Focus::Search.toggle(), Focus::Grid);
        assert_eq!(Focus::Grid.toggle(), Focus::Search);
    }

    fn type_text(input: &mut SearchInput, text: &str) {
        for c in text.chars() {
            input.handle(InputRequest::InsertChar(c));
        }
    }

    #[test]
    fn test_insert_mid_value() {
        let mut input = SearchInput::new();
        type_text(&mut input, "Roundhuse");
        for _ in 0..3 {
            input.handle(InputRequest::GoToPrevChar);
        }
        input.handle(InputRequest::InsertChar('o'));
        assert_eq!(input.value(), "Roundhouse");

        input.handle(InputRequest::GoToEnd);
        input.handle(InputRequest::DeletePrevChar);
        assert_eq!(input.value(), "Roundhous");
        assert_eq!(input.cursor(), 9);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = SearchInput::with_value("Café");
        assert_eq!(input.cursor(), 4);
        input.handle(InputRequest::DeletePrevChar);
        assert_eq!(input.value(), "Caf");
        input.handle(InputRequest::GoToStart);
        input.handle(InputRequest::DeleteNextChar);
        assert_eq!(input.value(), "af");
    }

    #[test]
    fn test_edits_at_bounds_report_no_change() {
        let mut input = SearchInput::with_value("ab");
        assert!(!input.handle(InputRequest::GoToNextChar));
        input.handle(InputRequest::GoToStart);
        assert!(!input.handle(InputRequest::DeletePrevChar));
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn test_clear() {
        let mut input = SearchInput::with_value("Koko");
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_submitted_venue_is_trimmed() {
        assert_eq!(SearchInput::with_value("  Koko ").submitted_venue(), Some("Koko"));
        assert_eq!(SearchInput::with_value("   ").submitted_venue(), None);
        assert_eq!(SearchInput::new().submitted_venue(), None);
    }
}
