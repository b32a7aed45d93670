//! Grid selection movement.

use super::App;

/// Direction of a selection move in the card grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl App {
    /// Move the selection one card or one row.
    ///
    /// Moving down from the second-to-last row onto a partial last row lands
    /// on the last card.
    pub fn move_selection(&mut self, direction: Direction) {
        let len = self.events().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let cols = self.grid_columns.max(1);
        let last = len - 1;

        let next = match direction {
            Direction::Left => self.selected.saturating_sub(1),
            Direction::Right => (self.selected + 1).min(last),
            Direction::Up if self.selected >= cols => self.selected - cols,
            Direction::Up => self.selected,
            Direction::Down => {
                if self.selected + cols <= last {
                    self.selected + cols
                } else if self.selected / cols < last / cols {
                    last
                } else {
                    self.selected
                }
            }
        };

        if next != self.selected {
            self.selected = next;
            self.mark_dirty();
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.mark_dirty();
    }

    pub fn select_last(&mut self) {
        self.selected = self.events().len().saturating_sub(1);
        self.mark_dirty();
    }

    /// Keep the selection inside the accumulated events.
    pub fn clamp_selection(&mut self) {
        let len = self.events().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Adjust `scroll_row` so the selected card's row is among `visible_rows`.
    pub fn ensure_selection_visible(&mut self, visible_rows: usize) {
        let visible_rows = visible_rows.max(1);
        let row = self.selected / self.grid_columns.max(1);
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible_rows {
            self.scroll_row = row + 1 - visible_rows;
        }
    }
}
