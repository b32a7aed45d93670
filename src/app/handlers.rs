//! Terminal input handling.
//!
//! Global keys:
//! - `Ctrl+C` quits
//! - `Tab` switches focus between the search bar and the grid
//!
//! Search bar: line editing (`Ctrl+W` deletes a word, `Ctrl+U` the line),
//! `Enter` submits, `Esc` clears.
//!
//! Grid: arrows or `hjkl` move, `Enter`/`i` toggles details, `m` loads more,
//! `/` focuses search, `Esc` dismisses a load-more error, `q` quits.

use crossterm::event::{
    Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use tui_input::InputRequest;

use super::{App, Direction, Focus};

/// Map a key press in the search bar to a line edit.
fn search_request(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let request = match key.code {
        KeyCode::Char('a') if ctrl => InputRequest::GoToStart,
        KeyCode::Char('e') if ctrl => InputRequest::GoToEnd,
        KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
        KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => InputRequest::InsertChar(c),
        KeyCode::Backspace if ctrl || alt => InputRequest::DeletePrevWord,
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left if ctrl || alt => InputRequest::GoToPrevWord,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right if ctrl || alt => InputRequest::GoToNextWord,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return None,
    };
    Some(request)
}

impl App {
    /// Route one terminal event.
    pub fn handle_terminal_event(&mut self, event: TermEvent) {
        match event {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key),
            TermEvent::Mouse(mouse) => self.handle_mouse_event(mouse),
            TermEvent::FocusGained => {
                tracing::debug!("Terminal focus gained");
                self.on_focus_gained();
            }
            TermEvent::Resize(_, _) => self.mark_dirty(),
            _ => {}
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }
        if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
            self.focus = self.focus.toggle();
            self.mark_dirty();
            return;
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::Grid => self.handle_grid_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_search(),
            KeyCode::Esc => {
                self.search.clear();
                self.mark_dirty();
            }
            KeyCode::Down => {
                self.focus = Focus::Grid;
                self.mark_dirty();
            }
            _ => {
                if let Some(request) = search_request(key) {
                    if self.search.handle(request) {
                        self.mark_dirty();
                    }
                }
            }
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_selection(Direction::Left),
            KeyCode::Right | KeyCode::Char('l') => self.move_selection(Direction::Right),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(Direction::Down),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            KeyCode::Enter | KeyCode::Char('i') => self.toggle_details(),
            KeyCode::Char('m') => self.load_more(),
            KeyCode::Esc => self.dismiss_load_more_error(),
            KeyCode::Char('/') => {
                self.focus = Focus::Search;
                self.mark_dirty();
            }
            KeyCode::Char('q') => self.quit(),
            _ => {}
        }
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.move_selection(Direction::Down),
            MouseEventKind::ScrollUp => self.move_selection(Direction::Up),
            _ => {}
        }
    }
}
