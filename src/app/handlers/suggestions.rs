//! Suggestion list keyboard handlers

use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

impl App {
    /// Suggestions panel handler
    pub(crate) fn handle_suggestions(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.suggestion_selected = self.suggestion_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.suggestion_selected + 1 < self.suggestions.len() {
                    self.suggestion_selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.apply_suggestion(self.suggestion_selected);
            }
            _ => {}
        }
    }
}
