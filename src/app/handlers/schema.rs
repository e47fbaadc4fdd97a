//! Schema explorer keyboard handlers

use crate::app::{Action, App};
use crossterm::event::{KeyCode, KeyEvent};

impl App {
    /// Schema explorer handler
    pub(crate) fn handle_schema(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.schema_selected = self.schema_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.console.schema.visible_lines().len().saturating_sub(1);
                if self.schema_selected < max {
                    self.schema_selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(table) = self.console.schema.table_at_line(self.schema_selected) {
                    self.dispatch(Action::ToggleTable(table));
                    // keep the cursor on the header when collapsing from a column line
                    if let Some(line) = self.console.schema.line_of_table(table) {
                        if !self.console.schema.tables()[table].expanded {
                            self.schema_selected = line;
                        }
                    }
                }
            }
            // Database selector
            KeyCode::Right | KeyCode::Char(']') => {
                if let Some(index) = self.console.databases.next_index() {
                    self.schema_selected = 0;
                    self.dispatch(Action::SelectDatabase(index));
                }
            }
            KeyCode::Left | KeyCode::Char('[') => {
                if let Some(index) = self.console.databases.prev_index() {
                    self.schema_selected = 0;
                    self.dispatch(Action::SelectDatabase(index));
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.schema_selected = 0;
                self.dispatch(Action::RefreshSchema);
            }
            _ => {}
        }
    }
}
