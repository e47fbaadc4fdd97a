//! Results panel keyboard handlers

use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rust_i18n::t;

const PAGE_ROWS: usize = 10;

impl App {
    /// Results panel navigation
    pub(crate) fn handle_results(&mut self, key: KeyEvent) {
        let Some((rows, cols)) = self
            .result_view()
            .map(|v| (v.table.row_count(), v.table.columns.len()))
        else {
            return;
        };
        let last_row = rows.saturating_sub(1);

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.results_selected = self.results_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.results_selected < last_row {
                    self.results_selected += 1;
                }
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.results_selected = (self.results_selected + PAGE_ROWS).min(last_row);
            }
            KeyCode::PageDown => {
                self.results_selected = (self.results_selected + PAGE_ROWS).min(last_row);
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.results_selected = self.results_selected.saturating_sub(PAGE_ROWS);
            }
            KeyCode::PageUp => {
                self.results_selected = self.results_selected.saturating_sub(PAGE_ROWS);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if self.results_col_selected > 0 {
                    self.results_col_selected -= 1;
                }
                if self.results_col_selected < self.results_col_scroll {
                    self.results_col_scroll = self.results_col_selected;
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.results_col_selected + 1 < cols {
                    self.results_col_selected += 1;
                }
                let visible = self.results_cols_visible.max(1);
                if self.results_col_selected >= self.results_col_scroll + visible {
                    self.results_col_scroll = self.results_col_selected + 1 - visible;
                }
            }
            KeyCode::Home => {
                self.results_selected = 0;
                self.results_col_selected = 0;
                self.results_col_scroll = 0;
            }
            KeyCode::End => {
                self.results_selected = last_row;
            }
            // Copy cell
            KeyCode::Char('y') | KeyCode::Enter => {
                self.copy_current_cell();
            }
            _ => {}
        }
    }

    /// Copy current cell to clipboard
    pub(crate) fn copy_current_cell(&mut self) {
        let Some(text) = self
            .result_view()
            .and_then(|v| v.table.cell_text(self.results_selected, self.results_col_selected))
        else {
            return;
        };

        match arboard::Clipboard::new().and_then(|mut c| c.set_text(text.clone())) {
            Ok(()) => self.message = Some(t!("copied", text = text).to_string()),
            Err(e) => self.error = Some(t!("clipboard_failed", error = e.to_string()).to_string()),
        }
    }
}
