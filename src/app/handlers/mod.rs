//! Event handlers for the application

mod query_editor;
mod results;
mod schema;
mod suggestions;

use crate::app::{Action, ActivePanel, App, SPINNER_FRAMES};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use std::time::Duration;

impl App {
    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            // Apply settled backend calls
            self.drain_actions();

            // Advance spinner animation when loading
            if self.is_loading() {
                self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
            }

            terminal.draw(|f| crate::ui::draw(f, self))?;

            // Use shorter poll time while the spinner is animating
            let poll_duration = if self.is_loading() {
                Duration::from_millis(50)
            } else {
                Duration::from_millis(100)
            };

            if event::poll(poll_duration)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key)?;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                    }
                    _ => {}
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Quit shortcuts - always work
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
                return Ok(());
            }
            _ => {}
        }

        // Help toggle
        if key.code == KeyCode::F(1) {
            self.show_help = !self.show_help;
            return Ok(());
        }

        if self.show_help {
            if key.code == KeyCode::Esc {
                self.show_help = false;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => {
                self.active_panel = self.active_panel.next();
                return Ok(());
            }
            KeyCode::Char('e') if ctrl => {
                self.submit();
                return Ok(());
            }
            KeyCode::F(5) => {
                self.dispatch(Action::RefreshSchema);
                return Ok(());
            }
            KeyCode::Char('s') if ctrl => {
                self.export_results_csv();
                return Ok(());
            }
            KeyCode::Char('o') if ctrl => {
                self.export_results_json();
                return Ok(());
            }
            KeyCode::Char('y') if ctrl => {
                self.copy_generated_query();
                return Ok(());
            }
            // Alt+1..9 runs a suggestion from anywhere
            KeyCode::Char(c @ '1'..='9') if key.modifiers.contains(KeyModifiers::ALT) => {
                let index = c as usize - '1' as usize;
                self.apply_suggestion(index);
                return Ok(());
            }
            KeyCode::Esc if self.active_panel != ActivePanel::QueryInput => {
                self.active_panel = ActivePanel::QueryInput;
                return Ok(());
            }
            _ => {}
        }

        // Handle based on active panel
        match self.active_panel {
            ActivePanel::QueryInput => self.handle_query_editor(key),
            ActivePanel::Results => self.handle_results(key),
            ActivePanel::Schema => self.handle_schema(key),
            ActivePanel::Suggestions => self.handle_suggestions(key),
        }

        Ok(())
    }

    /// Handle mouse input (scroll events)
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_up(3),
            MouseEventKind::ScrollDown => self.scroll_down(3),
            _ => {}
        }
    }

    /// Scroll up in the current panel
    pub(crate) fn scroll_up(&mut self, amount: usize) {
        match self.active_panel {
            ActivePanel::Results => {
                self.results_selected = self.results_selected.saturating_sub(amount);
            }
            ActivePanel::Schema => {
                self.schema_selected = self.schema_selected.saturating_sub(amount);
            }
            ActivePanel::Suggestions => {
                self.suggestion_selected = self.suggestion_selected.saturating_sub(amount);
            }
            ActivePanel::QueryInput => {}
        }
    }

    /// Scroll down in the current panel
    pub(crate) fn scroll_down(&mut self, amount: usize) {
        match self.active_panel {
            ActivePanel::Results => {
                let max_rows = self
                    .result_view()
                    .map_or(0, |v| v.table.row_count())
                    .saturating_sub(1);
                self.results_selected = (self.results_selected + amount).min(max_rows);
            }
            ActivePanel::Schema => {
                let max = self.console.schema.visible_lines().len().saturating_sub(1);
                self.schema_selected = (self.schema_selected + amount).min(max);
            }
            ActivePanel::Suggestions => {
                let max = self.suggestions.len().saturating_sub(1);
                self.suggestion_selected = (self.suggestion_selected + amount).min(max);
            }
            ActivePanel::QueryInput => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{ApiError, QueryBackend, QueryOutcome, QueryRequest, SchemaMap};
    use crate::app::{ActivePanel, App, QueryView};
    use crate::config::AppConfig;
    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::Arc;

    struct IdleBackend;

    #[async_trait]
    impl QueryBackend for IdleBackend {
        fn endpoint(&self) -> String {
            "idle".into()
        }
        async fn list_databases(&self) -> Result<Vec<String>, ApiError> {
            Ok(Vec::new())
        }
        async fn load_schema(&self, _database: Option<&str>) -> Result<SchemaMap, ApiError> {
            Ok(SchemaMap::default())
        }
        async fn submit_query(&self, _request: &QueryRequest) -> Result<QueryOutcome, ApiError> {
            std::future::pending().await
        }
    }

    fn app() -> App {
        let config = AppConfig {
            suggestions: vec!["show all employees".into(), "count orders".into()],
            ..AppConfig::default()
        };
        App::new(&config, Arc::new(IdleBackend))
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_key(KeyEvent::new(code, modifiers)).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[tokio::test]
    async fn test_enter_and_ctrl_e_share_the_submit_path() {
        let mut app = app();
        type_text(&mut app, "count rows");
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.is_loading());

        let mut app = self::app();
        type_text(&mut app, "count rows");
        app.active_panel = ActivePanel::Schema;
        press(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert!(app.is_loading());
        assert_eq!(app.console.input.text(), "count rows");
    }

    #[tokio::test]
    async fn test_shift_enter_inserts_newline_without_submitting() {
        let mut app = app();
        type_text(&mut app, "a");
        press(&mut app, KeyCode::Enter, KeyModifiers::SHIFT);
        type_text(&mut app, "b");
        assert_eq!(app.console.input.text(), "a\nb");
        assert_eq!(app.console.view, QueryView::Idle);
    }

    #[tokio::test]
    async fn test_suggestion_fills_focuses_and_submits() {
        let mut app = app();
        app.active_panel = ActivePanel::Suggestions;
        press(&mut app, KeyCode::Down, KeyModifiers::NONE);
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.console.input.text(), "count orders");
        assert_eq!(app.active_panel, ActivePanel::QueryInput);
        assert!(app.is_loading());
    }

    #[tokio::test]
    async fn test_alt_digit_runs_suggestion() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'), KeyModifiers::ALT);
        assert_eq!(app.console.input.text(), "show all employees");
        assert!(app.is_loading());
    }

    #[tokio::test]
    async fn test_blank_enter_is_silent() {
        let mut app = app();
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.console.view, QueryView::Idle);
        assert!(app.message.is_none() && app.error.is_none());
    }
}
