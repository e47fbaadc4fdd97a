//! Application state - core data structures and state management
//!
//! This module contains the main App struct and related types.
//! Console transitions live in the reducer; async work in the effect runner.

use crate::api::QueryBackend;
use crate::app::{reduce, Action, ConsoleState, EffectRunner, QueryView};
use crate::config::AppConfig;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Active panel in the UI
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivePanel {
    QueryInput,
    Results,
    Schema,
    Suggestions,
}

impl ActivePanel {
    pub fn next(self) -> Self {
        match self {
            ActivePanel::QueryInput => ActivePanel::Results,
            ActivePanel::Results => ActivePanel::Schema,
            ActivePanel::Schema => ActivePanel::Suggestions,
            ActivePanel::Suggestions => ActivePanel::QueryInput,
        }
    }
}

/// Spinner animation frames
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main application state
pub struct App {
    // === Console ===
    /// Interaction state driven by the reducer
    pub console: ConsoleState,
    /// Executes reducer effects
    pub runner: EffectRunner,
    /// Settled backend calls waiting to be reduced
    pub actions: mpsc::UnboundedReceiver<Action>,

    // === Suggestions ===
    /// Predefined example questions
    pub suggestions: Vec<String>,
    /// Selected suggestion
    pub suggestion_selected: usize,

    // === Results Panel ===
    /// Selected row in results
    pub results_selected: usize,
    /// Selected column in results
    pub results_col_selected: usize,
    /// Horizontal scroll offset for results columns
    pub results_col_scroll: usize,
    /// Number of columns that fit on screen (updated by UI)
    pub results_cols_visible: usize,

    // === Schema Explorer ===
    /// Selected line in the visible schema tree
    pub schema_selected: usize,

    // === UI State ===
    /// Active panel
    pub active_panel: ActivePanel,
    /// Should quit?
    pub should_quit: bool,
    /// Show help popup
    pub show_help: bool,
    /// Status bar message
    pub message: Option<String>,
    /// Status bar error (local actions such as export, not query errors)
    pub error: Option<String>,
    /// Spinner frame for loading animation
    pub spinner_frame: usize,
    /// Backend location shown in the header
    pub endpoint: String,
}

impl App {
    /// Create the app around a backend. Nothing is fetched until `Action::Startup`.
    pub fn new(config: &AppConfig, backend: Arc<dyn QueryBackend>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = EffectRunner::new(backend, tx);
        let endpoint = runner.endpoint();

        Self {
            console: ConsoleState::new(config.default_database.clone(), config.single_database),
            runner,
            actions: rx,
            suggestions: config.suggestions.clone(),
            suggestion_selected: 0,
            results_selected: 0,
            results_col_selected: 0,
            results_col_scroll: 0,
            results_cols_visible: 5,
            schema_selected: 0,
            active_panel: ActivePanel::QueryInput,
            should_quit: false,
            show_help: false,
            message: None,
            error: None,
            spinner_frame: 0,
            endpoint,
        }
    }

    /// Reduce an action and run the resulting effects
    pub fn dispatch(&mut self, action: Action) {
        let was_loading = self.console.is_loading();
        let effects = reduce(&mut self.console, action);

        if self.console.is_loading() && !was_loading {
            self.spinner_frame = 0;
        }
        if let QueryView::Results(_) = self.console.view {
            if was_loading {
                self.results_selected = 0;
                self.results_col_selected = 0;
                self.results_col_scroll = 0;
            }
        }
        let lines = self.console.schema.visible_lines().len();
        self.schema_selected = self.schema_selected.min(lines.saturating_sub(1));

        self.runner.run(effects);
    }

    /// Reduce every backend settlement that arrived since the last frame
    pub fn drain_actions(&mut self) {
        while let Ok(action) = self.actions.try_recv() {
            self.dispatch(action);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.console.is_loading()
    }

    /// Submit the current input, the single path for every submission trigger
    pub fn submit(&mut self) {
        self.message = None;
        self.error = None;
        self.dispatch(Action::Submit);
    }

    /// Put a suggestion in the input, focus it, and submit
    pub fn apply_suggestion(&mut self, index: usize) {
        if let Some(text) = self.suggestions.get(index).cloned() {
            self.suggestion_selected = index;
            self.active_panel = ActivePanel::QueryInput;
            self.message = None;
            self.error = None;
            self.dispatch(Action::ApplySuggestion(text));
        }
    }

    /// Current result view, if the results view is showing
    pub fn result_view(&self) -> Option<&crate::app::ResultView> {
        match &self.console.view {
            QueryView::Results(view) => Some(view),
            _ => None,
        }
    }
}
