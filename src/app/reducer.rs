//! Console state machine
//!
//! `reduce` takes the current [`ConsoleState`] and an [`Action`], updates the
//! state in place and returns the [`Effect`]s the runner must execute. It
//! performs no network or terminal I/O, so every transition is testable
//! without a backend.

use crate::api::{ApiError, QueryOutcome, QueryRequest, SchemaMap};
use crate::app::{
    DatabaseSelector, FailureKind, Generation, GenerationCounter, InputBuffer, Notification,
    ResultView, SchemaPanel, Surface,
};
use rust_i18n::t;
use tracing::debug;

/// What the query area currently shows. Exactly one at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryView {
    Idle,
    Loading { generation: Generation },
    Results(ResultView),
    Error(String),
}

/// Everything that can happen to the console
#[derive(Debug)]
pub enum Action {
    /// App started: fetch the database list
    Startup,
    /// Submit the current input buffer
    Submit,
    /// Overwrite the input with a suggestion, then submit
    ApplySuggestion(String),
    DatabasesLoaded(Result<Vec<String>, ApiError>),
    SelectDatabase(usize),
    RefreshSchema,
    SchemaLoaded {
        generation: Generation,
        result: Result<SchemaMap, ApiError>,
    },
    QuerySettled {
        generation: Generation,
        result: Result<QueryOutcome, ApiError>,
    },
    ToggleTable(usize),
}

/// Side effects requested by the reducer
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    FetchDatabases,
    LoadSchema {
        generation: Generation,
        database: Option<String>,
    },
    SubmitQuery {
        generation: Generation,
        request: QueryRequest,
    },
    Notify(Notification),
}

/// Single container for the console's interaction state
#[derive(Debug)]
pub struct ConsoleState {
    pub input: InputBuffer,
    pub view: QueryView,
    pub databases: DatabaseSelector,
    pub schema: SchemaPanel,
    query_generation: GenerationCounter,
    schema_generation: GenerationCounter,
    default_database: String,
    single_database: bool,
}

impl ConsoleState {
    pub fn new(default_database: impl Into<String>, single_database: bool) -> Self {
        Self {
            input: InputBuffer::new(),
            view: QueryView::Idle,
            databases: DatabaseSelector::default(),
            schema: SchemaPanel::Loading,
            query_generation: GenerationCounter::new(),
            schema_generation: GenerationCounter::new(),
            default_database: default_database.into(),
            single_database,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, QueryView::Loading { .. })
    }

    /// Start a schema load for the active database, replacing the panel content
    fn begin_schema_load(&mut self) -> Effect {
        self.schema = SchemaPanel::Loading;
        Effect::LoadSchema {
            generation: self.schema_generation.issue(),
            database: self.databases.selected_name().map(str::to_string),
        }
    }

    fn begin_submit(&mut self) -> Vec<Effect> {
        let database = if self.single_database {
            None
        } else {
            self.databases.selected_name().map(str::to_string)
        };
        let Some(request) = QueryRequest::new(self.input.text(), database) else {
            return Vec::new();
        };

        let generation = self.query_generation.issue();
        self.view = QueryView::Loading { generation };
        vec![Effect::SubmitQuery {
            generation,
            request,
        }]
    }

    /// Apply a failure according to its surface policy
    fn fail(&mut self, notification: Notification) -> Vec<Effect> {
        match notification.surface() {
            Surface::QueryErrorView => self.view = QueryView::Error(notification.message.clone()),
            Surface::SchemaPanel => self.schema = SchemaPanel::Failed,
            Surface::LogOnly => {}
        }
        vec![Effect::Notify(notification)]
    }
}

/// Pure reducer: state transitions only, no I/O.
pub fn reduce(state: &mut ConsoleState, action: Action) -> Vec<Effect> {
    match action {
        Action::Startup => {
            state.schema = SchemaPanel::Loading;
            vec![Effect::FetchDatabases]
        }

        Action::Submit => state.begin_submit(),

        Action::ApplySuggestion(text) => {
            state.input.set_text(&text);
            state.begin_submit()
        }

        Action::DatabasesLoaded(result) => {
            let mut effects = Vec::new();
            match result {
                Ok(list) => {
                    let default = state.default_database.clone();
                    state.databases.populate(list, &default);
                }
                Err(e) => {
                    state.databases.populate(Vec::new(), "");
                    effects.extend(state.fail(
                        Notification::new(FailureKind::DatabaseList, t!("databases_failed"))
                            .with_detail(e.to_string()),
                    ));
                }
            }
            effects.push(state.begin_schema_load());
            effects
        }

        Action::SelectDatabase(index) => {
            if state.databases.select(index) {
                vec![state.begin_schema_load()]
            } else {
                Vec::new()
            }
        }

        Action::RefreshSchema => vec![state.begin_schema_load()],

        Action::SchemaLoaded { generation, result } => {
            if !state.schema_generation.is_current(generation) {
                debug!(generation = generation.value(), "discarding stale schema load");
                return Vec::new();
            }
            match result {
                Ok(schema) => {
                    state.schema = SchemaPanel::from_schema(schema);
                    Vec::new()
                }
                Err(e) => state.fail(
                    Notification::new(FailureKind::SchemaLoad, t!("schema_failed"))
                        .with_detail(e.to_string()),
                ),
            }
        }

        Action::QuerySettled { generation, result } => {
            let awaiting = matches!(state.view, QueryView::Loading { generation: g } if g == generation);
            if !state.query_generation.is_current(generation) || !awaiting {
                debug!(generation = generation.value(), "discarding stale query result");
                return Vec::new();
            }

            // Leave Loading before routing to exactly one terminal view
            state.view = QueryView::Idle;
            match result {
                Ok(QueryOutcome::Success(success)) => {
                    state.view = QueryView::Results(ResultView::build(&success));
                    Vec::new()
                }
                Ok(QueryOutcome::Failure(message)) => {
                    state.fail(Notification::new(FailureKind::QueryRejected, message))
                }
                Err(e) => state.fail(
                    Notification::new(FailureKind::QueryTransport, t!("connection_failed"))
                        .with_detail(e.to_string()),
                ),
            }
        }

        Action::ToggleTable(index) => {
            state.schema.toggle(index);
            Vec::new()
        }
    }
}
