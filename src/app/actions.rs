//! Effect runner - executes reducer effects as async backend calls
//!
//! Each backend call runs in its own tokio task and reports back by sending
//! an [`Action`] on the console's channel. Dispatching a schema load or a
//! query aborts the still-running task of the same kind; the reducer's
//! generation check covers anything that settles before the abort lands.

use crate::api::QueryBackend;
use crate::app::{Action, Effect};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub struct EffectRunner {
    backend: Arc<dyn QueryBackend>,
    tx: mpsc::UnboundedSender<Action>,
    query_task: Option<JoinHandle<()>>,
    schema_task: Option<JoinHandle<()>>,
}

impl EffectRunner {
    pub fn new(backend: Arc<dyn QueryBackend>, tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            backend,
            tx,
            query_task: None,
            schema_task: None,
        }
    }

    pub fn endpoint(&self) -> String {
        self.backend.endpoint()
    }

    /// Execute effects in order
    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run_one(effect);
        }
    }

    fn run_one(&mut self, effect: Effect) {
        match effect {
            Effect::FetchDatabases => {
                let backend = Arc::clone(&self.backend);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = backend.list_databases().await;
                    let _ = tx.send(Action::DatabasesLoaded(result));
                });
            }
            Effect::LoadSchema {
                generation,
                database,
            } => {
                supersede(&mut self.schema_task, "schema load");
                let backend = Arc::clone(&self.backend);
                let tx = self.tx.clone();
                debug!(generation = generation.value(), database = ?database, "dispatching schema load");
                self.schema_task = Some(tokio::spawn(async move {
                    let result = backend.load_schema(database.as_deref()).await;
                    let _ = tx.send(Action::SchemaLoaded { generation, result });
                }));
            }
            Effect::SubmitQuery {
                generation,
                request,
            } => {
                supersede(&mut self.query_task, "query");
                let backend = Arc::clone(&self.backend);
                let tx = self.tx.clone();
                info!(generation = generation.value(), database = ?request.database_name, "submitting query");
                self.query_task = Some(tokio::spawn(async move {
                    let result = backend.submit_query(&request).await;
                    let _ = tx.send(Action::QuerySettled { generation, result });
                }));
            }
            Effect::Notify(notification) => notification.log(),
        }
    }
}

/// Abort the previous task of an operation if it is still running
fn supersede(task: &mut Option<JoinHandle<()>>, what: &str) {
    if let Some(handle) = task.take() {
        if !handle.is_finished() {
            debug!("cancelling superseded {}", what);
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, QueryOutcome, QueryRequest, QuerySuccess, SchemaMap, TableSchema};
    use crate::app::{reduce, ConsoleState, QueryView};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory backend; a query text or database named "slow" never settles.
    #[derive(Default)]
    struct FakeBackend {
        schema_calls: Mutex<Vec<Option<String>>>,
        fail_databases: bool,
    }

    #[async_trait]
    impl QueryBackend for FakeBackend {
        fn endpoint(&self) -> String {
            "memory".into()
        }

        async fn list_databases(&self) -> Result<Vec<String>, ApiError> {
            if self.fail_databases {
                return Err(ApiError::Status {
                    status: 500,
                    body: String::new(),
                });
            }
            Ok(vec!["engdb".into(), "sales".into()])
        }

        async fn load_schema(&self, database: Option<&str>) -> Result<SchemaMap, ApiError> {
            self.schema_calls
                .lock()
                .unwrap()
                .push(database.map(str::to_string));
            if database == Some("slow") {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            Ok(SchemaMap {
                tables: vec![TableSchema {
                    name: format!("{}_table", database.unwrap_or("default")),
                    columns: vec!["id".into()],
                }],
            })
        }

        async fn submit_query(&self, request: &QueryRequest) -> Result<QueryOutcome, ApiError> {
            if request.query == "slow" {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            Ok(QueryOutcome::Success(QuerySuccess {
                generated_query: Some(format!("-- {}", request.query)),
                ..Default::default()
            }))
        }
    }

    /// Run effects and feed settled actions back until the channel is quiet
    async fn settle(
        state: &mut ConsoleState,
        runner: &mut EffectRunner,
        rx: &mut mpsc::UnboundedReceiver<Action>,
        action: Action,
    ) {
        let effects = reduce(state, action);
        runner.run(effects);
        while let Ok(Some(action)) = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await {
            let effects = reduce(state, action);
            runner.run(effects);
        }
    }

    #[tokio::test]
    async fn test_startup_loads_databases_then_schema() {
        let backend = Arc::new(FakeBackend::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut runner = EffectRunner::new(backend.clone(), tx);
        let mut state = ConsoleState::new("sales", false);

        settle(&mut state, &mut runner, &mut rx, Action::Startup).await;

        assert_eq!(state.databases.selected_name(), Some("sales"));
        assert_eq!(state.schema.tables()[0].name, "sales_table");
        assert_eq!(*backend.schema_calls.lock().unwrap(), vec![Some("sales".to_string())]);
    }

    #[tokio::test]
    async fn test_database_failure_still_loads_default_schema() {
        let backend = Arc::new(FakeBackend {
            fail_databases: true,
            ..Default::default()
        });
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut runner = EffectRunner::new(backend.clone(), tx);
        let mut state = ConsoleState::new("engdb", false);

        settle(&mut state, &mut runner, &mut rx, Action::Startup).await;

        assert!(state.databases.databases().is_empty());
        assert_eq!(state.schema.tables()[0].name, "default_table");
        assert_eq!(state.view, QueryView::Idle);
    }

    #[tokio::test]
    async fn test_superseded_query_is_cancelled() {
        let backend = Arc::new(FakeBackend::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut runner = EffectRunner::new(backend, tx);
        let mut state = ConsoleState::new("engdb", false);

        state.input.set_text("slow");
        let effects = reduce(&mut state, Action::Submit);
        runner.run(effects);
        let slow_task = runner.query_task.as_ref().map(|h| h.abort_handle()).unwrap();

        state.input.set_text("fast");
        settle(&mut state, &mut runner, &mut rx, Action::Submit).await;

        match &state.view {
            QueryView::Results(view) => assert_eq!(view.metadata.generated_query, "-- fast"),
            other => panic!("expected results, got {:?}", other),
        }
        assert!(slow_task.is_finished());
    }

    #[tokio::test]
    async fn test_superseded_schema_load_is_cancelled() {
        let backend = Arc::new(FakeBackend::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut runner = EffectRunner::new(backend.clone(), tx);
        let mut state = ConsoleState::new("slow", false);

        let effects = reduce(
            &mut state,
            Action::DatabasesLoaded(Ok(vec!["slow".into(), "sales".into()])),
        );
        runner.run(effects);
        let slow_task = runner.schema_task.as_ref().map(|h| h.abort_handle()).unwrap();

        settle(&mut state, &mut runner, &mut rx, Action::SelectDatabase(1)).await;

        assert_eq!(state.schema.tables()[0].name, "sales_table");
        assert!(slow_task.is_finished());
        assert_eq!(
            backend.schema_calls.lock().unwrap().last(),
            Some(&Some("sales".to_string()))
        );
    }
}
