//! Query service abstraction trait
//!
//! Defines the three calls the console makes against its backend.

use crate::api::{ApiError, QueryOutcome, QueryRequest, SchemaMap};
use async_trait::async_trait;

/// Trait that every query service backend must implement.
///
/// All methods are async because the effect runner spawns them on tokio.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Human-readable location of the service (shown in the status bar)
    fn endpoint(&self) -> String;

    /// List selectable database identifiers, in server order
    async fn list_databases(&self) -> Result<Vec<String>, ApiError>;

    /// Load table → columns for a database. `None` lets the server pick its default.
    async fn load_schema(&self, database: Option<&str>) -> Result<SchemaMap, ApiError>;

    /// Translate and execute a natural-language query
    async fn submit_query(&self, request: &QueryRequest) -> Result<QueryOutcome, ApiError>;
}
