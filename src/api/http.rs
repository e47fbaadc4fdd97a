//! HTTP backend for the query service (reqwest)

use crate::api::{
    ApiError, CredentialProvider, QueryBackend, QueryOutcome, QueryRequest, QueryResponse,
    SchemaMap,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Talks to the query service over its JSON REST API
pub struct HttpBackend {
    base_url: String,
    http_client: Client,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpBackend {
    /// Create a backend for the service at `base_url`
    pub fn new(base_url: &str, credentials: Arc<dyn CredentialProvider>) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|_| ApiError::InvalidUrl(base_url.clone()))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("nlq_tui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url,
            http_client,
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = self.credentials.credentials().apply(request);
        Ok(request.send().await?)
    }

    /// Decode a JSON body, treating any non-2xx status as an error
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::status(status.as_u16(), &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl QueryBackend for HttpBackend {
    fn endpoint(&self) -> String {
        self.base_url.clone()
    }

    async fn list_databases(&self) -> Result<Vec<String>, ApiError> {
        let url = self.url("/api/query/databases");
        debug!(%url, "listing databases");
        let response = self.send(self.http_client.get(&url)).await?;
        Self::decode(response).await
    }

    async fn load_schema(&self, database: Option<&str>) -> Result<SchemaMap, ApiError> {
        let url = self.url("/api/query/schema");
        debug!(%url, database = ?database, "loading schema");
        let mut request = self.http_client.get(&url);
        if let Some(name) = database {
            request = request.query(&[("dbName", name)]);
        }
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    async fn submit_query(&self, request: &QueryRequest) -> Result<QueryOutcome, ApiError> {
        let url = self.url("/api/query");
        debug!(%url, database = ?request.database_name, "submitting query");
        let response = self
            .send(self.http_client.post(&url).json(request))
            .await?;

        // The service reports query errors in the body, sometimes alongside a
        // non-2xx status, so the body is decoded before the status is judged.
        let status = response.status();
        let body = response.bytes().await?;
        let value = match serde_json::from_slice::<Value>(&body) {
            Ok(value) => value,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => return Err(ApiError::status(status.as_u16(), &body)),
        };

        // A non-empty errorMessage wins whatever else the body carries
        if let Some(message) = error_message(&value) {
            return Ok(QueryOutcome::Failure(message));
        }
        if !status.is_success() {
            return Err(ApiError::status(status.as_u16(), &body));
        }
        let decoded: QueryResponse = serde_json::from_value(value)?;
        Ok(decoded.into_outcome())
    }
}

/// Non-empty `errorMessage` of a query response body
fn error_message(body: &Value) -> Option<String> {
    body.get("errorMessage")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
