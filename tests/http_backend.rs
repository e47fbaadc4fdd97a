//! HttpBackend against a mock query service

use mockito::{Matcher, Server};
use nlq_tui::api::{
    ApiError, CellValue, Credentials, HttpBackend, QueryBackend, QueryOutcome, QueryRequest,
    StaticCredentials,
};
use serde_json::json;
use std::sync::Arc;

/// base64("admin:admin")
const ADMIN_AUTH: &str = "Basic YWRtaW46YWRtaW4=";

fn backend(url: &str) -> HttpBackend {
    let credentials = StaticCredentials::new(Credentials::Basic {
        username: "admin".into(),
        password: "admin".into(),
    });
    HttpBackend::new(url, Arc::new(credentials)).unwrap()
}

#[tokio::test]
async fn test_list_databases_sends_credentials() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/query/databases")
        .match_header("authorization", ADMIN_AUTH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"["engdb","sales"]"#)
        .create_async()
        .await;

    let databases = backend(&server.url()).list_databases().await.unwrap();

    assert_eq!(databases, vec!["engdb", "sales"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_schema_with_and_without_database() {
    let mut server = Server::new_async().await;
    let named = server
        .mock("GET", "/api/query/schema")
        .match_query(Matcher::UrlEncoded("dbName".into(), "sales".into()))
        .with_status(200)
        .with_body(r#"{"orders":["id","total"],"customers":["id"]}"#)
        .create_async()
        .await;
    let default = server
        .mock("GET", "/api/query/schema")
        .with_status(200)
        .with_body(r#"{}"#)
        .create_async()
        .await;

    let backend = backend(&server.url());
    let schema = backend.load_schema(Some("sales")).await.unwrap();
    let names: Vec<&str> = schema.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["orders", "customers"]);
    assert_eq!(schema.table("orders").unwrap().columns, vec!["id", "total"]);

    assert!(backend.load_schema(None).await.unwrap().is_empty());

    named.assert_async().await;
    default.assert_async().await;
}

#[tokio::test]
async fn test_schema_server_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/query/schema")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let err = backend(&server.url()).load_schema(None).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, ref body } if body == "boom"));
}

#[tokio::test]
async fn test_submit_query_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/query")
        .match_header("authorization", ADMIN_AUTH)
        .match_body(Matcher::Json(json!({
            "query": "total orders per customer",
            "databaseName": "engdb"
        })))
        .with_status(200)
        .with_body(
            r#"{"intent":"SELECT","generatedQuery":"SELECT 1","executionTimeMs":12,
                "rowCount":1,"confidence":0.9,"results":[{"customer_id":7,"order_total":10.5}]}"#,
        )
        .create_async()
        .await;

    let request = QueryRequest::new("  total orders per customer ", Some("engdb".into())).unwrap();
    let outcome = backend(&server.url()).submit_query(&request).await.unwrap();

    let QueryOutcome::Success(success) = outcome else {
        panic!("expected success");
    };
    assert_eq!(success.generated_query.as_deref(), Some("SELECT 1"));
    assert_eq!(success.execution_time_ms, 12.0);
    let columns: Vec<&str> = success.results[0].columns().collect();
    assert_eq!(columns, vec!["customer_id", "order_total"]);
    assert_eq!(success.results[0].get("order_total"), Some(&CellValue::Float(10.5)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_submit_query_omits_database_name() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/query")
        .match_body(Matcher::Json(json!({ "query": "count students" })))
        .with_status(200)
        .with_body(r#"{"results":[]}"#)
        .create_async()
        .await;

    let request = QueryRequest::new("count students", None).unwrap();
    let outcome = backend(&server.url()).submit_query(&request).await.unwrap();

    assert!(matches!(outcome, QueryOutcome::Success(s) if s.results.is_empty()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_message_is_failure_even_with_error_status() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/query")
        .with_status(400)
        .with_body(r#"{"errorMessage":"Unknown table 'ordrs'"}"#)
        .create_async()
        .await;

    let request = QueryRequest::new("ordrs", None).unwrap();
    let outcome = backend(&server.url()).submit_query(&request).await.unwrap();

    assert_eq!(outcome, QueryOutcome::Failure("Unknown table 'ordrs'".into()));
}

#[tokio::test]
async fn test_error_message_wins_over_malformed_metadata() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/query")
        .with_status(400)
        .with_body(r#"{"executionTimeMs":3.2,"rowCount":"n/a","results":7,"errorMessage":"syntax error"}"#)
        .create_async()
        .await;

    let request = QueryRequest::new("bad question", None).unwrap();
    let outcome = backend(&server.url()).submit_query(&request).await.unwrap();

    assert_eq!(outcome, QueryOutcome::Failure("syntax error".into()));
}

#[tokio::test]
async fn test_fractional_execution_time_is_success() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/query")
        .with_status(200)
        .with_body(r#"{"generatedQuery":"SELECT 1","executionTimeMs":12.5,"rowCount":1,"results":[{"a":1}]}"#)
        .create_async()
        .await;

    let request = QueryRequest::new("one", None).unwrap();
    let outcome = backend(&server.url()).submit_query(&request).await.unwrap();

    let QueryOutcome::Success(success) = outcome else {
        panic!("expected success");
    };
    assert_eq!(success.execution_time_ms, 12.5);
    assert_eq!(success.results.len(), 1);
}

#[tokio::test]
async fn test_error_status_without_message_is_transport_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/query")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let request = QueryRequest::new("anything", None).unwrap();
    let err = backend(&server.url()).submit_query(&request).await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 502, .. }));
}

#[tokio::test]
async fn test_unreachable_server() {
    // Nothing listens on port 9 locally
    let request = QueryRequest::new("anything", None).unwrap();
    let err = backend("http://127.0.0.1:9")
        .submit_query(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}

#[test]
fn test_invalid_url() {
    let credentials = Arc::new(StaticCredentials::new(Credentials::Anonymous));
    assert!(matches!(
        HttpBackend::new("not a url", credentials),
        Err(ApiError::InvalidUrl(_))
    ));
}
