//! Query request/response types exchanged with the translation service

use serde::de::{DeserializeOwned, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Body of `POST /api/query`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub query: String,
    /// Omitted from the body in single-database mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
}

impl QueryRequest {
    /// Build a request from raw input text. Blank text yields `None`.
    pub fn new(text: &str, database_name: Option<String>) -> Option<Self> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }
        Some(Self {
            query: query.to_string(),
            database_name,
        })
    }
}

/// Represents a cell value in a result row
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Nested arrays/objects, kept as compact JSON
    Json(String),
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Int(i)
                } else if n.is_u64() {
                    CellValue::Text(n.to_string())
                } else {
                    CellValue::Float(n.as_f64().unwrap_or_default())
                }
            }
            Value::String(s) => CellValue::Text(s),
            other => CellValue::Json(other.to_string()),
        }
    }
}

impl From<&CellValue> for Value {
    fn from(cell: &CellValue) -> Self {
        match cell {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Int(i) => Value::from(*i),
            CellValue::Float(f) => Value::from(*f),
            CellValue::Text(s) => Value::String(s.clone()),
            CellValue::Json(s) => serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.clone())),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Bool(v) => write!(f, "{}", v),
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(v) | CellValue::Json(v) => write!(f, "{}", v),
        }
    }
}

/// One result record: column name → value, in the order the server sent them
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new(cells: Vec<(String, CellValue)>) -> Self {
        Self { cells }
    }

    /// Column names in key order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of column values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Row, A::Error> {
                let mut cells = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, value)) = map.next_entry::<String, Value>()? {
                    cells.push((name, CellValue::from(value)));
                }
                Ok(Row { cells })
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// Response body of `POST /api/query`, as sent on the wire.
///
/// Every field decodes leniently: a value of the wrong type is treated as
/// absent, so one odd metadata field never hides the results or the
/// server's `errorMessage`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub intent: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub generated_query: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub execution_time_ms: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub row_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub results: Option<Vec<Row>>,
    #[serde(default, deserialize_with = "lenient")]
    pub error_message: Option<String>,
}

/// Decode a field, treating a value of the wrong type as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl QueryResponse {
    /// Resolve the response into exactly one of success or failure.
    /// A non-empty `errorMessage` wins over every other field.
    pub fn into_outcome(self) -> QueryOutcome {
        match self.error_message.filter(|m| !m.is_empty()) {
            Some(message) => QueryOutcome::Failure(message),
            None => QueryOutcome::Success(QuerySuccess {
                intent: self.intent,
                generated_query: self.generated_query,
                execution_time_ms: self.execution_time_ms.filter(|v| v.is_finite()).unwrap_or(0.0),
                row_count: self.row_count.filter(|v| v.is_finite()).unwrap_or(0.0),
                confidence: self.confidence,
                results: self.results.unwrap_or_default(),
            }),
        }
    }
}

/// Discriminated result of a submitted query
#[derive(Clone, Debug, PartialEq)]
pub enum QueryOutcome {
    Success(QuerySuccess),
    /// Server-reported error, shown verbatim
    Failure(String),
}

/// Payload of a successful query
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuerySuccess {
    pub intent: Option<String>,
    pub generated_query: Option<String>,
    /// Milliseconds as reported, fractions included
    pub execution_time_ms: f64,
    /// Row count as reported by the server, not derived from `results`
    pub row_count: f64,
    /// Fraction in 0..1, absent when the server did not classify
    pub confidence: Option<f64>,
    pub results: Vec<Row>,
}
