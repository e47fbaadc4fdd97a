//! Result view construction
//!
//! Turns a successful query payload into display-ready metadata and a table
//! whose columns are discovered from the response itself.

use crate::api::{CellValue, QuerySuccess, Row};
use rust_i18n::t;

/// Column span of the "no results" placeholder row. There are no real
/// columns in that case, so any span wide enough to cover the table works.
pub const PLACEHOLDER_SPAN: u16 = 100;

/// Scalar metadata shown above the table
#[derive(Clone, Debug, PartialEq)]
pub struct ResultMetadata {
    pub generated_query: String,
    pub execution_time: String,
    pub row_count: String,
    pub confidence: String,
    pub intent: Option<String>,
}

/// Body of the result table
#[derive(Clone, Debug, PartialEq)]
pub enum TableBody {
    /// One entry per result row, one cell per column. `None` marks a key the
    /// row did not carry.
    Rows(Vec<Vec<Option<CellValue>>>),
    /// Single full-width row shown when there is nothing to list
    Placeholder { text: String, span: u16 },
}

/// Result table rebuilt from scratch for every response.
///
/// The column set is taken from the first row only, in its key order. The
/// service guarantees every row carries the same keys; rows that do not are
/// rendered with empty cells rather than rejected.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultTable {
    /// Raw keys used to look up cell values
    pub columns: Vec<String>,
    /// Display labels, one per column
    pub headers: Vec<String>,
    pub body: TableBody,
}

impl ResultTable {
    pub fn from_rows(rows: &[Row]) -> Self {
        let Some(first) = rows.first() else {
            return Self {
                columns: Vec::new(),
                headers: Vec::new(),
                body: TableBody::Placeholder {
                    text: t!("no_results_found").to_string(),
                    span: PLACEHOLDER_SPAN,
                },
            };
        };

        let columns: Vec<String> = first.columns().map(str::to_string).collect();
        let headers = columns.iter().map(|c| format_column_name(c)).collect();
        let body = rows
            .iter()
            .map(|row| columns.iter().map(|c| row.get(c).cloned()).collect())
            .collect();

        Self {
            columns,
            headers,
            body: TableBody::Rows(body),
        }
    }

    /// Number of data rows (the placeholder does not count)
    pub fn row_count(&self) -> usize {
        match &self.body {
            TableBody::Rows(rows) => rows.len(),
            TableBody::Placeholder { .. } => 0,
        }
    }

    /// Cell text as displayed, or `None` outside the data rows
    pub fn cell_text(&self, row: usize, col: usize) -> Option<String> {
        match &self.body {
            TableBody::Rows(rows) => rows.get(row)?.get(col).map(cell_text),
            TableBody::Placeholder { .. } => None,
        }
    }
}

/// Display text for a cell; a NULL value or a missing key renders empty
pub fn cell_text(cell: &Option<CellValue>) -> String {
    match cell {
        None | Some(CellValue::Null) => String::new(),
        Some(value) => value.to_string(),
    }
}

/// Everything the results view shows for one successful response
#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
    pub metadata: ResultMetadata,
    pub table: ResultTable,
}

impl ResultView {
    pub fn build(success: &QuerySuccess) -> Self {
        let generated_query = success
            .generated_query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| t!("not_available").to_string());

        Self {
            metadata: ResultMetadata {
                generated_query,
                execution_time: format!("{}ms", success.execution_time_ms),
                row_count: success.row_count.to_string(),
                confidence: format_confidence(success.confidence),
                intent: success.intent.clone().filter(|i| !i.is_empty()),
            },
            table: ResultTable::from_rows(&success.results),
        }
    }
}

/// Convert a snake_case key into a header label: underscores become spaces
/// and each whitespace-delimited word starts uppercase.
pub fn format_column_name(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for ch in spaced.chars() {
        if at_word_start && !ch.is_whitespace() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }
    out
}

/// Render a 0..1 fraction as a rounded integer percentage
pub fn format_confidence(confidence: Option<f64>) -> String {
    let fraction = confidence.filter(|c| c.is_finite()).unwrap_or(0.0);
    format!("{}%", (fraction * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{QueryOutcome, QueryResponse};

    fn success(json: &str) -> QuerySuccess {
        let resp: QueryResponse = serde_json::from_str(json).unwrap();
        match resp.into_outcome() {
            QueryOutcome::Success(s) => s,
            QueryOutcome::Failure(m) => panic!("unexpected failure: {}", m),
        }
    }

    #[test]
    fn test_columns_from_first_row() {
        let view = ResultView::build(&success(r#"{"results":[{"id":1,"name":"a"}],"rowCount":1}"#));
        assert_eq!(view.table.headers, vec!["Id", "Name"]);
        assert_eq!(view.table.columns, vec!["id", "name"]);
        assert_eq!(view.table.row_count(), 1);
        assert_eq!(view.table.cell_text(0, 0).as_deref(), Some("1"));
        assert_eq!(view.table.cell_text(0, 1).as_deref(), Some("a"));
    }

    #[test]
    fn test_missing_key_renders_empty_and_extra_keys_ignored() {
        let view = ResultView::build(&success(
            r#"{"results":[{"id":1,"name":"a"},{"id":2,"extra":true}]}"#,
        ));
        assert_eq!(view.table.headers.len(), 2);
        assert_eq!(view.table.cell_text(1, 0).as_deref(), Some("2"));
        assert_eq!(view.table.cell_text(1, 1).as_deref(), Some(""));
    }

    #[test]
    fn test_null_renders_empty() {
        let view = ResultView::build(&success(r#"{"results":[{"id":1,"name":null}]}"#));
        assert_eq!(view.table.cell_text(0, 1).as_deref(), Some(""));
    }

    #[test]
    fn test_empty_results_placeholder() {
        for json in [r#"{"results":[]}"#, r#"{}"#] {
            let view = ResultView::build(&success(json));
            assert_eq!(view.table.row_count(), 0);
            assert!(view.table.headers.is_empty());
            assert_eq!(
                view.table.body,
                TableBody::Placeholder {
                    text: "No results found.".to_string(),
                    span: PLACEHOLDER_SPAN
                }
            );
        }
    }

    #[test]
    fn test_metadata() {
        let view = ResultView::build(&success(
            r#"{"generatedQuery":"SELECT 1","executionTimeMs":42,"rowCount":3,"confidence":0.876,"intent":"SELECT"}"#,
        ));
        assert_eq!(view.metadata.generated_query, "SELECT 1");
        assert_eq!(view.metadata.execution_time, "42ms");
        assert_eq!(view.metadata.row_count, "3");
        assert_eq!(view.metadata.confidence, "88%");
        assert_eq!(view.metadata.intent.as_deref(), Some("SELECT"));
    }

    #[test]
    fn test_metadata_fallbacks() {
        let view = ResultView::build(&success(r#"{"generatedQuery":null}"#));
        assert_eq!(view.metadata.generated_query, "N/A");
        assert_eq!(view.metadata.confidence, "0%");
        assert_eq!(view.metadata.execution_time, "0ms");
    }

    #[test]
    fn test_fractional_execution_time() {
        let view = ResultView::build(&success(r#"{"executionTimeMs":12.5,"rowCount":2}"#));
        assert_eq!(view.metadata.execution_time, "12.5ms");
        assert_eq!(view.metadata.row_count, "2");
    }

    #[test]
    fn test_confidence_rounding() {
        assert_eq!(format_confidence(Some(0.876)), "88%");
        assert_eq!(format_confidence(Some(1.0)), "100%");
        assert_eq!(format_confidence(Some(0.004)), "0%");
        assert_eq!(format_confidence(None), "0%");
    }

    #[test]
    fn test_column_name_transform() {
        assert_eq!(format_column_name("order_total"), "Order Total");
        assert_eq!(format_column_name("status"), "Status");
        assert_eq!(format_column_name("user_id"), "User Id");
        assert_eq!(format_column_name("created_at_utc"), "Created At Utc");
        assert_eq!(format_column_name("_private"), " Private");
    }
}
