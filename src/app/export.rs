//! Export functionality for query results

use crate::app::{App, ResultTable, TableBody};
use anyhow::Result;
use rust_i18n::t;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

impl App {
    /// Export results to CSV file
    pub fn export_results_csv(&mut self) {
        self.export_with("csv", write_csv);
    }

    /// Export results to JSON file
    pub fn export_results_json(&mut self) {
        self.export_with("json", write_json);
    }

    fn export_with(&mut self, extension: &str, write: fn(&ResultTable, &Path) -> Result<()>) {
        let Some(table) = self.result_view().map(|v| &v.table).filter(|t| t.row_count() > 0) else {
            self.error = Some(t!("no_results_to_export").to_string());
            return;
        };

        let path = export_filename(extension);
        let count = table.row_count();
        match write(table, &path) {
            Ok(()) => {
                tracing::info!(rows = count, path = %path.display(), "exported results");
                self.message = Some(
                    t!("exported_rows", count = count, filename = path.display().to_string()).to_string(),
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                self.error = Some(t!("export_failed", error = e.to_string()).to_string());
            }
        }
    }

    /// Copy the generated query of the current result to the clipboard
    pub fn copy_generated_query(&mut self) {
        let Some(query) = self.result_view().map(|v| v.metadata.generated_query.clone()) else {
            self.error = Some(t!("no_query_to_copy").to_string());
            return;
        };

        match arboard::Clipboard::new().and_then(|mut c| c.set_text(query)) {
            Ok(()) => self.message = Some(t!("copied_query").to_string()),
            Err(e) => self.error = Some(t!("clipboard_failed", error = e.to_string()).to_string()),
        }
    }
}

/// Timestamped file name in the working directory
fn export_filename(extension: &str) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("export_{}.{}", timestamp, extension))
}

/// Write the table as CSV using the raw column keys as header
pub fn write_csv(table: &ResultTable, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(&table.columns)?;
    if let TableBody::Rows(rows) = &table.body {
        for row in rows {
            wtr.write_record(row.iter().map(crate::app::cell_text))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Write the table as a JSON array of objects, keeping value types
pub fn write_json(table: &ResultTable, path: &Path) -> Result<()> {
    let mut out: Vec<Map<String, Value>> = Vec::new();
    if let TableBody::Rows(rows) = &table.body {
        for row in rows {
            let mut obj = Map::new();
            for (col, cell) in table.columns.iter().zip(row) {
                if let Some(cell) = cell {
                    obj.insert(col.clone(), Value::from(cell));
                }
            }
            out.push(obj);
        }
    }
    std::fs::write(path, serde_json::to_string_pretty(&out)?)?;
    Ok(())
}
