//! Helper functions for UI widgets

use crate::api::CellValue;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display text for a result cell, flagging NULLs for muted styling.
/// NULLs and cells missing from a row both render empty.
pub fn format_cell(cell: &Option<CellValue>) -> (String, bool) {
    match cell {
        None => (String::new(), false),
        Some(CellValue::Null) => (String::new(), true),
        // Multi-line text would break the row height
        Some(value) => (value.to_string().replace('\n', " "), false),
    }
}

/// Cut `text` to at most `width` terminal columns, marking the cut with "…"
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
