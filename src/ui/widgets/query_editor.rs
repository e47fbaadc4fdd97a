//! Question input widget

use crate::app::App;
use crate::ui::DefaultTheme;
use ratatui::prelude::*;
use ratatui::widgets::block::{Position, Title};
use ratatui::widgets::{Block, Borders, Paragraph};
use rust_i18n::t;
use unicode_width::UnicodeWidthChar;

/// Question text hard-wrapped to the box width
#[derive(Debug, PartialEq, Eq)]
pub struct WrappedInput {
    pub rows: Vec<String>,
    /// Cursor as (row, column) within `rows`
    pub cursor: (usize, usize),
}

/// Wrap `text` at `width` terminal columns. `cursor` is the (line, char)
/// position in the unwrapped text. A cursor at the end of a full row moves
/// to a fresh row so it stays visible.
pub fn wrap_input(text: &str, cursor: (usize, usize), width: usize) -> WrappedInput {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut cursor_pos = (0, 0);

    for (line_idx, line) in text.split('\n').enumerate() {
        let mut row = String::new();
        let mut used = 0;
        let mut chars = 0;
        for (col, ch) in line.chars().enumerate() {
            let w = ch.width().unwrap_or(0);
            if used + w > width && used > 0 {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            if cursor == (line_idx, col) {
                cursor_pos = (rows.len(), used);
            }
            row.push(ch);
            used += w;
            chars = col + 1;
        }
        if cursor == (line_idx, chars) {
            if used >= width {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            cursor_pos = (rows.len(), used);
        }
        rows.push(row);
    }

    WrappedInput {
        rows,
        cursor: cursor_pos,
    }
}

fn wrapped(app: &App, width: u16) -> WrappedInput {
    let input = &app.console.input;
    wrap_input(input.text(), input.cursor_line_col(), width as usize)
}

/// Height the input box wants for its current content at `width` columns
/// (borders included), capped at `max`
pub fn query_input_height(app: &App, width: u16, max: u16) -> u16 {
    let rows = wrapped(app, width.saturating_sub(2)).rows.len();
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .clamp(3, max.max(3))
}

/// Draw the question box. It grows with its content up to the height it is given.
pub fn draw_query_input(f: &mut Frame, app: &App, area: Rect, active: bool) {
    let border_style = if active {
        DefaultTheme::active_border()
    } else {
        DefaultTheme::inactive_border()
    };

    let title = format!(" {} {}", t!("question_title"), if active { "▪ " } else { "" });
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(title, DefaultTheme::title()))
        .title(
            Title::from(Line::from(vec![
                Span::styled(" Enter", DefaultTheme::info()),
                Span::styled(format!(":{} ", t!("ask")), DefaultTheme::dim_text()),
                Span::styled("Shift+Enter", DefaultTheme::info()),
                Span::styled(format!(":{} ", t!("newline")), DefaultTheme::dim_text()),
            ]))
            .position(Position::Bottom),
        );

    let inner = block.inner(area);
    f.render_widget(block, area);

    let input = &app.console.input;
    if input.text().is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            t!("question_placeholder").to_string(),
            DefaultTheme::muted_text(),
        ));
        f.render_widget(placeholder, inner);
        if active {
            f.set_cursor(inner.x, inner.y);
        }
        return;
    }

    // Keep the cursor row inside the box
    let wrapped = wrapped(app, inner.width);
    let (cursor_row, cursor_col) = wrapped.cursor;
    let visible_height = inner.height.max(1) as usize;
    let scroll_y = cursor_row.saturating_sub(visible_height - 1);

    let lines: Vec<Line> = wrapped
        .rows
        .into_iter()
        .skip(scroll_y)
        .take(visible_height)
        .map(|row| Line::from(Span::styled(row, DefaultTheme::normal_text())))
        .collect();
    f.render_widget(Paragraph::new(lines), inner);

    if active {
        let x = inner.x + u16::try_from(cursor_col).unwrap_or(u16::MAX).min(inner.width.saturating_sub(1));
        let y = inner.y + u16::try_from(cursor_row - scroll_y).unwrap_or(0);
        f.set_cursor(x, y);
    }
}
