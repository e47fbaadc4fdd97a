//! Results panel: idle hint, loading indicator, result table or error view

use crate::app::{App, QueryView, ResultView, TableBody, SPINNER_FRAMES};
use crate::ui::widgets::helpers::{format_cell, truncate_to_width};
use crate::ui::DefaultTheme;
use ratatui::layout::Margin;
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table, Wrap,
};
use rust_i18n::t;

/// Fixed width of a data column
const COL_WIDTH: u16 = 24;

/// Draw the results panel for the current query view
pub fn draw_results_panel(f: &mut Frame, app: &mut App, area: Rect, active: bool) {
    let border_style = if active {
        DefaultTheme::active_border()
    } else {
        DefaultTheme::inactive_border()
    };

    if matches!(app.console.view, QueryView::Results(_)) {
        draw_results(f, app, area, active, border_style);
        return;
    }

    match &app.console.view {
        QueryView::Idle => draw_idle(f, area, border_style),
        QueryView::Loading { .. } => draw_loading(f, area, border_style, app.spinner_frame),
        QueryView::Error(message) => draw_error(f, area, message),
        QueryView::Results(_) => {}
    }
}

fn draw_idle(f: &mut Frame, area: Rect, border_style: Style) {
    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled(t!("no_query_yet").to_string(), DefaultTheme::dim_text())),
        Line::from(""),
        Line::from(vec![
            Span::styled(t!("type_question_hint").to_string(), DefaultTheme::dim_text()),
            Span::styled("Enter", DefaultTheme::info()),
            Span::styled(t!("to_ask").to_string(), DefaultTheme::dim_text()),
        ]),
    ];
    let empty_msg = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(format!(" {} ", t!("results_title")), DefaultTheme::title())),
        )
        .alignment(Alignment::Center);
    f.render_widget(empty_msg, area);
}

fn draw_loading(f: &mut Frame, area: Rect, border_style: Style, spinner_frame: usize) {
    let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
    let loading = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} {}", spinner, t!("loading_query")),
            DefaultTheme::warning(),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(format!(" {} ", t!("results_title")), DefaultTheme::title())),
    )
    .alignment(Alignment::Center);
    f.render_widget(loading, area);
}

/// The single error message of a failed query
fn draw_error(f: &mut Frame, area: Rect, message: &str) {
    let error = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), DefaultTheme::error())),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(DefaultTheme::error())
            .title(Span::styled(format!(" {} ", t!("error_title")), DefaultTheme::error())),
    );
    f.render_widget(error, area);
}

fn draw_results(f: &mut Frame, app: &mut App, area: Rect, active: bool, border_style: Style) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    // Columns that fit, used by the column navigation handler
    let row_num_width: u16 = 6;
    let available = chunks[1].width.saturating_sub(2 + row_num_width);
    let cols_that_fit = (available / COL_WIDTH).max(1) as usize;
    app.results_cols_visible = cols_that_fit;

    // Keep the selected column on screen
    if app.results_col_selected < app.results_col_scroll {
        app.results_col_scroll = app.results_col_selected;
    } else if app.results_col_selected >= app.results_col_scroll + cols_that_fit {
        app.results_col_scroll = app.results_col_selected + 1 - cols_that_fit;
    }

    let app = &*app;
    let Some(view) = app.result_view() else {
        return;
    };

    draw_metadata(f, view, chunks[0]);
    draw_table(f, app, view, chunks[1], active, border_style, cols_that_fit);
}

/// Generated query plus execution stats
fn draw_metadata(f: &mut Frame, view: &ResultView, area: Rect) {
    let meta = &view.metadata;
    let mut stats = vec![
        Span::styled(format!("{} ", t!("execution_time")), DefaultTheme::dim_text()),
        Span::styled(meta.execution_time.clone(), DefaultTheme::normal_text()),
        Span::styled(" │ ", DefaultTheme::dim_text()),
        Span::styled(format!("{} ", t!("row_count")), DefaultTheme::dim_text()),
        Span::styled(meta.row_count.clone(), DefaultTheme::normal_text()),
        Span::styled(" │ ", DefaultTheme::dim_text()),
        Span::styled(format!("{} ", t!("confidence")), DefaultTheme::dim_text()),
        Span::styled(meta.confidence.clone(), DefaultTheme::normal_text()),
    ];
    if let Some(intent) = &meta.intent {
        stats.push(Span::styled(" │ ", DefaultTheme::dim_text()));
        stats.push(Span::styled(format!("{} ", t!("intent")), DefaultTheme::dim_text()));
        stats.push(Span::styled(intent.clone(), DefaultTheme::info()));
    }

    let width = area.width.saturating_sub(8) as usize;
    let query = truncate_to_width(&meta.generated_query.replace('\n', " "), width);
    let paragraph = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("SQL ", DefaultTheme::dim_text()),
            Span::styled(query, DefaultTheme::query_text()),
        ]),
        Line::from(stats),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(DefaultTheme::inactive_border())
            .title(Span::styled(format!(" {} ", t!("generated_query")), DefaultTheme::title())),
    );
    f.render_widget(paragraph, area);
}

fn draw_table(
    f: &mut Frame,
    app: &App,
    view: &ResultView,
    area: Rect,
    active: bool,
    border_style: Style,
    cols_that_fit: usize,
) {
    let table = &view.table;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            format!(
                " {} │ {} × {} ",
                t!("results_title"),
                table.row_count(),
                table.headers.len()
            ),
            DefaultTheme::title(),
        ));

    let rows = match &table.body {
        TableBody::Rows(rows) => rows,
        TableBody::Placeholder { text, .. } => {
            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(text.clone(), DefaultTheme::muted_text())),
            ])
            .block(block)
            .alignment(Alignment::Center);
            f.render_widget(placeholder, area);
            return;
        }
    };

    let row_num_width = (rows.len().to_string().len() + 2).max(4) as u16;
    let visible_cols_start = app.results_col_scroll.min(table.headers.len());
    let visible_cols_end = (visible_cols_start + cols_that_fit).min(table.headers.len());

    let mut widths: Vec<Constraint> = vec![Constraint::Length(row_num_width)];
    widths.extend((visible_cols_start..visible_cols_end).map(|_| Constraint::Length(COL_WIDTH)));

    let mut header_cells: Vec<Cell> = vec![Cell::from(" # ").style(DefaultTheme::table_header())];
    header_cells.extend(
        table.headers[visible_cols_start..visible_cols_end]
            .iter()
            .enumerate()
            .map(|(offset, name)| {
                let style = if active && visible_cols_start + offset == app.results_col_selected {
                    DefaultTheme::selected()
                } else {
                    DefaultTheme::table_header()
                };
                Cell::from(truncate_to_width(name, COL_WIDTH as usize - 1)).style(style)
            }),
    );
    let header = Row::new(header_cells).height(1);

    let visible_height = area.height.saturating_sub(3).max(1) as usize;
    let scroll_offset = app.results_selected.saturating_sub(visible_height - 1);

    let body: Vec<Row> = rows
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|(row_idx, row)| {
            let is_selected_row = active && row_idx == app.results_selected;
            let row_num_style = if is_selected_row {
                DefaultTheme::selected()
            } else {
                DefaultTheme::row_number()
            };
            let mut cells: Vec<Cell> = vec![Cell::from(format!(
                "{:>width$} ",
                row_idx + 1,
                width = row_num_width as usize - 1
            ))
            .style(row_num_style)];

            cells.extend(
                row.iter()
                    .enumerate()
                    .skip(visible_cols_start)
                    .take(visible_cols_end - visible_cols_start)
                    .map(|(col_idx, cell)| {
                        let (value, is_null) = format_cell(cell);
                        let style = if is_selected_row && col_idx == app.results_col_selected {
                            DefaultTheme::selected()
                        } else if is_selected_row {
                            DefaultTheme::highlighted()
                        } else if is_null {
                            DefaultTheme::null_value()
                        } else {
                            DefaultTheme::normal_text()
                        };
                        Cell::from(truncate_to_width(&value, COL_WIDTH as usize - 1)).style(style)
                    }),
            );
            Row::new(cells)
        })
        .collect();

    let widget = Table::new(body, widths).header(header).block(block);
    f.render_widget(widget, area);

    if rows.len() > visible_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"))
            .track_symbol(Some("│"));

        let mut scrollbar_state = ScrollbarState::new(rows.len()).position(app.results_selected);

        f.render_stateful_widget(
            scrollbar,
            area.inner(&Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}
