//! Database selector and schema tree widget

use crate::app::{App, SchemaLine, SchemaPanel};
use crate::ui::DefaultTheme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use rust_i18n::t;

/// Draw the schema explorer panel
pub fn draw_schema_explorer(f: &mut Frame, app: &App, area: Rect, active: bool) {
    let border_style = if active {
        DefaultTheme::active_border()
    } else {
        DefaultTheme::inactive_border()
    };

    let title = format!(" {} {}", t!("schema_title"), if active { "▪ " } else { "" });
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(title, DefaultTheme::title()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    draw_database_selector(f, app, chunks[0], active);

    let placeholder = match &app.console.schema {
        SchemaPanel::Loading => Some(t!("schema_loading").to_string()),
        SchemaPanel::Failed => Some(t!("schema_failed").to_string()),
        SchemaPanel::Loaded(tables) if tables.is_empty() => Some(t!("schema_empty").to_string()),
        SchemaPanel::Loaded(_) => None,
    };
    if let Some(text) = placeholder {
        let style = if matches!(app.console.schema, SchemaPanel::Failed) {
            DefaultTheme::error()
        } else {
            DefaultTheme::muted_text()
        };
        f.render_widget(Paragraph::new(Span::styled(text, style)), chunks[1]);
        return;
    }

    let items: Vec<ListItem> = app
        .console
        .schema
        .visible_lines()
        .iter()
        .map(|line| match line {
            SchemaLine::Table { table, .. } => {
                let indicator = if table.expanded { "▼ " } else { "▶ " };
                ListItem::new(Line::from(vec![
                    Span::styled(indicator, DefaultTheme::info()),
                    Span::styled(table.name.clone(), DefaultTheme::normal_text()),
                    Span::styled(format!(" ({})", table.columns.len()), DefaultTheme::dim_text()),
                ]))
            }
            SchemaLine::Column { name, .. } => ListItem::new(Line::from(vec![
                Span::styled("    • ", DefaultTheme::dim_text()),
                Span::styled(name.to_string(), DefaultTheme::dim_text()),
            ])),
        })
        .collect();

    let list = List::new(items).highlight_style(DefaultTheme::selected());
    let mut state = ListState::default().with_selected(active.then_some(app.schema_selected));
    f.render_stateful_widget(list, chunks[1], &mut state);
}

/// Active database with its position in the list
fn draw_database_selector(f: &mut Frame, app: &App, area: Rect, active: bool) {
    let selector = &app.console.databases;
    let arrow_style = if active {
        DefaultTheme::info()
    } else {
        DefaultTheme::dim_text()
    };

    let line = match (selector.selected_name(), selector.selected_index()) {
        (Some(name), Some(index)) => Line::from(vec![
            Span::styled("◀ ", arrow_style),
            Span::styled(name.to_string(), DefaultTheme::success()),
            Span::styled(" ▶", arrow_style),
            Span::styled(
                format!("  {}/{}", index + 1, selector.databases().len()),
                DefaultTheme::dim_text(),
            ),
        ]),
        _ => Line::from(Span::styled(t!("default_database").to_string(), DefaultTheme::dim_text())),
    };
    f.render_widget(Paragraph::new(line), area);
}
