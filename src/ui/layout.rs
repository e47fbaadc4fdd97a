//! Layout management

use crate::app::{ActivePanel, App, SPINNER_FRAMES};
use crate::ui::{
    draw_query_input, draw_results_panel, draw_schema_explorer, draw_suggestions, query_input_height,
    DefaultTheme,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use rust_i18n::t;

/// Draw the main layout
pub fn draw_layout(f: &mut Frame, app: &mut App, area: Rect) {
    // Main vertical layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, app, chunks[0]);
    draw_content(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);
}

/// Draw the header: title, service and database, quick hints
fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24), // Title
            Constraint::Min(20),    // Service info
            Constraint::Length(30), // Quick hints
        ])
        .split(area);

    let logo = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" ◆ ", DefaultTheme::title()),
            Span::styled(t!("app_title").to_string(), Style::default().fg(DefaultTheme::TEXT)),
        ]),
        Line::from(""),
    ])
    .style(DefaultTheme::header());
    f.render_widget(logo, header_chunks[0]);

    let database = app
        .console
        .databases
        .selected_name()
        .map(str::to_string)
        .unwrap_or_else(|| t!("default_database").to_string());
    let service = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("● ", DefaultTheme::success()),
            Span::styled(database, DefaultTheme::normal_text()),
            Span::styled(" · ", DefaultTheme::dim_text()),
            Span::styled(app.endpoint.clone(), DefaultTheme::dim_text()),
        ]),
        Line::from(""),
    ])
    .style(DefaultTheme::header());
    f.render_widget(service, header_chunks[1]);

    let hints = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Ctrl+E", DefaultTheme::info()),
            Span::styled(format!(":{} ", t!("ask")), DefaultTheme::dim_text()),
            Span::styled("Tab", DefaultTheme::info()),
            Span::styled(format!(":{} ", t!("panel")), DefaultTheme::dim_text()),
            Span::styled("F1", DefaultTheme::info()),
            Span::styled(format!(":{} ", t!("help")), DefaultTheme::dim_text()),
        ]),
        Line::from(""),
    ])
    .style(DefaultTheme::header())
    .alignment(Alignment::Right);
    f.render_widget(hints, header_chunks[2]);
}

/// Draw main content area
fn draw_content(f: &mut Frame, app: &mut App, area: Rect) {
    // Horizontal split: left (question + results), right (schema + suggestions)
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // Main area
            Constraint::Percentage(30), // Side panels
        ])
        .split(area);

    // The question box grows with its content, up to half the column
    let input_height = query_input_height(app, h_chunks[0].width, h_chunks[0].height / 2);
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(input_height), Constraint::Min(5)])
        .split(h_chunks[0]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60), // Schema explorer
            Constraint::Percentage(40), // Suggestions
        ])
        .split(h_chunks[1]);

    let active = app.active_panel;
    draw_query_input(f, app, left_chunks[0], active == ActivePanel::QueryInput);
    draw_results_panel(f, app, left_chunks[1], active == ActivePanel::Results);
    draw_schema_explorer(f, app, right_chunks[0], active == ActivePanel::Schema);
    draw_suggestions(f, app, right_chunks[1], active == ActivePanel::Suggestions);
}

/// Draw the status bar
fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let message = if let Some(ref err) = app.error {
        Paragraph::new(Span::styled(format!("✗ {}", err), DefaultTheme::error()))
    } else if let Some(ref msg) = app.message {
        Paragraph::new(Span::styled(format!("✓ {}", msg), DefaultTheme::success()))
    } else if app.is_loading() {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        Paragraph::new(Span::styled(
            format!("{} {}", spinner, t!("loading_query")),
            DefaultTheme::warning(),
        ))
    } else {
        Paragraph::new(Span::styled(t!("status_hint").to_string(), DefaultTheme::dim_text()))
    };

    f.render_widget(message.style(DefaultTheme::status_bar()), area);
}

/// Draw help popup
pub fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(64, 70, area);

    // Clear the area
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(DefaultTheme::popup_border())
        .title(Span::styled(format!(" {} ", t!("help_title")), DefaultTheme::title()))
        .style(DefaultTheme::popup());
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left_text = vec![
        section(t!("help_section_global").to_string()),
        Line::from(""),
        binding("Ctrl+E / Enter", t!("help_submit").to_string()),
        binding("Shift/Alt+Enter", t!("help_newline").to_string()),
        binding("Ctrl+U", t!("help_clear").to_string()),
        binding("Tab", t!("help_next_panel").to_string()),
        binding("Alt+1..9", t!("help_suggestion").to_string()),
        binding("F5", t!("help_refresh").to_string()),
        binding("F1", t!("help_toggle").to_string()),
        binding("Ctrl+Q", t!("help_quit").to_string()),
        Line::from(""),
        section(t!("help_section_results").to_string()),
        Line::from(""),
        binding("↑↓←→ / hjkl", t!("help_navigate").to_string()),
        binding("y / Enter", t!("help_copy_cell").to_string()),
        binding("Ctrl+Y", t!("help_copy_query").to_string()),
        binding("Ctrl+S", t!("help_export_csv").to_string()),
        binding("Ctrl+O", t!("help_export_json").to_string()),
    ];
    f.render_widget(Paragraph::new(left_text), columns[0]);

    let right_text = vec![
        section(t!("help_section_schema").to_string()),
        Line::from(""),
        binding("↑↓", t!("help_navigate").to_string()),
        binding("Enter / Space", t!("help_toggle_table").to_string()),
        binding("← → / [ ]", t!("help_switch_database").to_string()),
        binding("r", t!("help_refresh").to_string()),
        Line::from(""),
        section(t!("help_section_suggestions").to_string()),
        Line::from(""),
        binding("↑↓", t!("help_navigate").to_string()),
        binding("Enter", t!("help_run_suggestion").to_string()),
    ];
    f.render_widget(Paragraph::new(right_text), columns[1]);
}

fn section(title: String) -> Line<'static> {
    Line::from(Span::styled(title, DefaultTheme::info()))
}

fn binding(keys: &'static str, description: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", keys), DefaultTheme::warning()),
        Span::styled(description, DefaultTheme::normal_text()),
    ])
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        ApiError, CellValue, QueryBackend, QueryOutcome, QueryRequest, QuerySuccess, Row, SchemaMap,
    };
    use crate::app::{Action, QueryView};
    use crate::config::AppConfig;
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    struct NullBackend;

    #[async_trait]
    impl QueryBackend for NullBackend {
        fn endpoint(&self) -> String {
            "http://test".into()
        }
        async fn list_databases(&self) -> Result<Vec<String>, ApiError> {
            Ok(Vec::new())
        }
        async fn load_schema(&self, _: Option<&str>) -> Result<SchemaMap, ApiError> {
            Ok(SchemaMap::default())
        }
        async fn submit_query(&self, _: &QueryRequest) -> Result<QueryOutcome, ApiError> {
            std::future::pending().await
        }
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| crate::ui::draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_renders_results_and_placeholder() {
        let mut app = App::new(&AppConfig::default(), Arc::new(NullBackend));
        app.console.input.set_text("show orders");
        app.submit();
        let QueryView::Loading { generation } = app.console.view else {
            panic!("expected loading");
        };

        app.dispatch(Action::QuerySettled {
            generation,
            result: Ok(QueryOutcome::Success(QuerySuccess {
                generated_query: Some("SELECT * FROM orders".into()),
                row_count: 1.0,
                results: vec![Row::new(vec![("order_total".into(), CellValue::Int(12))])],
                ..Default::default()
            })),
        });
        let screen = render(&mut app);
        assert!(screen.contains("SELECT * FROM orders"));
        assert!(screen.contains("Order Total"));

        app.dispatch(Action::Submit);
        let screen = render(&mut app);
        assert!(!screen.contains("Order Total"));
    }

    #[tokio::test]
    async fn test_long_question_wraps_inside_the_box() {
        let mut app = App::new(&AppConfig::default(), Arc::new(NullBackend));
        app.console.input.set_text(&format!("{} TAILEND", "a".repeat(100)));

        let screen = render(&mut app);
        assert!(screen.contains("TAILEND"));
        // Two text rows plus borders
        assert_eq!(query_input_height(&app, 84, 18), 4);
    }

    #[tokio::test]
    async fn test_help_popup() {
        let mut app = App::new(&AppConfig::default(), Arc::new(NullBackend));
        app.show_help = true;
        let screen = render(&mut app);
        assert!(screen.contains("Ctrl+S"));
    }
}
