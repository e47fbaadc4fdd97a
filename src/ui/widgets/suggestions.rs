//! Example question list

use crate::app::App;
use crate::ui::DefaultTheme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use rust_i18n::t;

/// Draw the suggestions panel. The first nine entries show their Alt shortcut.
pub fn draw_suggestions(f: &mut Frame, app: &App, area: Rect, active: bool) {
    let border_style = if active {
        DefaultTheme::active_border()
    } else {
        DefaultTheme::inactive_border()
    };

    let items: Vec<ListItem> = app
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let shortcut = if i < 9 {
                format!("{} ", i + 1)
            } else {
                "  ".to_string()
            };
            ListItem::new(Line::from(vec![
                Span::styled(shortcut, DefaultTheme::info()),
                Span::styled(text.clone(), DefaultTheme::normal_text()),
            ]))
        })
        .collect();

    let title = format!(" {} {}", t!("suggestions_title"), if active { "▪ " } else { "" });
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(title, DefaultTheme::title())),
        )
        .highlight_style(DefaultTheme::selected());

    let mut state = ListState::default().with_selected(active.then_some(app.suggestion_selected));
    f.render_stateful_widget(list, area, &mut state);
}
