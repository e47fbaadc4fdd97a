//! Terminal rendering. Every frame is a projection of `App`.

mod layout;
mod theme;
mod widgets;

pub use layout::*;
pub use theme::DefaultTheme;
pub use widgets::*;

use crate::app::App;
use ratatui::Frame;

/// Draw one frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.size();
    draw_layout(f, app, area);

    if app.show_help {
        draw_help_popup(f, area);
    }
}
