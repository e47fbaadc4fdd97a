//! Color theme

use ratatui::style::{Color, Modifier, Style};

/// Dark theme used by every panel
pub struct DefaultTheme;

impl DefaultTheme {
    pub const PRIMARY: Color = Color::Rgb(0, 150, 199);
    pub const ACCENT: Color = Color::Rgb(255, 183, 3);
    pub const SUCCESS: Color = Color::Rgb(80, 200, 120);
    pub const WARNING: Color = Color::Rgb(255, 183, 3);
    pub const ERROR: Color = Color::Rgb(230, 72, 72);
    pub const TEXT: Color = Color::Rgb(230, 230, 230);
    pub const TEXT_DIM: Color = Color::Rgb(160, 160, 170);
    pub const TEXT_MUTED: Color = Color::Rgb(100, 100, 110);
    pub const COMMENT: Color = Color::Rgb(98, 114, 164);
    pub const BG_DARK: Color = Color::Rgb(22, 22, 30);
    pub const BG_PANEL: Color = Color::Rgb(30, 30, 40);
    pub const BG_SELECTED: Color = Color::Rgb(0, 95, 135);
    pub const BG_HIGHLIGHT: Color = Color::Rgb(45, 45, 60);

    pub fn active_border() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn inactive_border() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn title() -> Style {
        Style::default().fg(Self::PRIMARY).add_modifier(Modifier::BOLD)
    }

    pub fn normal_text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn dim_text() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    pub fn muted_text() -> Style {
        Style::default().fg(Self::TEXT_MUTED).add_modifier(Modifier::ITALIC)
    }

    pub fn info() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .bg(Self::BG_SELECTED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlighted() -> Style {
        Style::default().bg(Self::BG_HIGHLIGHT)
    }

    pub fn table_header() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn row_number() -> Style {
        Style::default().fg(Self::COMMENT)
    }

    pub fn null_value() -> Style {
        Style::default().fg(Self::TEXT_MUTED).add_modifier(Modifier::ITALIC)
    }

    pub fn query_text() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn header() -> Style {
        Style::default().bg(Self::BG_DARK)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT_DIM).bg(Self::BG_PANEL)
    }

    pub fn popup() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BG_DARK)
    }

    pub fn popup_border() -> Style {
        Style::default().fg(Self::ACCENT)
    }
}
