//! Natural-language query console
//!
//! Entry point: configuration, logging, terminal setup and the event loop.

use anyhow::{Context, Result};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use nlq_tui::api::HttpBackend;
use nlq_tui::app::{Action, App};
use nlq_tui::config::AppConfig;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = AppConfig::load();
    let _log_guard = nlq_tui::logging::init(&config)?;
    nlq_tui::init_locale(config.locale.as_deref());

    tracing::info!(server = %config.server_url, "starting");

    let backend = HttpBackend::new(&config.server_url, Arc::new(config.credentials()))
        .with_context(|| format!("Invalid server URL: {}", config.server_url))?;

    let (mut terminal, enhanced) =
        init_terminal().context("failed to initialize terminal; are you running in a real TTY?")?;

    let mut app = App::new(&config, Arc::new(backend));
    app.dispatch(Action::Startup);
    let res = app.run(&mut terminal).await;

    restore_terminal(terminal, enhanced)?;

    if let Err(e) = &res {
        tracing::error!(error = %e, "exited with error");
    }
    res
}

/// Enter raw mode and the alternate screen. Returns whether keyboard
/// enhancement was enabled, which lets Shift+Enter be told apart from Enter.
fn init_terminal() -> Result<(Terminal<CrosstermBackend<Stdout>>, bool)> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok((terminal, enhanced))
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>, enhanced: bool) -> Result<()> {
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
