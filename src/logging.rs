//! File logging
//!
//! The terminal belongs to the UI, so events go to
//! ~/.local/share/nlq-tui/nlq-tui.log (platform data dir) instead of stdout.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE: &str = "nlq-tui.log";

/// Directory holding the log file
pub fn log_dir() -> Result<PathBuf> {
    Ok(dirs::data_dir()
        .context("Could not find data directory")?
        .join("nlq-tui"))
}

/// Build the filter: `RUST_LOG` wins, then the configured level
fn env_filter(config: &AppConfig) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log filter")
}

/// Initialize logging. Keep the returned guard alive until exit so buffered
/// lines are flushed.
pub fn init(config: &AppConfig) -> Result<WorkerGuard> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir).context("Failed to create log directory")?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(env_filter(config)?)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}
