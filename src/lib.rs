//! Natural-language query console - Library
//! Terminal client for a question-to-SQL query service

#[macro_use]
extern crate rust_i18n;

// Initialize i18n with locales from the "locales" directory
// Fallback to English if translation not found
i18n!("locales", fallback = "en");

pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod ui;

/// Available locales in the application
const AVAILABLE_LOCALES: &[&str] = &["en", "pt-BR"];

/// Resolve a requested locale (config or system) to one we ship
fn resolve_locale(requested: &str) -> &'static str {
    // Normalize locale:
    // - Replace underscore with dash (pt_BR -> pt-BR)
    // - Remove encoding suffix (.UTF-8, .utf8, etc)
    let normalized = requested.replace('_', "-");
    let normalized = normalized.split('.').next().unwrap_or("en");

    // "C" and "POSIX" mean default
    if normalized == "C" || normalized == "POSIX" {
        return "en";
    }

    if let Some(exact) = AVAILABLE_LOCALES
        .iter()
        .copied()
        .find(|l| l.eq_ignore_ascii_case(normalized))
    {
        return exact;
    }

    // Fall back to any locale sharing the base language ("pt" -> "pt-BR")
    let base = normalized.split('-').next().unwrap_or("en");
    AVAILABLE_LOCALES
        .iter()
        .find(|l| l.split('-').next().is_some_and(|b| b.eq_ignore_ascii_case(base)))
        .copied()
        .unwrap_or("en")
}

/// Initialize the locale based on config or system settings
pub fn init_locale(config_locale: Option<&str>) {
    let requested = match config_locale {
        Some(loc) => loc.to_string(),
        None => sys_locale::get_locale().unwrap_or_else(|| "en".to_string()),
    };

    rust_i18n::set_locale(resolve_locale(&requested));
}
