//! Configuration management for the query console
//!
//! Handles loading and saving settings to ~/.config/nlq-tui/config.json.
//! Environment variables (and a `.env` file, read by `main`) override the
//! file on every start.

use crate::api::{Credentials, StaticCredentials};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the query service
    pub server_url: String,
    pub username: String,
    pub password: String,
    /// Database pre-selected when the list loads
    pub default_database: String,
    /// Omit the database name from query requests
    pub single_database: bool,
    /// Example questions offered in the suggestions panel
    pub suggestions: Vec<String>,
    /// Locale override (e.g., "pt-BR", "en"). If None, uses system locale
    pub locale: Option<String>,
    /// Log filter in EnvFilter syntax
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            default_database: "engdb".to_string(),
            single_database: false,
            suggestions: vec![
                "Show all students".to_string(),
                "How many students are in each department?".to_string(),
                "List courses with more than 3 credits".to_string(),
                "What is the average age of students?".to_string(),
                "Show enrollments with grade A".to_string(),
            ],
            locale: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Get the config file path (~/.config/nlq-tui/config.json)
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("nlq-tui");

        Ok(config_dir.join("config.json"))
    }

    /// Load configuration from disk, creating a default one if it doesn't exist,
    /// then apply environment overrides
    pub fn load() -> Self {
        let mut config = match Self::try_load() {
            Ok(Some(config)) => config,
            Ok(None) => {
                let config = Self::default();
                // Try to save the default config
                let _ = config.save();
                config
            }
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Try to load configuration from disk
    fn try_load() -> Result<Option<Self>> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_json::from_str(&contents).context("Failed to parse config file")?;

        Ok(Some(config))
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Create directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Apply `NLQ_*` overrides through `lookup` (the process environment in `load`)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("NLQ_SERVER_URL") {
            self.server_url = url;
        }
        if let Some(user) = lookup("NLQ_USERNAME") {
            self.username = user;
        }
        if let Some(password) = lookup("NLQ_PASSWORD") {
            self.password = password;
        }
        if let Some(db) = lookup("NLQ_DEFAULT_DATABASE") {
            self.default_database = db;
        }
        if let Some(flag) = lookup("NLQ_SINGLE_DATABASE") {
            self.single_database = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(level) = lookup("NLQ_LOG") {
            self.log_level = level;
        }
    }

    /// Credential provider for the configured account. An empty username
    /// means the service is unauthenticated.
    pub fn credentials(&self) -> StaticCredentials {
        if self.username.is_empty() {
            StaticCredentials::new(Credentials::Anonymous)
        } else {
            StaticCredentials::new(Credentials::Basic {
                username: self.username.clone(),
                password: self.password.clone(),
            })
        }
    }
}
