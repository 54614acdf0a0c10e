use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::error::{IngestError, Result};

/// Ingestion configuration
///
/// Everything the pipeline needs beyond its injected collaborators: the
/// target spreadsheet, the timezone match start times are written in, and
/// where the reference tables live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Target spreadsheet id
    #[serde(default)]
    pub spreadsheet_id: String,

    /// Named timezone the match schedule's civil start times are in,
    /// e.g. "Europe/Ljubljana"
    #[serde(default)]
    pub timezone: String,

    /// Mailbox label the change feed is filtered to
    #[serde(default = "default_inbox_label")]
    pub inbox_label: String,

    /// Path to the player table (email -> row), JSON
    pub players_path: Option<PathBuf>,

    /// Path to the match schedule (match number -> range + start), JSON
    pub matches_path: Option<PathBuf>,
}

fn default_inbox_label() -> String {
    "INBOX".to_string()
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            timezone: String::new(),
            inbox_label: default_inbox_label(),
            players_path: None,
            matches_path: None,
        }
    }
}

/// Get default config paths
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("tipsheet").join("config.toml"));
    }

    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".config").join("tipsheet").join("config.toml"));
        paths.push(home_dir.join(".tipsheet.rc"));
    }

    paths
}

impl IngestConfig {
    /// Load configuration from the first default path that exists.
    pub fn load() -> Result<Self> {
        for path in default_config_paths() {
            if path.exists() {
                info!("Found config at: {:?}", path);
                return Self::from_path(&path);
            }
        }

        Err(IngestError::Config(
            "No config file found in default locations".to_string(),
        ))
    }

    /// Load configuration from a specific path.
    pub fn from_path(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {:?}", path);

        let content = fs::read_to_string(path)
            .map_err(|e| IngestError::Config(format!("Failed to read config: {}", e)))?;

        let config: IngestConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check required values, reporting every missing one in a single error.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.spreadsheet_id.is_empty() {
            missing.push("spreadsheet_id");
        }
        if self.timezone.is_empty() {
            missing.push("timezone");
        }

        if !missing.is_empty() {
            return Err(IngestError::Config(format!(
                "You are missing required configuration values: {}",
                missing.join(", ")
            )));
        }

        self.tz()?;
        Ok(())
    }

    /// Parse the configured timezone name.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| IngestError::Config(format!("Invalid timezone '{}': {}", self.timezone, e)))
    }
}
