//! Immutable reference tables: players and the match schedule
//!
//! Both are loaded once at process start and never written by the pipeline.
//! The player table maps a normalized email address to the player's
//! spreadsheet row; the schedule maps a match number to its cell-range
//! template and civil start time.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::types::error::{IngestError, Result};

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Player email -> spreadsheet row
#[derive(Debug, Clone, Default)]
pub struct PlayerIndex {
    rows: HashMap<String, u32>,
}

impl PlayerIndex {
    /// Build from raw entries, normalizing keys.
    pub fn new(rows: impl IntoIterator<Item = (String, u32)>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|(email, row)| (normalize_email(&email), row))
                .collect(),
        }
    }

    /// Load from a JSON object of `{"email": row}`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| IngestError::Reference(format!("Failed to read {:?}: {}", path, e)))?;
        let raw: HashMap<String, u32> = serde_json::from_str(&content)
            .map_err(|e| IngestError::Reference(format!("Failed to parse {:?}: {}", path, e)))?;
        Ok(Self::new(raw))
    }

    /// Case-insensitive row lookup.
    pub fn row_for(&self, email: &str) -> Option<u32> {
        self.rows.get(&normalize_email(email)).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One scheduled match: where its tips go and when tipping closes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduledMatch {
    /// Cell-range template containing the `-row` placeholder,
    /// e.g. `Group stage!F-row`.
    pub range: String,
    /// Civil start time, interpreted in the configured timezone.
    #[serde(with = "civil")]
    pub start: NaiveDateTime,
}

impl ScheduledMatch {
    /// Substitute a player's row into the range template.
    pub fn range_for_row(&self, row: u32) -> String {
        self.range.replace("-row", &row.to_string())
    }
}

/// Civil datetimes in the schedule file are hand-maintained; accept both
/// `2022-11-20T17:00[:00]` and `2022-11-20 17:00[:00]`.
mod civil {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer};

    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        FORMATS
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(&raw, f).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid start time '{}'", raw)))
    }
}

/// Match number -> scheduled match
#[derive(Debug, Clone, Default)]
pub struct MatchSchedule {
    matches: HashMap<u32, ScheduledMatch>,
}

impl MatchSchedule {
    pub fn new(matches: HashMap<u32, ScheduledMatch>) -> Self {
        Self { matches }
    }

    /// Load from a JSON object of `{"match number": {range, start}}`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| IngestError::Reference(format!("Failed to read {:?}: {}", path, e)))?;
        let matches: HashMap<u32, ScheduledMatch> = serde_json::from_str(&content)
            .map_err(|e| IngestError::Reference(format!("Failed to parse {:?}: {}", path, e)))?;
        Ok(Self::new(matches))
    }

    pub fn get(&self, match_number: u32) -> Option<&ScheduledMatch> {
        self.matches.get(&match_number)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
