//! Unified error types for the ingestion pipeline
//!
//! Collaborator failures keep their own variants so logs show which external
//! system misbehaved; everything carries a display string rather than the
//! source error, since callers only log and decide whether to continue.

use thiserror::Error;

/// Error type for the ingestion pipeline and its collaborators
#[derive(Debug, Clone, Error)]
pub enum IngestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Reference data error: {0}")]
    Reference(String),

    #[error("Cursor store error: {0}")]
    CursorStore(String),

    #[error("Mailbox feed error: {0}")]
    MailboxFeed(String),

    #[error("Message store error: {0}")]
    MessageStore(String),

    #[error("Spreadsheet error: {0}")]
    Sheet(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("{0}")]
    Other(String),
}

// Implement From for common error types

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        IngestError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        IngestError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for IngestError {
    fn from(err: toml::de::Error) -> Self {
        IngestError::Config(err.to_string())
    }
}

impl From<String> for IngestError {
    fn from(err: String) -> Self {
        IngestError::Other(err)
    }
}

impl From<&str> for IngestError {
    fn from(err: &str) -> Self {
        IngestError::Other(err.to_string())
    }
}

/// Result type alias using IngestError
pub type Result<T> = std::result::Result<T, IngestError>;
