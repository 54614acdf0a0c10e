//! Wire payloads and domain types shared across the pipeline

pub mod error;
pub mod tip;

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use error::{IngestError, Result};

/// Decode base64 accepting both the URL-safe alphabet (Gmail bodies) and the
/// standard alphabet (push notification envelopes), padded or not.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    let trimmed = data.trim().trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| IngestError::Parse(format!("Invalid base64 payload: {}", e)))
}

/// The JSON carried inside a mailbox push notification's `message.data`.
///
/// The history id is the mailbox's change-stream position at notification
/// time; it becomes the new cursor resting point for this invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushNotification {
    #[serde(with = "history_id")]
    pub history_id: String,
    #[serde(default)]
    pub email_address: Option<String>,
}

impl PushNotification {
    /// Decode the base64 `message.data` field of a push delivery.
    pub fn decode(data: &str) -> Result<Self> {
        let bytes = decode_base64(data)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// The mailbox API emits history ids as JSON numbers or strings depending on
/// the transport; accept both, keep them opaque.
mod history_id {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Raw::deserialize(d)? {
            Raw::Num(n) => n.to_string(),
            Raw::Str(s) => s,
        })
    }

    pub fn serialize<S: Serializer>(v: &String, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(v)
    }
}

/// Last processed position in the mailbox change stream. Singleton record:
/// one cursor per mailbox, overwritten on every ingestion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub position: String,
    pub recorded_at: DateTime<Utc>,
}

impl Cursor {
    pub fn now(position: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            recorded_at: Utc::now(),
        }
    }
}

/// One message header as returned by the message store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// One MIME part of a fetched message; `data` is base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPart {
    pub mime_type: String,
    pub data: String,
}

/// A fetched message: headers plus body parts, still undecoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub id: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub parts: Vec<BodyPart>,
}

impl MessagePayload {
    /// Case-insensitive header lookup, first match wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// First part with the given MIME type.
    pub fn part(&self, mime_type: &str) -> Option<&BodyPart> {
        self.parts
            .iter()
            .find(|p| p.mime_type.eq_ignore_ascii_case(mime_type))
    }
}

/// One rectangular write in a batched spreadsheet update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub range: String,
    pub values: Vec<Vec<serde_json::Value>>,
}

/// A batched spreadsheet update request, one call per ingestion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateRequest {
    pub value_input_option: String,
    pub data: Vec<ValueRange>,
}

/// Outcome of one ingestion run, for host logging and tests.
///
/// A run that failed after the cursor advanced still reports success outward
/// (the transport must not redeliver); the swallowed error is carried here so
/// the host can see it.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub cursor_position: String,
    pub messages_seen: usize,
    pub candidates: usize,
    pub tips_written: usize,
    pub swallowed_error: Option<String>,
}
