//! Collaborator interfaces the pipeline is written against
//!
//! The real mailbox, spreadsheet and cursor persistence live behind these
//! traits in the host application; tests inject in-memory doubles. The core
//! never constructs a client itself.

use async_trait::async_trait;

use crate::types::error::Result;
use crate::types::{BatchUpdateRequest, Cursor, MessagePayload};

/// Persistence for the single mailbox cursor record.
///
/// `set` is called exactly once per ingestion attempt, before any stage that
/// can fail; writing the same or a later position again is harmless.
#[async_trait]
pub trait CursorStore: Send + Sync {
    async fn get(&self) -> Result<Option<Cursor>>;
    async fn set(&self, cursor: Cursor) -> Result<()>;
}

/// The mailbox change feed, filtered server-side to one label and to
/// message-added events.
#[async_trait]
pub trait MailboxFeed: Send + Sync {
    /// Ids of messages added since `cursor`.
    async fn list_added_messages(&self, cursor: &str, label: &str) -> Result<Vec<String>>;
}

/// Full message retrieval by id.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn get_message(&self, id: &str) -> Result<MessagePayload>;
}

/// The spreadsheet service's batched value update.
#[async_trait]
pub trait SheetWriter: Send + Sync {
    async fn batch_update(&self, spreadsheet_id: &str, request: BatchUpdateRequest) -> Result<()>;
}
