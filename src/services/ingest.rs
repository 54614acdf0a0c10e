//! Ingestion orchestrator: one run per mailbox push notification
//!
//! The ordering contract that makes re-delivery safe: the cursor is persisted
//! from the inbound notification before any stage that can fail, so a crash
//! loop never re-reads the same change window forever. The price is that a
//! failure after the cursor advanced loses that invocation's tips; the run
//! still reports success outward so the transport does not pile up
//! redeliveries of a now-stale notification.

use std::sync::Arc;

use chrono::Utc;
use futures::future;
use tracing::{error, info};

use crate::adapters::{CursorStore, MailboxFeed, MessageStore, SheetWriter};
use crate::config::IngestConfig;
use crate::parser;
use crate::reference::{MatchSchedule, PlayerIndex};
use crate::resolver::MatchResolver;
use crate::services::writer;
use crate::types::error::Result;
use crate::types::{Cursor, IngestReport, PushNotification};

/// Drives the end-to-end ingestion flow against injected collaborators.
pub struct Ingestor {
    config: IngestConfig,
    resolver: MatchResolver,
    cursor: Arc<dyn CursorStore>,
    feed: Arc<dyn MailboxFeed>,
    messages: Arc<dyn MessageStore>,
    sheets: Arc<dyn SheetWriter>,
}

impl Ingestor {
    pub fn new(
        config: IngestConfig,
        players: PlayerIndex,
        schedule: MatchSchedule,
        cursor: Arc<dyn CursorStore>,
        feed: Arc<dyn MailboxFeed>,
        messages: Arc<dyn MessageStore>,
        sheets: Arc<dyn SheetWriter>,
    ) -> Result<Self> {
        let tz = config.tz()?;
        Ok(Self {
            config,
            resolver: MatchResolver::new(players, schedule, tz),
            cursor,
            feed,
            messages,
            sheets,
        })
    }

    /// Handle one push notification.
    ///
    /// Always returns `Ok` once construction-time invariants hold: any
    /// failure is logged, the cursor is (re-)persisted, and the swallowed
    /// error is carried in the report. Callers acknowledge the notification
    /// either way.
    pub async fn handle_notification(&self, notification: &PushNotification) -> IngestReport {
        let mut report = IngestReport {
            cursor_position: notification.history_id.clone(),
            ..Default::default()
        };

        if let Err(e) = self.ingest(notification, &mut report).await {
            // The cursor write inside `ingest` may not have been reached;
            // persist here as well. Writing the same position twice is a
            // harmless overwrite.
            if let Err(cursor_err) = self.advance_cursor(&notification.history_id).await {
                error!("Failed to persist cursor after error: {}", cursor_err);
            }
            error!("Ingestion failed, tips from this run are lost: {}", e);
            report.swallowed_error = Some(e.to_string());
        }

        report
    }

    async fn ingest(
        &self,
        notification: &PushNotification,
        report: &mut IngestReport,
    ) -> Result<()> {
        let stored = self.cursor.get().await?;

        let message_ids = match stored {
            Some(cursor) => {
                self.feed
                    .list_added_messages(&cursor.position, &self.config.inbox_label)
                    .await?
            }
            // First run: nothing to catch up on, watch from now.
            None => {
                info!("No stored cursor, watching from now");
                Vec::new()
            }
        };

        // The new resting point comes from the inbound notification, not
        // from the fetched changes, and is persisted before anything that
        // can fail downstream.
        self.advance_cursor(&notification.history_id).await?;

        report.messages_seen = message_ids.len();
        if message_ids.is_empty() {
            info!("History updated, but no new messages");
            return Ok(());
        }

        // Independent read-only fetches; any failure fails the invocation.
        let payloads = future::try_join_all(
            message_ids.iter().map(|id| self.messages.get_message(id)),
        )
        .await?;

        let now = Utc::now();
        let mut resolved = Vec::new();

        for payload in &payloads {
            let Some((sender, candidates)) = parser::parse_message(payload) else {
                continue;
            };
            report.candidates += candidates.len();
            for candidate in &candidates {
                if let Some(tip) = self.resolver.resolve(candidate, &sender, now) {
                    resolved.push(tip);
                }
            }
        }

        report.tips_written =
            writer::submit(self.sheets.as_ref(), &self.config.spreadsheet_id, &resolved).await?;

        Ok(())
    }

    async fn advance_cursor(&self, position: &str) -> Result<()> {
        self.cursor.set(Cursor::now(position)).await
    }
}
