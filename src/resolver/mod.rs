//! Candidate validation: player lookup, match lookup, deadline enforcement
//!
//! Resolution is a pure per-candidate function; candidates never affect each
//! other and every rejection is logged and non-fatal.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{info, warn};

use crate::reference::{MatchSchedule, PlayerIndex};
use crate::types::tip::{ResolvedTip, TipCandidate};

/// Validates candidates against the reference tables and binds survivors to
/// a concrete cell range.
#[derive(Debug, Clone)]
pub struct MatchResolver {
    players: PlayerIndex,
    schedule: MatchSchedule,
    tz: Tz,
}

impl MatchResolver {
    pub fn new(players: PlayerIndex, schedule: MatchSchedule, tz: Tz) -> Self {
        Self {
            players,
            schedule,
            tz,
        }
    }

    /// Resolve one candidate, or drop it with a log line.
    pub fn resolve(
        &self,
        candidate: &TipCandidate,
        sender: &str,
        now: DateTime<Utc>,
    ) -> Option<ResolvedTip> {
        let Some(player_row) = self.players.row_for(sender) else {
            info!("Player {} not found", sender);
            return None;
        };

        let Some(m) = self.schedule.get(candidate.match_number) else {
            info!("Match {} not found", candidate.match_number);
            return None;
        };

        // A civil time can be skipped or repeated across a DST transition;
        // no single instant exists then, so the tip is dropped.
        let Some(start) = self.tz.from_local_datetime(&m.start).single() else {
            warn!(
                "Match {} start {} is ambiguous in {}",
                candidate.match_number, m.start, self.tz
            );
            return None;
        };

        if now > start.with_timezone(&Utc) {
            info!(
                "Cannot create tip for player {} and match {} because it already started at {}",
                sender, candidate.match_number, m.start
            );
            return None;
        }

        Some(ResolvedTip {
            candidate: candidate.clone(),
            player_row,
            player_email: sender.to_string(),
            range: m.range_for_row(player_row),
        })
    }
}
