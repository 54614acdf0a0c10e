use serde::{Deserialize, Serialize};

/// One score prediction parsed from a single line of a message body.
///
/// Not yet validated: the match number may be unknown and the sender may not
/// be a registered player. The resolver decides that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipCandidate {
    pub match_number: u32,
    pub score_one: u32,
    pub score_two: u32,
    /// Double-or-nothing marker, detected from the joker tokens in the line.
    pub joker: bool,
}

/// A candidate that passed validation, bound to a concrete cell range.
///
/// This is the unit handed to the batch writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTip {
    pub candidate: TipCandidate,
    pub player_row: u32,
    pub player_email: String,
    /// Concrete range with the row substituted in, e.g. `Sheet1!A5`.
    pub range: String,
}
