//! Tip parsing: free-text message bodies -> structured tip candidates
//!
//! A tip line carries at least three digit runs (match number, then the two
//! scores) plus an optional joker token, e.g. `"12 2:1 zol"`. Anything that
//! does not fit is logged and skipped; a malformed line or message never
//! aborts the run.

use mailparse::MailAddr;
use tracing::{info, warn};

use crate::types::tip::TipCandidate;
use crate::types::{decode_base64, MessagePayload};

/// Joker spelling variants, matched case-insensitively. Two transliterations
/// of the same word.
pub const JOKER_TOKENS: [&str; 2] = ["zol", "\u{17e}ol"];

/// Required case-insensitive subject substring for a message to count.
const SUBJECT_KEYWORD: &str = "tip";

/// Whether the message's subject admits it into tip parsing.
pub fn subject_accepted(payload: &MessagePayload) -> bool {
    payload
        .header("Subject")
        .map(|s| s.trim().to_lowercase().contains(SUBJECT_KEYWORD))
        .unwrap_or(false)
}

/// Extract the sender address from the From header.
pub fn sender_address(payload: &MessagePayload) -> Option<String> {
    let from = payload.header("From")?;
    match mailparse::addrparse(from) {
        Ok(list) => list.iter().find_map(|addr| match addr {
            MailAddr::Single(single) => Some(single.addr.clone()),
            MailAddr::Group(group) => group.addrs.first().map(|s| s.addr.clone()),
        }),
        Err(e) => {
            warn!("Unparseable From header '{}': {}", from, e);
            None
        }
    }
}

/// Decode the first text/plain part of the message, if any.
pub fn plain_text_body(payload: &MessagePayload) -> Option<String> {
    let part = payload.part("text/plain")?;
    match decode_base64(&part.data) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            warn!("Undecodable body in message {}: {}", payload.id, e);
            None
        }
    }
}

fn digit_runs(line: &str) -> Vec<&str> {
    line.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .collect()
}

/// Parse one line into a candidate.
///
/// Joker detection is independent of digit extraction: the token may sit
/// anywhere in the line. Surplus digit runs beyond the first three are
/// ignored.
pub fn parse_line(line: &str) -> Option<TipCandidate> {
    let lower = line.to_lowercase();
    let joker = JOKER_TOKENS.iter().any(|token| lower.contains(token));

    let runs = digit_runs(line);
    if runs.len() < 3 {
        info!(
            "Line has wrong format with values {:?} - skipping",
            runs
        );
        return None;
    }

    let mut numbers = runs.iter().take(3).map(|run| run.parse::<u32>());
    // Three runs are present; a parse failure here means a digit run too
    // long for u32.
    match (numbers.next(), numbers.next(), numbers.next()) {
        (Some(Ok(match_number)), Some(Ok(score_one)), Some(Ok(score_two))) => Some(TipCandidate {
            match_number,
            score_one,
            score_two,
            joker,
        }),
        _ => {
            warn!("Line has out-of-range numbers: '{}' - skipping", line);
            None
        }
    }
}

/// Parse a whole message into its sender and tip candidates.
///
/// Returns `None` when the message cannot contribute anything: subject
/// without the required keyword, no recognizable From address, or no
/// decodable text/plain part. Each reason is logged; none of them is fatal
/// to the rest of the batch.
pub fn parse_message(payload: &MessagePayload) -> Option<(String, Vec<TipCandidate>)> {
    if !subject_accepted(payload) {
        info!(
            "Message {}: subject '{}' does not include required keyword",
            payload.id,
            payload.header("Subject").unwrap_or("")
        );
        return None;
    }

    let Some(sender) = sender_address(payload) else {
        info!("Message {}: From email not found", payload.id);
        return None;
    };

    let Some(body) = plain_text_body(payload) else {
        info!("Message {}: raw message not found", payload.id);
        return None;
    };

    let candidates = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_line)
        .collect();

    Some((sender, candidates))
}
