//! Batch writer: resolved tips -> one spreadsheet update request
//!
//! Each tip becomes one row write at its bound range. The sheet row is ten
//! columns wide; only the two score cells and the joker cell are filled, the
//! rest stay untouched (null).

use serde_json::{json, Value};
use tracing::info;

use crate::adapters::SheetWriter;
use crate::types::error::Result;
use crate::types::tip::ResolvedTip;
use crate::types::{BatchUpdateRequest, ValueRange};

/// Values are applied as if typed by a user (number formats, formulas).
pub const VALUE_INPUT_OPTION: &str = "USER_ENTERED";

/// Literal written to the joker column.
pub const JOKER_MARK: &str = "Z";

fn value_range(tip: &ResolvedTip) -> ValueRange {
    let row = vec![
        json!(tip.candidate.score_one),
        Value::Null,
        json!(tip.candidate.score_two),
        Value::Null,
        Value::Null,
        Value::Null,
        Value::Null,
        Value::Null,
        Value::Null,
        json!(if tip.candidate.joker { JOKER_MARK } else { "" }),
    ];

    ValueRange {
        range: tip.range.clone(),
        values: vec![row],
    }
}

/// Assemble the batched update for a set of resolved tips.
pub fn build_request(tips: &[ResolvedTip]) -> BatchUpdateRequest {
    BatchUpdateRequest {
        value_input_option: VALUE_INPUT_OPTION.to_string(),
        data: tips.iter().map(value_range).collect(),
    }
}

/// Submit all tips in one batched call. Returns the number written.
///
/// Skipped entirely when there is nothing to write. Atomicity across the
/// batch is the spreadsheet service's own guarantee; no rollback is added
/// here.
pub async fn submit(
    sheets: &dyn SheetWriter,
    spreadsheet_id: &str,
    tips: &[ResolvedTip],
) -> Result<usize> {
    if tips.is_empty() {
        return Ok(0);
    }

    sheets
        .batch_update(spreadsheet_id, build_request(tips))
        .await?;

    for tip in tips {
        info!(
            "Tip player {} for match {} in {} with score {}:{} successfully inserted",
            tip.player_email,
            tip.candidate.match_number,
            tip.range,
            tip.candidate.score_one,
            tip.candidate.score_two
        );
    }

    Ok(tips.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tip::TipCandidate;

    fn tip(joker: bool) -> ResolvedTip {
        ResolvedTip {
            candidate: TipCandidate {
                match_number: 3,
                score_one: 2,
                score_two: 1,
                joker,
            },
            player_row: 5,
            player_email: "a@x.com".into(),
            range: "Sheet1!A5".into(),
        }
    }

    #[test]
    fn row_layout_is_ten_columns_with_scores_and_joker() {
        let request = build_request(&[tip(true)]);
        assert_eq!(request.value_input_option, VALUE_INPUT_OPTION);
        assert_eq!(request.data.len(), 1);
        assert_eq!(request.data[0].range, "Sheet1!A5");

        let row = &request.data[0].values[0];
        assert_eq!(row.len(), 10);
        assert_eq!(row[0], json!(2));
        assert_eq!(row[1], Value::Null);
        assert_eq!(row[2], json!(1));
        assert_eq!(row[9], json!("Z"));
    }

    #[test]
    fn joker_column_is_empty_string_without_joker() {
        let request = build_request(&[tip(false)]);
        assert_eq!(request.data[0].values[0][9], json!(""));
    }

    #[test]
    fn one_value_range_per_tip() {
        let request = build_request(&[tip(false), tip(true)]);
        assert_eq!(request.data.len(), 2);
    }
}
