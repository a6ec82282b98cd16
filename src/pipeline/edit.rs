use crate::constants::MSG_MISSING_CHIP_CODE;
use crate::domain::{ParsedRow, RowStatus};

/// Apply an operator chip-code correction to the row identified by
/// `row_num`. The chip code is the only field an edit may touch after
/// parse; status moves between Warning and Ready accordingly, and an Error
/// row keeps its status and message whatever the new value is.
///
/// Returns false when no row carries that identity.
pub fn apply_chip_code(rows: &mut [ParsedRow], row_num: usize, value: &str) -> bool {
    let Some(row) = rows.iter_mut().find(|r| r.row_num == row_num) else {
        return false;
    };

    let value = value.trim();
    row.chip_code = value.to_string();

    match row.status {
        RowStatus::Warning if !value.is_empty() => {
            row.status = RowStatus::Ready;
            row.error_msg.clear();
        }
        RowStatus::Ready if value.is_empty() && row.error_msg.is_empty() => {
            row.status = RowStatus::Warning;
            row.error_msg = MSG_MISSING_CHIP_CODE.to_string();
        }
        _ => {}
    }

    true
}
