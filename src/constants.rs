/// Shared validation messages and payload defaults, kept in one place so the
/// validator, the edit layer, and the tests agree on the exact strings.

// Row-level validation messages
pub const MSG_MISSING_DATA: &str = "Missing data";
pub const MSG_INVALID_GENDER: &str = "Invalid gender";
pub const MSG_MISSING_CHIP_CODE: &str = "Missing Chip Code";

// Submission payload defaults
pub const DEFAULT_LAST_NAME: &str = "-";
pub const DEFAULT_NATIONALITY: &str = "THA";

// Timing status stamped on every imported participant; unrelated to the
// row's validation status
pub const TIMING_STATUS_NOT_STARTED: &str = "not started";

/// Duplicate-bib message referencing the first accepted occurrence
pub fn duplicate_bib_msg(first_row: usize) -> String {
    format!("Duplicate BIB (row {})", first_row)
}
