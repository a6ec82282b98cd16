use serde::{Deserialize, Serialize};

/// Gender as resolved from the source cell. `Unknown` never survives
/// validation: such rows always carry an `Error` status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    /// Normalize a raw cell value: uppercase, then match on the leading
    /// letter. "F", "Female", "f" resolve Female; "M", "Male", "man" resolve
    /// Male; everything else (including empty) is Unknown.
    pub fn from_raw(raw: &str) -> Self {
        let upper = raw.trim().to_uppercase();
        if upper.starts_with('F') {
            Gender::Female
        } else if upper.starts_with('M') {
            Gender::Male
        } else {
            Gender::Unknown
        }
    }
}

/// Validation outcome for one roster row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowStatus {
    /// Importable as-is
    Ready,
    /// Importable but flagged for operator attention
    Warning,
    /// Excluded from import; a chip-code edit never heals this
    Error,
}

/// One validated roster row. Field strings are trimmed; an empty string
/// means the value was absent from the source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedRow {
    /// 1-based position among data rows; stable identity for later edits
    pub row_num: usize,
    pub bib: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: String,
    pub nationality: String,
    pub chip_code: String,
    /// Bucket label, either carried from the source column or computed
    pub age_group: String,
    pub status: RowStatus,
    /// Human-readable reason; empty exactly when status is Ready
    pub error_msg: String,
}
