use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LAST_NAME, DEFAULT_NATIONALITY, TIMING_STATUS_NOT_STARTED};
use crate::domain::{Gender, ParsedRow, RowStatus};
use crate::error::Result;

/// Wire shape the bulk-insert collaborator expects, one per participant.
/// `status` here is the timing status every import starts in, not the
/// validation status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub bib: String,
    pub first_name: String,
    pub last_name: String,
    /// "M" or "F"; Unknown never reaches the payload
    pub gender: String,
    pub category: String,
    pub nationality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chip_code: Option<String>,
    pub status: String,
}

/// Serialize the importable rows (Ready and Warning; Error rows are
/// permanently excluded) into submission records for the chosen category.
pub fn build_payload(rows: &[ParsedRow], category: &str) -> Vec<ParticipantRecord> {
    rows.iter()
        .filter(|row| row.status != RowStatus::Error)
        .map(|row| ParticipantRecord {
            bib: row.bib.clone(),
            first_name: row.first_name.clone(),
            last_name: non_empty_or(&row.last_name, DEFAULT_LAST_NAME),
            gender: match row.gender {
                Gender::Female => "F".to_string(),
                _ => "M".to_string(),
            },
            category: category.to_string(),
            nationality: non_empty_or(&row.nationality, DEFAULT_NATIONALITY),
            birth_date: optional(&row.birth_date),
            age_group: optional(&row.age_group),
            chip_code: optional(&row.chip_code),
            status: TIMING_STATUS_NOT_STARTED.to_string(),
        })
        .collect()
}

/// Pretty-printed JSON rendering of a batch, exactly as it would go out on
/// the wire. Used by dry runs.
pub fn render_json(batch: &[ParticipantRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(batch)?)
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(row_num: usize, status: RowStatus) -> ParsedRow {
        ParsedRow {
            row_num,
            bib: format!("{}", 100 + row_num),
            first_name: "Anan".to_string(),
            last_name: String::new(),
            gender: Gender::Male,
            birth_date: String::new(),
            nationality: String::new(),
            chip_code: String::new(),
            age_group: String::new(),
            status,
            error_msg: String::new(),
        }
    }

    #[test]
    fn payload_holds_exactly_the_ready_and_warning_rows() {
        let rows = vec![
            row(1, RowStatus::Ready),
            row(2, RowStatus::Error),
            row(3, RowStatus::Warning),
            row(4, RowStatus::Error),
        ];
        let payload = build_payload(&rows, "10K");
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0].bib, "101");
        assert_eq!(payload[1].bib, "103");
    }

    #[test]
    fn defaults_applied_for_last_name_and_nationality() {
        let payload = build_payload(&[row(1, RowStatus::Ready)], "10K");
        assert_eq!(payload[0].last_name, "-");
        assert_eq!(payload[0].nationality, "THA");
        assert_eq!(payload[0].status, "not started");
        assert_eq!(payload[0].category, "10K");
    }

    #[test]
    fn female_maps_to_f_everything_else_to_m() {
        let mut female = row(1, RowStatus::Ready);
        female.gender = Gender::Female;
        let payload = build_payload(&[female, row(2, RowStatus::Ready)], "5K");
        assert_eq!(payload[0].gender, "F");
        assert_eq!(payload[1].gender, "M");
    }

    #[test]
    fn empty_optionals_are_omitted_from_the_wire_shape() {
        let payload = build_payload(&[row(1, RowStatus::Ready)], "10K");
        let json = serde_json::to_value(&payload[0]).unwrap();
        assert!(json.get("birthDate").is_none());
        assert!(json.get("ageGroup").is_none());
        assert!(json.get("chipCode").is_none());
        // Wire names are camelCase
        assert_eq!(json["firstName"], "Anan");
        assert_eq!(json["lastName"], "-");
    }

    #[test]
    fn render_json_shows_the_wire_shape() {
        let rendered = render_json(&build_payload(&[row(1, RowStatus::Ready)], "10K")).unwrap();
        assert!(rendered.contains("\"firstName\": \"Anan\""));
        assert!(rendered.contains("\"status\": \"not started\""));
        assert!(!rendered.contains("chipCode"));
    }

    #[test]
    fn present_optionals_are_serialized() {
        let mut full = row(1, RowStatus::Ready);
        full.birth_date = "1990-01-20".to_string();
        full.age_group = "M 30-39".to_string();
        full.chip_code = "CHIP01".to_string();
        let json = serde_json::to_value(&build_payload(&[full], "10K")[0]).unwrap();
        assert_eq!(json["birthDate"], "1990-01-20");
        assert_eq!(json["ageGroup"], "M 30-39");
        assert_eq!(json["chipCode"], "CHIP01");
    }
}
