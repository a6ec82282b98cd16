use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use crate::config::ImportOptions;
use crate::constants::{
    duplicate_bib_msg, MSG_INVALID_GENDER, MSG_MISSING_CHIP_CODE, MSG_MISSING_DATA,
};
use crate::domain::{Gender, ParsedRow, RowStatus};
use crate::pipeline::age_group::{age_group_label, age_on, parse_birth_date};
use crate::pipeline::header::ColumnMap;

/// Validate all data rows in order. Order matters: the duplicate check
/// references the first accepted occurrence of a bib, and only rows that do
/// not end up as errors are registered.
pub fn validate_rows(
    rows: &[Vec<String>],
    columns: &ColumnMap,
    options: &ImportOptions,
    today: NaiveDate,
) -> Vec<ParsedRow> {
    // bib value -> row_num of its first accepted occurrence; never rolled back
    let mut seen_bibs: HashMap<String, usize> = HashMap::new();

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let parsed = validate_row(i + 1, row, columns, options, today, &seen_bibs);
            if parsed.status != RowStatus::Error {
                seen_bibs.entry(parsed.bib.clone()).or_insert(parsed.row_num);
            }
            parsed
        })
        .collect()
}

fn validate_row(
    row_num: usize,
    row: &[String],
    columns: &ColumnMap,
    options: &ImportOptions,
    today: NaiveDate,
    seen_bibs: &HashMap<String, usize>,
) -> ParsedRow {
    let bib = required_field(row, columns.bib);
    let first_name = required_field(row, columns.first_name);
    let last_name = field(row, columns.last_name);
    let gender_raw = field(row, columns.gender);
    let birth_date = field(row, columns.birth_date);
    let nationality = field(row, columns.nationality);
    let chip_code = field(row, columns.chip_code);
    let age_group_raw = field(row, columns.age_group);

    let gender = Gender::from_raw(&gender_raw);

    // Computed bucket only when enabled, a birth date is present, and the
    // gender resolved; otherwise the source column value is carried as-is
    let age_group = if options.auto_age_group && !birth_date.is_empty() {
        parse_birth_date(&birth_date)
            .and_then(|birth| age_group_label(gender, age_on(today, birth)))
            .unwrap_or(age_group_raw)
    } else {
        age_group_raw
    };

    // First matching rule wins; the order is load-bearing
    let (status, error_msg) = if bib.is_empty() || first_name.is_empty() {
        (RowStatus::Error, MSG_MISSING_DATA.to_string())
    } else if gender == Gender::Unknown {
        (RowStatus::Error, MSG_INVALID_GENDER.to_string())
    } else if options.check_duplicate_bib && seen_bibs.contains_key(&bib) {
        (RowStatus::Error, duplicate_bib_msg(seen_bibs[&bib]))
    } else if chip_code.is_empty() {
        (RowStatus::Warning, MSG_MISSING_CHIP_CODE.to_string())
    } else {
        (RowStatus::Ready, String::new())
    };

    if status != RowStatus::Ready {
        debug!(row = row_num, bib = %bib, ?status, msg = %error_msg, "row flagged");
    }

    ParsedRow {
        row_num,
        bib,
        first_name,
        last_name,
        gender,
        birth_date,
        nationality,
        chip_code,
        age_group,
        status,
        error_msg,
    }
}

fn required_field(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

fn field(row: &[String], index: Option<usize>) -> String {
    index.and_then(|i| row.get(i)).cloned().unwrap_or_default()
}
