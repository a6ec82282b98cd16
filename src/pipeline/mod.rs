// Roster processing pipeline: tokenization, header resolution, validation,
// editing, and payload construction

pub mod age_group;
pub mod edit;
pub mod header;
pub mod payload;
pub mod tokenizer;
pub mod validator;

use chrono::NaiveDate;
use tracing::info;

use crate::config::ImportOptions;
use crate::domain::ParsedRow;
use crate::error::Result;

/// Run the synchronous half of the pipeline on an uploaded text blob:
/// tokenize, resolve the header, validate every data row. `today` anchors
/// the age-group arithmetic; callers pass the current date.
///
/// A missing bib or firstName column fails the whole file with zero parsed
/// rows; everything row-level is encoded in the returned statuses.
pub fn parse_roster(
    text: &str,
    options: &ImportOptions,
    today: NaiveDate,
) -> Result<Vec<ParsedRow>> {
    let mut rows = tokenizer::tokenize(text);
    if rows.is_empty() {
        // No header row at all reads the same as unresolvable columns
        return Err(crate::error::ImportError::MissingColumns(
            "bib, firstName".to_string(),
        ));
    }

    let header_row = rows.remove(0);
    let columns = header::ColumnMap::resolve(&header_row)?;
    let parsed = validator::validate_rows(&rows, &columns, options, today);
    info!(rows = parsed.len(), "roster parsed");
    Ok(parsed)
}
