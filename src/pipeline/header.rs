use crate::error::{ImportError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Canonical field slots a header cell can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Slot {
    Bib,
    FirstName,
    LastName,
    Gender,
    BirthDate,
    Nationality,
    ChipCode,
    AgeGroup,
}

/// Alias catalog, built once. Keys are header cells after normalization
/// (lowercased, whitespace removed).
static HEADER_ALIASES: Lazy<HashMap<&'static str, Slot>> = Lazy::new(|| {
    let entries: &[(&str, Slot)] = &[
        ("bib", Slot::Bib),
        ("bibno", Slot::Bib),
        ("bibnumber", Slot::Bib),
        ("firstname", Slot::FirstName),
        ("first_name", Slot::FirstName),
        ("fname", Slot::FirstName),
        ("name", Slot::FirstName),
        ("lastname", Slot::LastName),
        ("last_name", Slot::LastName),
        ("lname", Slot::LastName),
        ("surname", Slot::LastName),
        ("gender", Slot::Gender),
        ("sex", Slot::Gender),
        ("birthdate", Slot::BirthDate),
        ("dob", Slot::BirthDate),
        ("birth_date", Slot::BirthDate),
        ("dateofbirth", Slot::BirthDate),
        ("nationality", Slot::Nationality),
        ("nat", Slot::Nationality),
        ("country", Slot::Nationality),
        ("chipcode", Slot::ChipCode),
        ("chip", Slot::ChipCode),
        ("rfid", Slot::ChipCode),
        ("rfidtag", Slot::ChipCode),
        ("chip_code", Slot::ChipCode),
        ("agegroup", Slot::AgeGroup),
        ("age_group", Slot::AgeGroup),
    ];
    entries.iter().copied().collect()
});

/// Mapping from canonical field to the zero-based column index it was found
/// at. Built once from the header row; immutable afterward. Absence of bib
/// or firstName is a whole-file failure, so those two are not optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub bib: usize,
    pub first_name: usize,
    pub last_name: Option<usize>,
    pub gender: Option<usize>,
    pub birth_date: Option<usize>,
    pub nationality: Option<usize>,
    pub chip_code: Option<usize>,
    pub age_group: Option<usize>,
}

impl ColumnMap {
    /// Resolve a header row against the alias catalog. The first cell that
    /// matches a slot wins for that slot.
    pub fn resolve(header: &[String]) -> Result<Self> {
        let mut found: HashMap<Slot, usize> = HashMap::new();
        for (index, cell) in header.iter().enumerate() {
            if let Some(slot) = HEADER_ALIASES.get(normalize_cell(cell).as_str()) {
                found.entry(*slot).or_insert(index);
            }
        }

        let bib = found.get(&Slot::Bib).copied();
        let first_name = found.get(&Slot::FirstName).copied();
        match (bib, first_name) {
            (Some(bib), Some(first_name)) => Ok(Self {
                bib,
                first_name,
                last_name: found.get(&Slot::LastName).copied(),
                gender: found.get(&Slot::Gender).copied(),
                birth_date: found.get(&Slot::BirthDate).copied(),
                nationality: found.get(&Slot::Nationality).copied(),
                chip_code: found.get(&Slot::ChipCode).copied(),
                age_group: found.get(&Slot::AgeGroup).copied(),
            }),
            _ => {
                let mut missing = Vec::new();
                if bib.is_none() {
                    missing.push("bib");
                }
                if first_name.is_none() {
                    missing.push("firstName");
                }
                Err(ImportError::MissingColumns(missing.join(", ")))
            }
        }
    }
}

fn normalize_cell(cell: &str) -> String {
    cell.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
