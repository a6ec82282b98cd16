use crate::domain::Gender;
use chrono::{Datelike, NaiveDate};

/// Birth date formats accepted from roster exports, tried in order.
const BIRTH_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y"];

pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    BIRTH_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Age in whole years as of `today`: year difference, minus one when
/// today's month/day precedes the birth month/day.
pub fn age_on(today: NaiveDate, birth: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

fn bucket_for_age(age: i32) -> &'static str {
    match age {
        a if a < 18 => "U18",
        18..=29 => "18-29",
        30..=39 => "30-39",
        40..=49 => "40-49",
        50..=59 => "50-59",
        60..=69 => "60-69",
        _ => "70+",
    }
}

/// Gender-prefixed bucket label, e.g. "M 30-39". None for Unknown gender:
/// those rows never get a computed bucket.
pub fn age_group_label(gender: Gender, age: i32) -> Option<String> {
    let prefix = match gender {
        Gender::Female => "F",
        Gender::Male => "M",
        Gender::Unknown => return None,
    };
    Some(format!("{} {}", prefix, bucket_for_age(age)))
}
