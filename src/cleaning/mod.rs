//! Per-entity cleaners: raw [`crate::types::RowSet`] in, typed records out.
//!
//! Cleaners are pure functions. They never raise for expected data shapes:
//! rows that fail a filter are excluded, malformed cells become `None`, and a
//! missing optional column just skips the dependent steps. The single fatal
//! case is an entirely unparsable required date column
//! ([`employees::clean_employees`]).
//!
//! Every date-dependent derivation takes the run date as an explicit `as_of`
//! parameter so reruns and tests are deterministic.
//!
//! Implemented cleaners:
//!
//! - [`employees::clean_employees`]: drop inactive/zero-salary, derive tenure
//!   and salary bucket
//! - [`reviews::clean_reviews`]: sort + keep-last dedup, rating range filter,
//!   derive self-review flag, category, latest rating
//! - [`projects::clean_projects`]: budget filter, derive duration and daily
//!   budget allocation
//! - [`assignments::clean_assignments`]: allocation and date-interval filters
//! - [`departments::clean_departments`]: title-case names, drop exact
//!   duplicates

pub mod assignments;
pub mod departments;
pub mod employees;
pub mod projects;
pub mod reviews;

pub use assignments::clean_assignments;
pub use departments::clean_departments;
pub use employees::clean_employees;
pub use projects::clean_projects;
pub use reviews::clean_reviews;

use chrono::NaiveDate;

use crate::types::Value;

/// Read a cell through an optional column index.
pub(crate) fn cell<'a>(row: &'a [Value], idx: Option<usize>) -> Option<&'a Value> {
    idx.and_then(|i| row.get(i))
}

/// Parse a date cell. Text cells use `YYYY-MM-DD`; already-typed dates pass
/// through; anything else (including malformed text) is `None`.
pub(crate) fn date_cell(row: &[Value], idx: Option<usize>) -> Option<NaiveDate> {
    match cell(row, idx)? {
        Value::Date(d) => Some(*d),
        Value::Utf8(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
        _ => None,
    }
}

/// Round to one decimal place.
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Round to two decimal places.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Title-case a string: uppercase every letter that follows a non-letter,
/// lowercase the rest.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{date_cell, round1, round2, title_case};
    use crate::types::Value;
    use chrono::NaiveDate;

    #[test]
    fn date_cell_parses_iso_text_and_passes_dates_through() {
        let d = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        let row = vec![
            Value::Utf8("2023-06-15".to_string()),
            Value::Date(d),
            Value::Utf8("not a date".to_string()),
            Value::Null,
        ];
        assert_eq!(date_cell(&row, Some(0)), Some(d));
        assert_eq!(date_cell(&row, Some(1)), Some(d));
        assert_eq!(date_cell(&row, Some(2)), None);
        assert_eq!(date_cell(&row, Some(3)), None);
        assert_eq!(date_cell(&row, None), None);
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round1(2.749), 2.7);
        assert_eq!(round1(2.75), 2.8);
        assert_eq!(round2(3.14159), 3.14);
    }

    #[test]
    fn title_case_capitalizes_word_starts() {
        assert_eq!(title_case("human resources"), "Human Resources");
        assert_eq!(title_case("SALES"), "Sales");
        assert_eq!(title_case("r&d"), "R&D");
    }
}
