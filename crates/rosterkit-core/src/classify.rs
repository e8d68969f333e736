//! Row classifier: build semantic records and apply acceptance rules

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::columns::ColumnMap;
use crate::models::{RejectedEntry, ScheduleRow};
use crate::normalize::{day_name_from_date, normalize_date};

/// A mapped "day" cell that is actually a date, not a weekday name.
static DAY_CELL_IS_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[\d/.\-]{6,}|\d{4}-\d{2}-\d{2})$").expect("Invalid regex")
});

/// Last-resort scavenging patterns for rows where the mapped columns
/// came up empty.
static EMP_ANYWHERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3,}$").expect("Invalid regex"));
static NAME_ANYWHERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("Invalid regex"));
static DATE_ANYWHERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/.\-]|^\d{5}$").expect("Invalid regex"));

/// Decorative report banners that end up in the rejection list; split
/// out of the user-facing summary.
static DECORATIVE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(WORK\s*SCHEDULE|REST\s*DAY|TOTAL|SUMMARY|PAGE|PREPARED)")
        .expect("Invalid regex")
});

pub const REASON_INVALID_EMPLOYEE: &str = "Missing or invalid Employee No";
pub const REASON_MISSING_DATE: &str = "Invalid or missing Date";

/// Acceptance-rule knobs; see `AppConfig`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyOptions {
    /// Also require a non-empty normalized date (the stricter rule
    /// from earlier pipeline variants)
    #[serde(default)]
    pub require_date: bool,
}

/// Classification output: accepted rows in paste order plus rejections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub accepted: Vec<ScheduleRow>,
    pub rejected: Vec<RejectedEntry>,
}

impl Classified {
    /// Rejections worth showing to the user, with decorative report
    /// banner rows filtered out.
    #[must_use]
    pub fn informative_rejections(&self) -> Vec<&RejectedEntry> {
        self.rejected
            .iter()
            .filter(|entry| !is_decorative_rejection(entry))
            .collect()
    }
}

/// True for report banner rows ("WORK SCHEDULE", "PREPARED BY", page
/// footers) that fail classification but carry no information.
#[must_use]
pub fn is_decorative_rejection(entry: &RejectedEntry) -> bool {
    DECORATIVE_ROW.is_match(&entry.joined())
}

/// Build a `ScheduleRow` per data row and separate accepted from
/// rejected.
///
/// The employee-number field must be letter-free and strip down to 2-6
/// digits; rows failing that (or missing a date under the strict rule)
/// are rejected with human-readable reasons and never enter the
/// schedule set.
#[must_use]
pub fn classify_rows(
    data_rows: &[Vec<String>],
    columns: &ColumnMap,
    options: ClassifyOptions,
) -> Classified {
    let mut classified = Classified::default();

    for row in data_rows {
        let (candidate, employee_raw) = build_candidate(row, columns);

        let mut reasons = Vec::new();
        if !valid_employee_field(&employee_raw, &candidate.employee_id) {
            reasons.push(REASON_INVALID_EMPLOYEE.to_string());
        }
        if options.require_date && candidate.date.is_empty() {
            reasons.push(REASON_MISSING_DATE.to_string());
        }

        if reasons.is_empty() {
            classified.accepted.push(candidate);
        } else {
            classified.rejected.push(RejectedEntry {
                raw_row: row.clone(),
                reasons,
            });
        }
    }

    classified
}

/// Employee field is valid when it carries no letters (a letter-bearing
/// value is a code, not an employee number) and its digits run 2-6 long.
fn valid_employee_field(raw: &str, digits: &str) -> bool {
    !raw.chars().any(|c| c.is_ascii_alphabetic()) && (2..=6).contains(&digits.len())
}

fn build_candidate(row: &[String], columns: &ColumnMap) -> (ScheduleRow, String) {
    let cell = |index: usize| row.get(index).map_or("", |value| value.trim());

    let name = cell(columns.name).to_string();
    let employee_raw = cell(columns.employee_id).to_string();
    let date = normalize_date(cell(columns.date));
    let shift = cell(columns.shift).to_string();
    let day = cell(columns.day).to_string();
    let position = cell(columns.position).to_string();

    let (name, employee_raw, date) = scavenge_missing(row, name, employee_raw, date);
    let weekday = resolve_weekday(&day, &date);

    let candidate = ScheduleRow {
        name,
        employee_id: digits_only(&employee_raw),
        date,
        shift,
        weekday,
        position,
        conflicts: Vec::new(),
    };
    (candidate, employee_raw)
}

/// When the detected "day" cell is itself a date, convert it; when the
/// day is missing but a date exists, derive it.
fn resolve_weekday(day: &str, date: &str) -> String {
    if !day.is_empty() && DAY_CELL_IS_DATE.is_match(day) {
        let derived = day_name_from_date(&normalize_date(day));
        if !derived.is_empty() {
            return derived;
        }
    }
    if day.is_empty() && !date.is_empty() {
        return day_name_from_date(date);
    }
    day.to_string()
}

/// Mapped columns can point at blanks in ragged pastes; scan the whole
/// row for plausible employee/name/date cells before giving up.
fn scavenge_missing(
    row: &[String],
    name: String,
    employee_raw: String,
    date: String,
) -> (String, String, String) {
    let mut name = name;
    let mut employee_raw = employee_raw;
    let mut date = date;

    if employee_raw.len() < 3 {
        if let Some(found) = row.iter().find(|cell| EMP_ANYWHERE.is_match(cell.trim())) {
            employee_raw = found.trim().to_string();
        }
    }
    if name.is_empty() {
        if let Some(found) = row.iter().find(|cell| {
            NAME_ANYWHERE.is_match(cell.trim()) && cell.split_whitespace().count() >= 2
        }) {
            name = found.trim().to_string();
        }
    }
    // The employee cell itself matches the 5-digit date pattern; skip it.
    if date.is_empty() {
        if let Some(found) = row.iter().find(|cell| {
            let trimmed = cell.trim();
            trimmed != employee_raw && DATE_ANYWHERE.is_match(trimmed)
        }) {
            date = normalize_date(found);
        }
    }

    (name, employee_raw, date)
}

fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }

    #[test]
    fn well_formed_work_row_is_accepted() {
        let data = rows(&[&["John Smith", "12345", "01/02/24", "AM", "Tuesday", "Cashier"]]);
        let result = classify_rows(&data, &ColumnMap::positional(), ClassifyOptions::default());

        assert_eq!(result.rejected.len(), 0);
        assert_eq!(result.accepted.len(), 1);
        let row = &result.accepted[0];
        assert_eq!(row.name, "John Smith");
        assert_eq!(row.employee_id, "12345");
        assert_eq!(row.date, "01/02/24");
        assert_eq!(row.shift, "AM");
        assert_eq!(row.weekday, "Tuesday");
        assert_eq!(row.position, "Cashier");
    }

    #[test]
    fn non_numeric_employee_id_is_rejected() {
        let data = rows(&[&["Jane Doe", "AB12", "01/02/24"]]);
        let result = classify_rows(&data, &ColumnMap::positional(), ClassifyOptions::default());

        assert!(result.accepted.is_empty());
        assert_eq!(result.rejected.len(), 1);
        assert_eq!(result.rejected[0].reasons, vec![REASON_INVALID_EMPLOYEE]);
        assert_eq!(result.rejected[0].joined(), "Jane Doe | AB12 | 01/02/24");
    }

    #[test]
    fn employee_id_strips_separators() {
        let data = rows(&[&["Jane Doe", "12-345", "01/02/24"]]);
        let result = classify_rows(&data, &ColumnMap::positional(), ClassifyOptions::default());
        assert_eq!(result.accepted[0].employee_id, "12345");
    }

    #[test]
    fn letter_bearing_employee_field_is_rejected() {
        let data = rows(&[&["Jane Doe", "EMP4521", "01/02/24"]]);
        let result = classify_rows(&data, &ColumnMap::positional(), ClassifyOptions::default());
        assert!(result.accepted.is_empty());
        assert_eq!(result.rejected[0].reasons, vec![REASON_INVALID_EMPLOYEE]);
    }

    #[test]
    fn seven_digit_employee_id_is_rejected() {
        let data = rows(&[&["Jane Doe", "1234567", "01/02/24"]]);
        let result = classify_rows(&data, &ColumnMap::positional(), ClassifyOptions::default());
        assert!(result.accepted.is_empty());
    }

    #[test]
    fn weekday_derived_from_date_when_missing() {
        let data = rows(&[&["John Smith", "12345", "01/02/24", "AM"]]);
        let result = classify_rows(&data, &ColumnMap::positional(), ClassifyOptions::default());
        assert_eq!(result.accepted[0].weekday, "Tuesday");
    }

    #[test]
    fn date_shaped_day_cell_is_rederived() {
        let data = rows(&[&["John Smith", "12345", "01/02/24", "AM", "01/02/2024"]]);
        let result = classify_rows(&data, &ColumnMap::positional(), ClassifyOptions::default());
        assert_eq!(result.accepted[0].weekday, "Tuesday");
    }

    #[test]
    fn strict_rule_rejects_missing_date() {
        let data = rows(&[&["John Smith", "12345", "", "AM"]]);
        let options = ClassifyOptions { require_date: true };
        let result = classify_rows(&data, &ColumnMap::positional(), options);

        assert!(result.accepted.is_empty());
        assert_eq!(result.rejected[0].reasons, vec![REASON_MISSING_DATE]);
    }

    #[test]
    fn permissive_rule_accepts_missing_date() {
        let data = rows(&[&["John Smith", "12345", "", "AM"]]);
        let result = classify_rows(&data, &ColumnMap::positional(), ClassifyOptions::default());
        assert_eq!(result.accepted.len(), 1);
        assert_eq!(result.accepted[0].date, "");
    }

    #[test]
    fn scavenges_fields_from_misaligned_rows() {
        // Employee number and date live in unmapped columns.
        let data = rows(&[&["", "", "", "John Smith", "12345", "01/02/24"]]);
        let result = classify_rows(&data, &ColumnMap::positional(), ClassifyOptions::default());

        assert_eq!(result.accepted.len(), 1);
        let row = &result.accepted[0];
        assert_eq!(row.employee_id, "12345");
        assert_eq!(row.name, "John Smith");
        assert_eq!(row.date, "01/02/24");
    }

    #[test]
    fn decorative_rows_are_filtered_from_summary() {
        let data = rows(&[&["WORK SCHEDULE"], &["PREPARED BY: admin"], &["Jane Doe", "x"]]);
        let result = classify_rows(&data, &ColumnMap::positional(), ClassifyOptions::default());

        assert_eq!(result.rejected.len(), 3);
        let informative = result.informative_rejections();
        assert_eq!(informative.len(), 1);
        assert_eq!(informative[0].joined(), "Jane Doe | x");
    }

    #[test]
    fn short_rows_index_defensively() {
        let data = rows(&[&["John Smith"]]);
        let result = classify_rows(&data, &ColumnMap::positional(), ClassifyOptions::default());
        assert!(result.accepted.is_empty());
        assert_eq!(result.rejected.len(), 1);
    }
}
