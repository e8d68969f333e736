//! Field normalization: canonical dates and weekday derivation
//!
//! Dates are canonicalized to `MM/DD/YY` text. Unrecognized values are
//! returned unchanged so the conflict validator can flag them instead
//! of the pipeline silently dropping rows.

use std::sync::LazyLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;

/// Month/day/year with `/`, `.` or `-` separators.
static MDY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{2,4})$").expect("Invalid regex")
});

const WEEKDAY_PREFIXES: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Additional formats attempted when a value is neither a serial nor
/// an `M/D/Y` string.
const FALLBACK_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Common spreadsheet date epoch. Day 1 is 1899-12-31, which
/// intentionally over-counts by the historical 1900 leap-year bug;
/// replicated exactly for compatibility with pasted serials.
fn spreadsheet_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("valid epoch")
}

/// Canonicalize a date-ish cell to `MM/DD/YY`.
///
/// Weekday-looking values pass through unchanged (they are not dates),
/// integers above 10000 are treated as spreadsheet serials, `M/D/Y`
/// strings are zero-padded with the year truncated to two digits, and
/// anything else goes through a generic format list. Unparseable input
/// is returned as-is.
#[must_use]
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let lowered = trimmed.to_lowercase();
    if WEEKDAY_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
    {
        return trimmed.to_string();
    }

    if let Ok(serial) = trimmed.parse::<i64>() {
        if serial > 10_000 {
            if let Some(date) = spreadsheet_epoch().checked_add_signed(Duration::days(serial)) {
                return date.format("%m/%d/%y").to_string();
            }
            return trimmed.to_string();
        }
    }

    if let Some(caps) = MDY.captures(trimmed) {
        let year = &caps[3];
        let year = if year.len() == 4 { &year[2..] } else { year };
        return format!("{:0>2}/{:0>2}/{year}", &caps[1], &caps[2]);
    }

    parse_flexible(trimmed).map_or_else(
        || trimmed.to_string(),
        |date| date.format("%m/%d/%y").to_string(),
    )
}

/// Parse any supported date text into a calendar date.
///
/// Two-digit years are read as 20YY. Returns `None` for values that do
/// not form a real calendar date (e.g. `02/30/24`).
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = MDY.captures(trimmed) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let mut year: i32 = caps[3].parse().ok()?;
        if caps[3].len() == 2 {
            year += 2000;
        }
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    parse_flexible(trimmed)
}

/// Full weekday name for a date string, or empty when unparseable.
#[must_use]
pub fn day_name_from_date(date_str: &str) -> String {
    parse_date(date_str).map_or_else(String::new, |date| date.format("%A").to_string())
}

/// True iff the trimmed string is one or more ASCII digits.
#[must_use]
pub fn is_numeric_str(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.bytes().all(|byte| byte.is_ascii_digit())
}

fn parse_flexible(value: &str) -> Option<NaiveDate> {
    FALLBACK_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn four_digit_year_truncates_and_pads() {
        assert_eq!(normalize_date("1/2/2024"), "01/02/24");
        assert_eq!(normalize_date("12-31-2025"), "12/31/25");
        assert_eq!(normalize_date("3.7.24"), "03/07/24");
    }

    #[test]
    fn weekday_values_pass_through() {
        assert_eq!(normalize_date("Monday"), "Monday");
        assert_eq!(normalize_date("  sat  "), "sat");
    }

    #[test]
    fn spreadsheet_serials_convert_from_shared_epoch() {
        // Serial 44927 is 2023-01-01 in the 1900 date system.
        assert_eq!(normalize_date("44927"), "01/01/23");
        assert_eq!(normalize_date("45000"), "03/15/23");
    }

    #[test]
    fn serial_normalization_is_idempotent() {
        let once = normalize_date("45000");
        assert_eq!(normalize_date(&once), once);
    }

    #[test]
    fn small_integers_are_not_serials() {
        assert_eq!(normalize_date("9999"), "9999");
    }

    #[test]
    fn iso_dates_canonicalize() {
        assert_eq!(normalize_date("2024-03-10"), "03/10/24");
    }

    #[test]
    fn unparseable_values_return_unchanged() {
        assert_eq!(normalize_date("next friday-ish"), "next friday-ish");
    }

    #[test]
    fn parse_date_rejects_impossible_calendar_dates() {
        assert!(parse_date("02/30/24").is_none());
        assert!(parse_date("13/01/24").is_none());
        assert!(parse_date("02/29/24").is_some());
    }

    #[test]
    fn day_name_from_normalized_date() {
        assert_eq!(day_name_from_date("01/02/24"), "Tuesday");
        assert_eq!(day_name_from_date("03/10/24"), "Sunday");
        assert_eq!(day_name_from_date("not a date"), "");
    }

    #[test]
    fn is_numeric_str_requires_digits_only() {
        assert!(is_numeric_str(" 12345 "));
        assert!(!is_numeric_str("12a45"));
        assert!(!is_numeric_str(""));
        assert!(!is_numeric_str("  "));
    }
}
