//! Column mapper: decide which column index holds which semantic field
//!
//! Works with or without a header row. The rules run in a fixed
//! priority order; changing it changes which column wins a tie, so the
//! order is part of the contract:
//!
//! 1. empty grid: nothing to map
//! 2. single row: classify cells by content
//! 3. explicit header row within the first 6 rows
//! 4. column-type scoring over a sample of rows
//! 5. positional defaults

use std::sync::LazyLock;

use regex::Regex;

/// Rows scanned when looking for an explicit header.
const HEADER_SCAN_ROWS: usize = 6;
/// Rows sampled for column-type scoring.
const SCORE_SAMPLE_ROWS: usize = 8;

static EMP_NO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3,6}$").expect("Invalid regex"));
static DATE_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}|\d{5}|\d{4}-\d{2}-\d{2})$")
        .expect("Invalid regex")
});
static SHIFT_MARK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)am|pm|to|[-–:]").expect("Invalid regex"));
static DAY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(mon|tue|wed|thu|fri|sat|sun)").expect("Invalid regex"));
static NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s,.'\-]{3,}$").expect("Invalid regex"));

/// Any of these keywords in a cell marks a candidate header row. Word
/// boundaries keep weekday data cells from matching ("tuesday" ends in
/// "day" but is not a label).
static HEADER_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:name|fullname|employee|branch|position|shift|day)\b")
        .expect("Invalid regex")
});

/// Per-field keyword patterns, matched against header cells with
/// whitespace/separators stripped and lowercased.
static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"name|fullname|employeename").expect("Invalid regex"));
static FIELD_EMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"emp|employeenumber|idnum|id").expect("Invalid regex"));
static FIELD_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"date|workdate|sched|schedule").expect("Invalid regex"));
static FIELD_SHIFT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"shift|time|duty").expect("Invalid regex"));
static FIELD_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"day|daytype|typeday").expect("Invalid regex"));
static FIELD_POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"position|title|role").expect("Invalid regex"));

/// Column index for each semantic field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: usize,
    pub employee_id: usize,
    pub date: usize,
    pub shift: usize,
    pub day: usize,
    pub position: usize,
}

impl ColumnMap {
    /// Positional defaults used when a field cannot be resolved.
    #[must_use]
    pub const fn positional() -> Self {
        Self {
            name: 0,
            employee_id: 1,
            date: 2,
            shift: 3,
            day: 4,
            position: 5,
        }
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self::positional()
    }
}

/// Result of header detection and column mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedGrid {
    /// Index of the consumed header row; `None` when every row is data
    pub header_index: Option<usize>,
    /// Data rows (the header row, when found, is excluded)
    pub data_rows: Vec<Vec<String>>,
    /// Resolved field-to-column mapping
    pub columns: ColumnMap,
}

/// Inspect a parsed grid and resolve header/data rows plus the column map.
#[must_use]
pub fn detect_header_and_map(rows: &[Vec<String>]) -> MappedGrid {
    if rows.is_empty() {
        return MappedGrid {
            header_index: None,
            data_rows: Vec::new(),
            columns: ColumnMap::positional(),
        };
    }

    if rows.len() == 1 {
        return map_single_row(&rows[0]);
    }

    if let Some(header_index) = find_header_row(rows) {
        let columns = map_from_header(&rows[header_index]);
        let after_header: Vec<Vec<String>> = rows[header_index + 1..]
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .cloned()
            .collect();
        // A header with nothing under it is more likely mislabeled data.
        let data_rows = if after_header.is_empty() {
            rows.to_vec()
        } else {
            after_header
        };
        return MappedGrid {
            header_index: Some(header_index),
            data_rows,
            columns,
        };
    }

    map_by_column_scores(rows)
}

/// Cell matches a 3-6 digit employee number.
pub(crate) fn is_employee_no(cell: &str) -> bool {
    EMP_NO.is_match(cell)
}

/// Cell matches an `M/D/Y` date, a 5-digit spreadsheet serial, or ISO.
pub(crate) fn is_date_like(cell: &str) -> bool {
    DATE_LIKE.is_match(cell)
}

/// Cell contains digits plus a shift marker (am/pm/to/:/-).
pub(crate) fn is_shift_like(cell: &str) -> bool {
    cell.chars().any(|c| c.is_ascii_digit()) && SHIFT_MARK.is_match(cell)
}

/// Cell starts with a 3-letter weekday abbreviation.
pub(crate) fn is_day_like(cell: &str) -> bool {
    DAY_PREFIX.is_match(cell)
}

/// Cell is at least two words of letters and name punctuation.
pub(crate) fn looks_like_name(cell: &str) -> bool {
    NAME_CHARS.is_match(cell) && cell.split_whitespace().count() >= 2
}

/// Single-row grids have no header/data split: classify cells directly
/// by content and treat the row as data.
fn map_single_row(row: &[String]) -> MappedGrid {
    let cells: Vec<String> = row.iter().map(|cell| cell.trim().to_string()).collect();

    let mut name = None;
    let mut employee_id = None;
    let mut date = None;
    let mut shift = None;
    let mut day = None;

    for (index, cell) in cells.iter().enumerate() {
        if cell.is_empty() {
            continue;
        }
        if is_employee_no(cell) {
            employee_id = Some(index);
        } else if is_date_like(cell) {
            date = Some(index);
        } else if is_shift_like(cell) {
            shift = Some(index);
        } else if is_day_like(cell) {
            day = Some(index);
        } else if looks_like_name(cell) {
            name = Some(index);
        }
    }

    let defaults = ColumnMap::positional();
    MappedGrid {
        header_index: None,
        data_rows: vec![cells],
        columns: ColumnMap {
            name: name.unwrap_or(defaults.name),
            employee_id: employee_id.unwrap_or(defaults.employee_id),
            date: date.unwrap_or(defaults.date),
            shift: shift.unwrap_or(defaults.shift),
            day: day.unwrap_or(defaults.day),
            position: defaults.position,
        },
    }
}

/// First row within the scan window that reads like a header.
fn find_header_row(rows: &[Vec<String>]) -> Option<usize> {
    for (index, row) in rows.iter().take(HEADER_SCAN_ROWS).enumerate() {
        let lowered: Vec<String> = row.iter().map(|cell| cell.to_lowercase()).collect();
        let has_emp = lowered.iter().any(|cell| cell.contains("emp"));
        let has_date = lowered.iter().any(|cell| cell.contains("date"));
        if has_emp && has_date {
            return Some(index);
        }
        if lowered.iter().any(|cell| HEADER_KEYWORDS.is_match(cell)) {
            return Some(index);
        }
    }
    None
}

/// Resolve fields from an explicit header row by keyword matching;
/// unresolved fields fall back to positional defaults.
fn map_from_header(header: &[String]) -> ColumnMap {
    let normalized: Vec<String> = header.iter().map(|cell| normalize_header_cell(cell)).collect();

    let find = |pattern: &Regex| normalized.iter().position(|cell| pattern.is_match(cell));
    let defaults = ColumnMap::positional();

    ColumnMap {
        name: find(&FIELD_NAME).unwrap_or(defaults.name),
        employee_id: find(&FIELD_EMP).unwrap_or(defaults.employee_id),
        date: find(&FIELD_DATE).unwrap_or(defaults.date),
        shift: find(&FIELD_SHIFT).unwrap_or(defaults.shift),
        day: find(&FIELD_DAY).unwrap_or(defaults.day),
        position: find(&FIELD_POSITION).unwrap_or(defaults.position),
    }
}

fn normalize_header_cell(cell: &str) -> String {
    cell.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '_' | '-' | '/' | '\\' | '.'))
        .collect::<String>()
        .to_lowercase()
}

#[derive(Debug, Default, Clone, Copy)]
struct ColumnScore {
    numeric: u32,
    date: u32,
    shift: u32,
    day: u32,
    name: u32,
}

/// No explicit header: score each column by how many sampled cells
/// match each field type, pick the leftmost best column per field.
fn map_by_column_scores(rows: &[Vec<String>]) -> MappedGrid {
    let sample = &rows[..rows.len().min(SCORE_SAMPLE_ROWS)];
    let column_count = sample.iter().map(Vec::len).max().unwrap_or(0);

    let mut scores = vec![ColumnScore::default(); column_count];
    for row in sample {
        for (index, cell) in row.iter().enumerate() {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            let score = &mut scores[index];
            if is_employee_no(cell) {
                score.numeric += 1;
            }
            if is_date_like(cell) {
                score.date += 1;
            }
            if is_shift_like(cell) {
                score.shift += 1;
            }
            if is_day_like(cell) {
                score.day += 1;
            }
            if looks_like_name(cell) {
                score.name += 1;
            }
        }
    }

    let employee_id = pick_best(&scores, |score| score.numeric);
    let date = pick_best(&scores, |score| score.date);

    // Scoring is trusted only when it located an employee-number or
    // date column; otherwise everything falls back to positional.
    if employee_id.is_none() && date.is_none() {
        return MappedGrid {
            header_index: None,
            data_rows: rows.to_vec(),
            columns: ColumnMap::positional(),
        };
    }

    let defaults = ColumnMap::positional();
    MappedGrid {
        header_index: None,
        data_rows: rows.to_vec(),
        columns: ColumnMap {
            name: pick_best(&scores, |score| score.name).unwrap_or(defaults.name),
            employee_id: employee_id.unwrap_or(defaults.employee_id),
            date: date.unwrap_or(defaults.date),
            shift: pick_best(&scores, |score| score.shift).unwrap_or(defaults.shift),
            day: pick_best(&scores, |score| score.day).unwrap_or(defaults.day),
            position: defaults.position,
        },
    }
}

/// Leftmost column with the highest non-zero count.
fn pick_best(scores: &[ColumnScore], field: impl Fn(&ColumnScore) -> u32) -> Option<usize> {
    let mut best = None;
    let mut best_score = 0;
    for (index, score) in scores.iter().enumerate() {
        let value = field(score);
        if value > best_score {
            best_score = value;
            best = Some(index);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }

    #[test]
    fn empty_grid_maps_to_nothing() {
        let mapped = detect_header_and_map(&[]);
        assert_eq!(mapped.header_index, None);
        assert!(mapped.data_rows.is_empty());
    }

    #[test]
    fn explicit_header_row_is_consumed() {
        let rows = grid(&[
            &["Name", "Emp No", "Date", "Shift", "Day", "Position"],
            &["John Smith", "12345", "01/02/24", "AM", "Tuesday", "Cashier"],
        ]);
        let mapped = detect_header_and_map(&rows);
        assert_eq!(mapped.header_index, Some(0));
        assert_eq!(mapped.data_rows.len(), 1);
        assert_eq!(mapped.columns, ColumnMap::positional());
    }

    #[test]
    fn shuffled_header_resolves_by_keyword() {
        let rows = grid(&[
            &["Work Date", "Employee Number", "Full Name"],
            &["01/02/24", "12345", "John Smith"],
        ]);
        let mapped = detect_header_and_map(&rows);
        assert_eq!(mapped.header_index, Some(0));
        assert_eq!(mapped.columns.date, 0);
        assert_eq!(mapped.columns.employee_id, 1);
        assert_eq!(mapped.columns.name, 2);
    }

    #[test]
    fn first_qualifying_header_wins() {
        let rows = grid(&[
            &["Shift Report"],
            &["Name", "Emp No", "Date"],
            &["John Smith", "12345", "01/02/24"],
        ]);
        // "Shift Report" matches the keyword scan before the real header.
        let mapped = detect_header_and_map(&rows);
        assert_eq!(mapped.header_index, Some(0));
    }

    #[test]
    fn bare_day_header_cell_qualifies() {
        let rows = grid(&[&["Day", "Date"], &["Tuesday", "01/02/24"]]);
        let mapped = detect_header_and_map(&rows);
        assert_eq!(mapped.header_index, Some(0));
        assert_eq!(mapped.columns.day, 0);
        assert_eq!(mapped.columns.date, 1);
    }

    #[test]
    fn weekday_cells_do_not_make_a_data_row_a_header() {
        let rows = grid(&[
            &["John Smith", "12345", "01/02/24", "AM", "Tuesday", "Cashier"],
            &["Jane Roe", "54321", "01/03/24", "PM", "Wednesday", "OIC"],
        ]);
        let mapped = detect_header_and_map(&rows);
        assert_eq!(mapped.header_index, None);
        assert_eq!(mapped.data_rows.len(), 2);
    }

    #[test]
    fn headerless_numeric_data_maps_by_scoring() {
        let rows = grid(&[
            &["01/02/24", "John Smith", "12345"],
            &["01/03/24", "Jane Roe", "54321"],
        ]);
        let mapped = detect_header_and_map(&rows);
        assert_eq!(mapped.header_index, None);
        assert_eq!(mapped.data_rows.len(), 2);
        assert_eq!(mapped.columns.date, 0);
        assert_eq!(mapped.columns.name, 1);
        assert_eq!(mapped.columns.employee_id, 2);
    }

    #[test]
    fn scoring_ties_break_leftmost() {
        // Both columns are date-like in every sampled row.
        let rows = grid(&[&["01/02/24", "01/03/24"], &["02/02/24", "02/03/24"]]);
        let mapped = detect_header_and_map(&rows);
        assert_eq!(mapped.columns.date, 0);
    }

    #[test]
    fn unscoreable_grid_falls_back_to_positional() {
        let rows = grid(&[&["alpha", "beta"], &["gamma", "delta"]]);
        let mapped = detect_header_and_map(&rows);
        assert_eq!(mapped.header_index, None);
        assert_eq!(mapped.columns, ColumnMap::positional());
        assert_eq!(mapped.data_rows.len(), 2);
    }

    #[test]
    fn single_row_is_sniffed_by_content() {
        let rows = grid(&[&["12345", "John Smith", "01/02/24", "7am-3pm", "Tue"]]);
        let mapped = detect_header_and_map(&rows);
        assert_eq!(mapped.header_index, None);
        assert_eq!(mapped.columns.employee_id, 0);
        assert_eq!(mapped.columns.name, 1);
        assert_eq!(mapped.columns.date, 2);
        assert_eq!(mapped.columns.shift, 3);
        assert_eq!(mapped.columns.day, 4);
    }

    #[test]
    fn blank_rows_after_header_are_dropped() {
        let rows = grid(&[
            &["Name", "Emp No", "Date"],
            &["", "", ""],
            &["John Smith", "12345", "01/02/24"],
        ]);
        let mapped = detect_header_and_map(&rows);
        assert_eq!(mapped.data_rows.len(), 1);
        assert_eq!(mapped.data_rows[0][0], "John Smith");
    }

    #[test]
    fn header_with_no_data_falls_back_to_all_rows() {
        let rows = grid(&[&["Name", "Emp No", "Date"], &["", "", ""]]);
        let mapped = detect_header_and_map(&rows);
        assert_eq!(mapped.data_rows.len(), 2);
    }

    #[test]
    fn cell_predicates() {
        assert!(is_employee_no("123"));
        assert!(is_employee_no("123456"));
        assert!(!is_employee_no("12"));
        assert!(!is_employee_no("1234567"));

        assert!(is_date_like("1/2/24"));
        assert!(is_date_like("45000"));
        assert!(is_date_like("2024-03-10"));
        assert!(!is_date_like("tomorrow"));

        assert!(is_shift_like("7am-3pm"));
        assert!(is_shift_like("09:00 to 17:00"));
        assert!(!is_shift_like("AM")); // no digits

        assert!(is_day_like("Tuesday"));
        assert!(is_day_like("sat"));
        assert!(!is_day_like("yesterday"));

        assert!(looks_like_name("John Smith"));
        assert!(looks_like_name("O'Neil, Mary-Anne"));
        assert!(!looks_like_name("John"));
        assert!(!looks_like_name("J3 Smith"));
    }
}
