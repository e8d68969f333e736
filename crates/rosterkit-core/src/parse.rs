//! Tabular text parser for clipboard pastes
//!
//! Turns an unstructured text blob into a grid of trimmed cell strings,
//! inferring the field delimiter from a sample of the leading lines.
//! Rows may have differing lengths; downstream consumers index
//! defensively.

use std::sync::LazyLock;

use regex::Regex;

/// Spreadsheet/report printing artifacts, not data.
static NOISE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(sheet|page|total|subtotal|page\s*\d+)").expect("Invalid regex")
});

/// Column-aligned plain text splits on runs of 2+ whitespace.
static MULTI_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("Invalid regex"));

static BRANCH_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)branch\s*[:\-]\s*(.+)").expect("Invalid regex"));

/// How many retained lines are sampled for delimiter inference.
const DELIMITER_SAMPLE_LINES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Tab,
    Comma,
    MultiSpace,
}

/// Parse pasted text into a grid of trimmed cell strings.
///
/// Lines are trimmed, empty lines and noise lines (`Sheet`, `Page`,
/// `Total`, `Subtotal`, `Page N` prefixes) are dropped, then every
/// retained line is split on the inferred delimiter. Delimiters are
/// checked in priority order: tab, comma, 2+-whitespace runs.
#[must_use]
pub fn parse_tabular(text: &str) -> Vec<Vec<String>> {
    let normalized = text.replace('\r', "");
    let lines: Vec<&str> = normalized
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !NOISE_LINE.is_match(line))
        .collect();

    if lines.is_empty() {
        return Vec::new();
    }

    let delimiter = infer_delimiter(&lines);
    lines
        .iter()
        .map(|line| split_line(line, delimiter))
        .collect()
}

fn infer_delimiter(lines: &[&str]) -> Delimiter {
    let sample = &lines[..lines.len().min(DELIMITER_SAMPLE_LINES)];
    if sample.iter().any(|line| line.contains('\t')) {
        Delimiter::Tab
    } else if sample.iter().any(|line| line.contains(',')) {
        Delimiter::Comma
    } else {
        Delimiter::MultiSpace
    }
}

fn split_line(line: &str, delimiter: Delimiter) -> Vec<String> {
    match delimiter {
        Delimiter::Tab => line.split('\t').map(str::trim).map(String::from).collect(),
        Delimiter::Comma => line.split(',').map(str::trim).map(String::from).collect(),
        Delimiter::MultiSpace => MULTI_SPACE
            .split(line)
            .map(str::trim)
            .map(String::from)
            .collect(),
    }
}

/// Pull a branch name out of a `Branch: X` / `Branch - X` line, if any.
///
/// Used to pre-fill the per-set branch name from a paste.
#[must_use]
pub fn detect_branch_name(text: &str) -> Option<String> {
    BRANCH_LINE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_input_yields_empty_grid() {
        assert!(parse_tabular("").is_empty());
        assert!(parse_tabular("  \n\r\n \t \n").is_empty());
    }

    #[test]
    fn noise_lines_are_dropped() {
        let grid = parse_tabular("Sheet 1\nPage 2\nTOTAL\nSubtotal: 4\nJohn\t123\n");
        assert_eq!(grid, vec![vec!["John".to_string(), "123".to_string()]]);
    }

    #[test]
    fn noise_only_input_yields_empty_grid() {
        assert!(parse_tabular("Sheet1\npage 3\n").is_empty());
    }

    #[test]
    fn tab_wins_over_comma() {
        let grid = parse_tabular("a\tb,c\nd\te,f");
        assert_eq!(grid[0], vec!["a", "b,c"]);
    }

    #[test]
    fn comma_delimited_lines_split_on_comma() {
        let grid = parse_tabular("John Smith,12345,01/02/24");
        assert_eq!(grid[0], vec!["John Smith", "12345", "01/02/24"]);
    }

    #[test]
    fn column_aligned_text_splits_on_whitespace_runs() {
        let grid = parse_tabular("John Smith   12345   01/02/24");
        assert_eq!(grid[0], vec!["John Smith", "12345", "01/02/24"]);
    }

    #[test]
    fn delimiter_independence_for_identical_logical_data() {
        let tabbed = parse_tabular("John Smith\t12345\t01/02/24\nJane Roe\t54321\t01/03/24");
        let comma = parse_tabular("John Smith,12345,01/02/24\nJane Roe,54321,01/03/24");
        assert_eq!(tabbed, comma);
    }

    #[test]
    fn ragged_rows_keep_their_own_length() {
        let grid = parse_tabular("a\tb\tc\nd\te");
        assert_eq!(grid[0].len(), 3);
        assert_eq!(grid[1].len(), 2);
    }

    #[test]
    fn detect_branch_name_finds_labelled_line() {
        assert_eq!(
            detect_branch_name("Branch: AASP ABREEZA\nname\t123"),
            Some("AASP ABREEZA".to_string())
        );
        assert_eq!(
            detect_branch_name("branch - Uptown"),
            Some("Uptown".to_string())
        );
        assert_eq!(detect_branch_name("no marker here"), None);
    }
}
