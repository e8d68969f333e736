//! Conflict validator for the rest-day set
//!
//! Runs over the rest-day rows with the work set as a read-only
//! reference. Conflicts are transient: every pass clears and recomputes
//! them wholesale, so the validator must re-run after any mutation to
//! either set.

use std::collections::{HashMap, HashSet};

use crate::models::{Conflict, ConflictKind, ScheduleRow};
use crate::normalize::parse_date;

/// Job titles subject to the one-leader-resting-per-date policy.
pub const LEADERSHIP_POSITIONS: [&str; 3] = ["Branch Head", "Site Supervisor", "OIC"];

/// Weekend rest days allowed per employee per calendar month.
pub const WEEKEND_LIMIT: u32 = 2;

/// Counts surfaced in the user-facing summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Rest-day rows examined
    pub total: usize,
    /// Rows carrying at least one conflict
    pub flagged: usize,
}

impl ValidationSummary {
    /// Summary line shown after a validation pass.
    #[must_use]
    pub fn message(&self) -> String {
        if self.total == 0 {
            String::new()
        } else if self.flagged == 0 {
            format!("No conflicts detected for {} entries.", self.total)
        } else {
            format!(
                "{} out of {} entries have conflicts detected.",
                self.flagged, self.total
            )
        }
    }
}

/// Annotate every rest-day row with its conflict findings.
///
/// A row may accumulate several distinct kinds in one pass; all
/// applicable kinds are attached, not just the first match.
pub fn validate_rest_days(rest: &mut [ScheduleRow], work: &[ScheduleRow]) -> ValidationSummary {
    for row in rest.iter_mut() {
        row.conflicts.clear();
    }

    let work_lookup: HashSet<(&str, &str)> = work
        .iter()
        .map(|row| (row.employee_id.as_str(), row.date.trim()))
        .collect();
    let work_employees: HashSet<&str> =
        work.iter().map(|row| row.employee_id.as_str()).collect();

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut rest_by_date: HashMap<String, Vec<usize>> = HashMap::new();
    // (employee, MM/YYYY) -> weekend rest-day count
    let mut weekend_counts: HashMap<(String, String), u32> = HashMap::new();

    for (index, row) in rest.iter_mut().enumerate() {
        let key = (row.employee_id.clone(), row.date.trim().to_string());
        rest_by_date.entry(row.date.clone()).or_default().push(index);

        // Only occurrences after the first are duplicates.
        if !seen.insert(key.clone()) {
            row.conflicts.push(Conflict::new(
                ConflictKind::DuplicateEntry,
                "Duplicate rest day entry for same employee & date.",
            ));
        }

        if !work_employees.contains(row.employee_id.as_str()) {
            row.conflicts.push(Conflict::new(
                ConflictKind::MissingEmployee,
                "Employee not found in Work Schedule data.",
            ));
        }

        let parsed = parse_date(&row.date);
        if parsed.is_none() {
            row.conflicts.push(Conflict::new(
                ConflictKind::InvalidDate,
                "Date format unrecognized.",
            ));
        }

        if work_lookup.contains(&(key.0.as_str(), key.1.as_str())) {
            row.conflicts.push(Conflict::new(
                ConflictKind::WorkConflict,
                "Employee has a work schedule on same date.",
            ));
        }

        if is_weekend(&row.weekday) {
            if let Some(date) = parsed {
                let month_key = (row.employee_id.clone(), date.format("%m/%Y").to_string());
                *weekend_counts.entry(month_key).or_insert(0) += 1;
            }
        }
    }

    apply_leadership_conflicts(rest, &rest_by_date);
    apply_weekend_limits(rest, &weekend_counts);

    let flagged = rest.iter().filter(|row| row.has_conflicts()).count();
    ValidationSummary {
        total: rest.len(),
        flagged,
    }
}

fn is_weekend(weekday: &str) -> bool {
    let lowered = weekday.to_lowercase();
    lowered.contains("saturday") || lowered.contains("sunday")
}

fn is_leadership(position: &str) -> bool {
    LEADERSHIP_POSITIONS.contains(&position)
}

/// More than one leader resting on the same date flags every leader in
/// that date group, not just the extras.
fn apply_leadership_conflicts(rest: &mut [ScheduleRow], rest_by_date: &HashMap<String, Vec<usize>>) {
    for indices in rest_by_date.values() {
        let leaders: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&index| is_leadership(&rest[index].position))
            .collect();
        if leaders.len() > 1 {
            for index in leaders {
                rest[index].conflicts.push(Conflict::new(
                    ConflictKind::LeadershipConflict,
                    "Multiple leaders have same rest day.",
                ));
            }
        }
    }
}

/// Over-limit months flag every weekend row for that employee in that
/// month, with the actual count in the message.
fn apply_weekend_limits(rest: &mut [ScheduleRow], weekend_counts: &HashMap<(String, String), u32>) {
    for ((employee, month_year), count) in weekend_counts {
        if *count <= WEEKEND_LIMIT {
            continue;
        }
        for row in rest.iter_mut() {
            if row.employee_id != *employee || !is_weekend(&row.weekday) {
                continue;
            }
            let same_month = parse_date(&row.date)
                .is_some_and(|date| date.format("%m/%Y").to_string() == *month_year);
            if same_month {
                row.conflicts.push(Conflict::new(
                    ConflictKind::WeekendLimitExceeded,
                    format!("{count} weekend rest days, maximum is {WEEKEND_LIMIT}."),
                ));
            }
        }
    }
}
