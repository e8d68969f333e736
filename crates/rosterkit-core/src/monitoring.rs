//! Upload monitoring board
//!
//! A flat list of branches with per-branch checked/uploaded marks.
//! Entries are addressed by branch name; names are unique by
//! convention, and operations touch the first match.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::MonitoringEntry;

/// Duration of the animated progress transition, in milliseconds.
pub const PROGRESS_TWEEN_MS: u64 = 600;

/// Which per-branch mark feeds the progress percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBasis {
    /// Fraction of branches marked uploaded
    #[default]
    Uploaded,
    /// Fraction of branches marked checked
    Checked,
}

impl FromStr for ProgressBasis {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "uploaded" => Ok(Self::Uploaded),
            "checked" => Ok(Self::Checked),
            other => Err(format!("unknown progress basis: {other}")),
        }
    }
}

impl fmt::Display for ProgressBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uploaded => "uploaded",
            Self::Checked => "checked",
        })
    }
}

/// Board counts plus the derived percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitoringStats {
    pub total: usize,
    pub checked: usize,
    pub uploaded: usize,
    /// Whole-number percentage on the configured basis; 0 for an
    /// empty board
    pub percent: u32,
}

/// Compute board statistics on the given basis.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
pub fn stats(entries: &[MonitoringEntry], basis: ProgressBasis) -> MonitoringStats {
    let total = entries.len();
    let checked = entries.iter().filter(|entry| entry.checked).count();
    let uploaded = entries.iter().filter(|entry| entry.uploaded).count();

    let done = match basis {
        ProgressBasis::Uploaded => uploaded,
        ProgressBasis::Checked => checked,
    };
    let percent = if total == 0 {
        0
    } else {
        ((done as f64 / total as f64) * 100.0).round() as u32
    };

    MonitoringStats {
        total,
        checked,
        uploaded,
        percent,
    }
}

/// Interpolated percentage at `elapsed_ms` into the transition from
/// `from` to `to`. Clamps at `to` once the tween window has passed.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
pub fn progress_at(from: u32, to: u32, elapsed_ms: u64) -> u32 {
    if elapsed_ms >= PROGRESS_TWEEN_MS {
        return to;
    }
    let fraction = elapsed_ms as f64 / PROGRESS_TWEEN_MS as f64;
    let value = f64::from(from) + (f64::from(to) - f64::from(from)) * fraction;
    value.round() as u32
}

fn find_mut<'a>(entries: &'a mut [MonitoringEntry], branch: &str) -> Option<&'a mut MonitoringEntry> {
    entries.iter_mut().find(|entry| entry.branch_name == branch)
}

/// Append a branch. Returns false when the name already exists.
pub fn add_branch(entries: &mut Vec<MonitoringEntry>, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || entries.iter().any(|entry| entry.branch_name == name) {
        return false;
    }
    entries.push(MonitoringEntry::new(name));
    true
}

/// Rename a branch in place. Returns false when `from` is absent or
/// `to` already exists.
pub fn rename_branch(entries: &mut [MonitoringEntry], from: &str, to: &str) -> bool {
    let to = to.trim();
    if to.is_empty() || entries.iter().any(|entry| entry.branch_name == to) {
        return false;
    }
    match find_mut(entries, from) {
        Some(entry) => {
            entry.branch_name = to.to_string();
            true
        }
        None => false,
    }
}

/// Remove a branch by name. Returns false when absent.
pub fn remove_branch(entries: &mut Vec<MonitoringEntry>, name: &str) -> bool {
    let before = entries.len();
    entries.retain(|entry| entry.branch_name != name);
    entries.len() != before
}

/// Set the checked mark. Returns false when the branch is absent.
pub fn set_checked(entries: &mut [MonitoringEntry], branch: &str, checked: bool) -> bool {
    match find_mut(entries, branch) {
        Some(entry) => {
            entry.checked = checked;
            true
        }
        None => false,
    }
}

/// Set the uploaded mark and who set it. Clearing the mark clears the
/// attribution too.
pub fn set_uploaded(
    entries: &mut [MonitoringEntry],
    branch: &str,
    uploaded: bool,
    by: &str,
) -> bool {
    match find_mut(entries, branch) {
        Some(entry) => {
            entry.uploaded = uploaded;
            entry.uploaded_by = if uploaded { by.to_string() } else { String::new() };
            true
        }
        None => false,
    }
}

/// Replace the free-text remarks. Returns false when the branch is
/// absent.
pub fn set_remarks(entries: &mut [MonitoringEntry], branch: &str, remarks: &str) -> bool {
    match find_mut(entries, branch) {
        Some(entry) => {
            entry.remarks = remarks.to_string();
            true
        }
        None => false,
    }
}
