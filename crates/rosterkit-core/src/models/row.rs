//! Schedule row model and rejection records

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Conflict;

/// Which schedule set a row or operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetKind {
    /// Shift assignments for specific dates
    Work,
    /// Official off-duty dates, validated against the work set
    Rest,
}

impl SetKind {
    /// Key used for this set in the local durable cache.
    #[must_use]
    pub const fn cache_key(self) -> &'static str {
        match self {
            Self::Work => "workScheduleData",
            Self::Rest => "restDayData",
        }
    }

    /// Human label used in banners and summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Work => "work schedule",
            Self::Rest => "rest day",
        }
    }
}

impl fmt::Display for SetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One accepted schedule entry (work shift or rest day).
///
/// Field names on the wire match the original cache/document format so
/// state persisted by older clients stays readable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Employee display name
    #[serde(default)]
    pub name: String,
    /// Digits-only employee number after normalization
    #[serde(rename = "empNo", default)]
    pub employee_id: String,
    /// Canonical MM/DD/YY date text; non-empty for accepted rows when
    /// the strict acceptance rule is enabled
    #[serde(default)]
    pub date: String,
    /// Raw shift code as pasted
    #[serde(default)]
    pub shift: String,
    /// Full weekday name, derived from the date when absent
    #[serde(rename = "day", default)]
    pub weekday: String,
    /// Job title, used by the leadership rest-day policy
    #[serde(default)]
    pub position: String,
    /// Conflict findings; recomputed wholesale on every validation pass
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<Conflict>,
}

impl ScheduleRow {
    /// True when at least one conflict is attached.
    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// A pasted row that failed the acceptance rules.
///
/// Shown to the user in the paste summary, then discarded; rejected
/// rows are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedEntry {
    /// Original cells, in paste order
    pub raw_row: Vec<String>,
    /// Human-readable rejection reasons
    pub reasons: Vec<String>,
}

impl RejectedEntry {
    /// Original row joined for display, matching the paste summary format.
    #[must_use]
    pub fn joined(&self) -> String {
        self.raw_row.join(" | ")
    }
}
