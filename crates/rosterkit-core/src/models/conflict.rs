//! Conflict findings attached to rest-day rows

use std::fmt;

use serde::{Deserialize, Serialize};

/// Policy violation categories detected by the conflict validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    /// Same employee and date appeared earlier in the rest set
    #[serde(rename = "Duplicate Entry")]
    DuplicateEntry,
    /// Employee has no entry at all in the work set
    #[serde(rename = "Missing Employee")]
    MissingEmployee,
    /// Date field does not parse as a calendar date
    #[serde(rename = "Invalid Date Format")]
    InvalidDate,
    /// Employee is scheduled to work on the same date they rest
    #[serde(rename = "Work Conflict")]
    WorkConflict,
    /// More than one leadership position resting on the same date
    #[serde(rename = "Leadership Conflict")]
    LeadershipConflict,
    /// More than two weekend rest days in one calendar month
    #[serde(rename = "Weekend Limit Exceeded")]
    WeekendLimitExceeded,
}

impl ConflictKind {
    /// Display label, identical to the serialized form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DuplicateEntry => "Duplicate Entry",
            Self::MissingEmployee => "Missing Employee",
            Self::InvalidDate => "Invalid Date Format",
            Self::WorkConflict => "Work Conflict",
            Self::LeadershipConflict => "Leadership Conflict",
            Self::WeekendLimitExceeded => "Weekend Limit Exceeded",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One conflict finding. Advisory, never blocking: rows with conflicts
/// still export, only the user-facing summary changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Violation category
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    /// Human-readable explanation
    #[serde(rename = "reason")]
    pub message: String,
}

impl Conflict {
    /// Create a conflict finding.
    #[must_use]
    pub fn new(kind: ConflictKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_to_display_label() {
        let json = serde_json::to_string(&ConflictKind::WeekendLimitExceeded).unwrap();
        assert_eq!(json, "\"Weekend Limit Exceeded\"");
    }

    #[test]
    fn conflict_uses_original_wire_field_names() {
        let conflict = Conflict::new(ConflictKind::DuplicateEntry, "dup");
        let json = serde_json::to_value(&conflict).unwrap();
        assert_eq!(json["type"], "Duplicate Entry");
        assert_eq!(json["reason"], "dup");
    }
}
