//! Monitoring checklist entry model

use serde::{Deserialize, Serialize};

/// Per-branch checklist/upload status tracked on the monitoring board.
///
/// Wire names match the shared remote document and the original local
/// cache so existing state stays readable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringEntry {
    /// Branch display name, also the lookup key on the board
    #[serde(rename = "name")]
    pub branch_name: String,
    /// Schedule has been reviewed
    #[serde(default)]
    pub checked: bool,
    /// Schedule file has been uploaded to the HR system
    #[serde(default)]
    pub uploaded: bool,
    /// Who performed the upload
    #[serde(rename = "uploadedBy", default)]
    pub uploaded_by: String,
    /// Free-form notes
    #[serde(default)]
    pub remarks: String,
}

impl MonitoringEntry {
    /// New unchecked entry for a branch.
    #[must_use]
    pub fn new(branch_name: impl Into<String>) -> Self {
        Self {
            branch_name: branch_name.into(),
            ..Self::default()
        }
    }
}

/// Seed branches used when no monitoring state exists yet.
#[must_use]
pub fn default_branches() -> Vec<MonitoringEntry> {
    vec![
        MonitoringEntry::new("AASP ABREEZA"),
        MonitoringEntry::new("AASP NES - ATLAS"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_with_wire_names() {
        let mut entry = MonitoringEntry::new("AASP ABREEZA");
        entry.uploaded_by = "clerk".to_string();

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["name"], "AASP ABREEZA");
        assert_eq!(json["uploadedBy"], "clerk");
        assert_eq!(json["checked"], false);
    }

    #[test]
    fn default_branches_are_unchecked() {
        let seeds = default_branches();
        assert_eq!(seeds.len(), 2);
        assert!(seeds.iter().all(|b| !b.checked && !b.uploaded));
    }
}
