//! In-memory editing session over the two schedule sets
//!
//! Owns the work and rest data, their branch names, and the undo/redo
//! ledger, and runs the full paste pipeline plus revalidation after
//! every mutation. Persistence is the caller's concern.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classify::{classify_rows, ClassifyOptions};
use crate::columns::detect_header_and_map;
use crate::ledger::{DeletedRow, Ledger, Snapshot};
use crate::models::{RejectedEntry, ScheduleRow, SetKind};
use crate::parse::{detect_branch_name, parse_tabular};
use crate::validate::{validate_rest_days, ValidationSummary};

/// Result of one paste: what got in, what got bounced, and the
/// post-paste validation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteOutcome {
    pub accepted: usize,
    pub rejected: Vec<RejectedEntry>,
    pub summary: ValidationSummary,
}

/// Editable state for one clerk session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub work: Vec<ScheduleRow>,
    pub rest: Vec<ScheduleRow>,
    pub work_branch: String,
    pub rest_branch: String,
    #[serde(default)]
    pub options: ClassifyOptions,
    #[serde(default)]
    pub ledger: Ledger,
}

impl Session {
    #[must_use]
    pub fn new(options: ClassifyOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    fn rows(&self, kind: SetKind) -> &Vec<ScheduleRow> {
        match kind {
            SetKind::Work => &self.work,
            SetKind::Rest => &self.rest,
        }
    }

    fn rows_mut(&mut self, kind: SetKind) -> &mut Vec<ScheduleRow> {
        match kind {
            SetKind::Work => &mut self.work,
            SetKind::Rest => &mut self.rest,
        }
    }

    fn branch_mut(&mut self, kind: SetKind) -> &mut String {
        match kind {
            SetKind::Work => &mut self.work_branch,
            SetKind::Rest => &mut self.rest_branch,
        }
    }

    #[must_use]
    pub fn branch(&self, kind: SetKind) -> &str {
        match kind {
            SetKind::Work => &self.work_branch,
            SetKind::Rest => &self.rest_branch,
        }
    }

    pub fn set_branch(&mut self, kind: SetKind, name: impl Into<String>) {
        *self.branch_mut(kind) = name.into();
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            work: self.work.clone(),
            rest: self.rest.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.work = snapshot.work;
        self.rest = snapshot.rest;
    }

    /// Run the full paste pipeline for `kind` and replace that set.
    ///
    /// The previous state of both sets is snapshotted for undo before
    /// anything changes. A branch marker line in the paste pre-fills
    /// the set's branch name, but never overwrites one already set.
    pub fn paste(&mut self, kind: SetKind, text: &str) -> PasteOutcome {
        if let Some(branch) = detect_branch_name(text) {
            let current = self.branch_mut(kind);
            if current.is_empty() {
                debug!(%branch, set = %kind, "branch name detected in paste");
                *current = branch;
            }
        }

        let grid = parse_tabular(text);
        let mapped = detect_header_and_map(&grid);
        let classified = classify_rows(&mapped.data_rows, &mapped.columns, self.options);

        let before = self.snapshot();
        self.ledger.push_paste(kind, before);
        *self.rows_mut(kind) = classified.accepted;

        let summary = self.revalidate();
        info!(
            set = %kind,
            accepted = self.rows(kind).len(),
            rejected = classified.rejected.len(),
            flagged = summary.flagged,
            "paste applied"
        );

        PasteOutcome {
            accepted: self.rows(kind).len(),
            rejected: classified.rejected,
            summary,
        }
    }

    /// Remove one row by index. Returns the row, or `None` when the
    /// index is out of range.
    pub fn delete_row(&mut self, kind: SetKind, index: usize) -> Option<ScheduleRow> {
        if index >= self.rows(kind).len() {
            return None;
        }
        let row = self.rows_mut(kind).remove(index);
        self.ledger
            .push_delete(kind, DeletedRow { row: row.clone(), index });
        self.revalidate();
        Some(row)
    }

    /// Roll back the most recent paste for `kind`. Returns false when
    /// there is nothing to undo.
    pub fn undo_paste(&mut self, kind: SetKind) -> bool {
        let Some(previous) = self.ledger.pop_paste(kind) else {
            return false;
        };
        let current = self.snapshot();
        self.ledger.push_redo(kind, current);
        self.restore(previous);
        self.revalidate();
        true
    }

    /// Re-apply the most recently undone paste for `kind`.
    pub fn redo_paste(&mut self, kind: SetKind) -> bool {
        let Some(next) = self.ledger.pop_redo(kind) else {
            return false;
        };
        let current = self.snapshot();
        self.ledger.restore_paste(kind, current);
        self.restore(next);
        self.revalidate();
        true
    }

    /// Reinsert the most recently deleted row for `kind` at its
    /// original position.
    pub fn undo_delete(&mut self, kind: SetKind) -> bool {
        let Some(deleted) = self.ledger.pop_delete(kind) else {
            return false;
        };
        let rows = self.rows_mut(kind);
        let index = deleted.index.min(rows.len());
        rows.insert(index, deleted.row);
        self.revalidate();
        true
    }

    /// Empty one set, its branch name included. History is kept so the
    /// clear itself stays undoable via the paste stack.
    pub fn clear(&mut self, kind: SetKind) {
        let before = self.snapshot();
        self.ledger.push_paste(kind, before);
        self.rows_mut(kind).clear();
        self.branch_mut(kind).clear();
        self.revalidate();
    }

    /// Reset everything: both sets, branch names, and all history.
    pub fn clear_all(&mut self) {
        self.work.clear();
        self.rest.clear();
        self.work_branch.clear();
        self.rest_branch.clear();
        self.ledger.clear();
    }

    /// Recompute rest-day conflicts against the current work set.
    pub fn revalidate(&mut self) -> ValidationSummary {
        validate_rest_days(&mut self.rest, &self.work)
    }

    /// Current validation counts without mutating anything but the
    /// conflict annotations.
    pub fn summary(&mut self) -> ValidationSummary {
        self.revalidate()
    }
}
