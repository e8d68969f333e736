//! Undo/redo ledger for paste and delete operations
//!
//! Each schedule set keeps three independent stacks: paste undo, paste
//! redo, and deleted rows. Pushing a new paste snapshot invalidates the
//! redo stack for that set; popping an empty stack is a benign no-op.

use serde::{Deserialize, Serialize};

use crate::models::{ScheduleRow, SetKind};

/// Full copy of both schedule sets at a point in time.
///
/// Snapshots are deep copies, so later edits never mutate history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub work: Vec<ScheduleRow>,
    pub rest: Vec<ScheduleRow>,
}

/// A removed row together with the position it was removed from, so
/// undo can reinsert it where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedRow {
    pub row: ScheduleRow,
    pub index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct KindStacks {
    paste_undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
    deletes: Vec<DeletedRow>,
}

/// Per-set operation history. Serialized alongside the schedule data so
/// history survives process restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    work: KindStacks,
    rest: KindStacks,
}

impl Ledger {
    fn stacks_mut(&mut self, kind: SetKind) -> &mut KindStacks {
        match kind {
            SetKind::Work => &mut self.work,
            SetKind::Rest => &mut self.rest,
        }
    }

    fn stacks(&self, kind: SetKind) -> &KindStacks {
        match kind {
            SetKind::Work => &self.work,
            SetKind::Rest => &self.rest,
        }
    }

    /// Record the pre-paste state for `kind`. Clears that set's redo
    /// stack, since the new paste forks history.
    pub fn push_paste(&mut self, kind: SetKind, snapshot: Snapshot) {
        let stacks = self.stacks_mut(kind);
        stacks.paste_undo.push(snapshot);
        stacks.redo.clear();
    }

    /// Pop the most recent paste snapshot for `kind`.
    pub fn pop_paste(&mut self, kind: SetKind) -> Option<Snapshot> {
        self.stacks_mut(kind).paste_undo.pop()
    }

    /// Record the state being undone so redo can restore it. Does not
    /// clear the redo stack.
    pub fn push_redo(&mut self, kind: SetKind, snapshot: Snapshot) {
        self.stacks_mut(kind).redo.push(snapshot);
    }

    /// Pop the most recent redo snapshot for `kind`.
    pub fn pop_redo(&mut self, kind: SetKind) -> Option<Snapshot> {
        self.stacks_mut(kind).redo.pop()
    }

    /// Re-record a paste snapshot without touching the redo stack; used
    /// when a redo re-applies a previously undone paste.
    pub fn restore_paste(&mut self, kind: SetKind, snapshot: Snapshot) {
        self.stacks_mut(kind).paste_undo.push(snapshot);
    }

    /// Record a single-row removal for `kind`.
    pub fn push_delete(&mut self, kind: SetKind, deleted: DeletedRow) {
        self.stacks_mut(kind).deletes.push(deleted);
    }

    /// Pop the most recent removal for `kind`.
    pub fn pop_delete(&mut self, kind: SetKind) -> Option<DeletedRow> {
        self.stacks_mut(kind).deletes.pop()
    }

    #[must_use]
    pub fn can_undo_paste(&self, kind: SetKind) -> bool {
        !self.stacks(kind).paste_undo.is_empty()
    }

    #[must_use]
    pub fn can_redo_paste(&self, kind: SetKind) -> bool {
        !self.stacks(kind).redo.is_empty()
    }

    #[must_use]
    pub fn can_undo_delete(&self, kind: SetKind) -> bool {
        !self.stacks(kind).deletes.is_empty()
    }

    /// Drop all history for both sets.
    pub fn clear(&mut self) {
        self.work = KindStacks::default();
        self.rest = KindStacks::default();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn snapshot(tag: &str) -> Snapshot {
        Snapshot {
            work: vec![ScheduleRow {
                name: tag.to_string(),
                ..ScheduleRow::default()
            }],
            rest: Vec::new(),
        }
    }

    #[test]
    fn stacks_are_independent_per_set() {
        let mut ledger = Ledger::default();
        ledger.push_paste(SetKind::Work, snapshot("w"));

        assert!(ledger.can_undo_paste(SetKind::Work));
        assert!(!ledger.can_undo_paste(SetKind::Rest));
    }

    #[test]
    fn new_paste_clears_redo_for_that_set() {
        let mut ledger = Ledger::default();
        ledger.push_redo(SetKind::Work, snapshot("undone"));
        ledger.push_redo(SetKind::Rest, snapshot("other"));

        ledger.push_paste(SetKind::Work, snapshot("fresh"));

        assert!(!ledger.can_redo_paste(SetKind::Work));
        assert!(ledger.can_redo_paste(SetKind::Rest));
    }

    #[test]
    fn restore_paste_keeps_redo_intact() {
        let mut ledger = Ledger::default();
        ledger.push_redo(SetKind::Work, snapshot("next"));

        ledger.restore_paste(SetKind::Work, snapshot("prev"));
        assert!(ledger.can_redo_paste(SetKind::Work));
        assert!(ledger.can_undo_paste(SetKind::Work));
    }

    #[test]
    fn empty_pops_are_benign() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.pop_paste(SetKind::Work), None);
        assert_eq!(ledger.pop_redo(SetKind::Rest), None);
        assert_eq!(ledger.pop_delete(SetKind::Work), None);
    }

    #[test]
    fn pops_come_back_in_reverse_order() {
        let mut ledger = Ledger::default();
        ledger.push_paste(SetKind::Rest, snapshot("first"));
        ledger.push_paste(SetKind::Rest, snapshot("second"));

        assert_eq!(ledger.pop_paste(SetKind::Rest), Some(snapshot("second")));
        assert_eq!(ledger.pop_paste(SetKind::Rest), Some(snapshot("first")));
    }

    #[test]
    fn delete_stack_keeps_row_and_index() {
        let mut ledger = Ledger::default();
        let deleted = DeletedRow {
            row: ScheduleRow {
                employee_id: "123".to_string(),
                ..ScheduleRow::default()
            },
            index: 4,
        };
        ledger.push_delete(SetKind::Work, deleted.clone());
        assert_eq!(ledger.pop_delete(SetKind::Work), Some(deleted));
    }

    #[test]
    fn clear_drops_everything() {
        let mut ledger = Ledger::default();
        ledger.push_paste(SetKind::Work, snapshot("w"));
        ledger.push_delete(
            SetKind::Rest,
            DeletedRow {
                row: ScheduleRow::default(),
                index: 0,
            },
        );

        ledger.clear();
        assert_eq!(ledger, Ledger::default());
    }

    #[test]
    fn ledger_roundtrips_through_json() {
        let mut ledger = Ledger::default();
        ledger.push_paste(SetKind::Work, snapshot("w"));
        ledger.push_redo(SetKind::Rest, snapshot("r"));

        let json = serde_json::to_string(&ledger).unwrap();
        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }
}
