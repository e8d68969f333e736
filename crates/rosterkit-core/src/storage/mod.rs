//! Local durable cache
//!
//! A small key/value store over `SQLite`. Values are JSON documents
//! keyed by the same names the original cache used, so schedule and
//! monitoring state written by older clients loads unchanged.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::models::{default_branches, MonitoringEntry, ScheduleRow, SetKind};
use crate::session::Session;

/// Cache key for the monitoring board.
pub const MONITORING_KEY: &str = "monitoringData";
/// Cache key for branch names, options and the undo/redo ledger.
pub const SESSION_META_KEY: &str = "sessionMeta";

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Durable state store backed by a single `SQLite` file.
pub struct StateStore {
    conn: Connection,
}

impl StateStore {
    /// Open the store at the given path, creating it if it doesn't
    /// exist. Runs migrations automatically.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.configure()?;
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (useful for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.configure()?;
        store.migrate()?;
        Ok(store)
    }

    fn configure(&self) -> Result<()> {
        self.conn.pragma_update(None, "journal_mode", "WAL")?;
        self.conn.pragma_update(None, "synchronous", "NORMAL")?;
        self.conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(())
    }

    fn migrate(&self) -> Result<()> {
        let version: i32 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS app_state (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at INTEGER NOT NULL DEFAULT (unixepoch())
                );",
            )?;
        }

        if version < CURRENT_VERSION {
            self.conn
                .pragma_update(None, "user_version", CURRENT_VERSION)?;
            debug!(from = version, to = CURRENT_VERSION, "cache schema migrated");
        }
        Ok(())
    }

    /// Read and deserialize the JSON value under `key`, if present.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM app_state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Serialize and write `value` under `key`, replacing any previous
    /// value.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO app_state (key, value, updated_at)
             VALUES (?1, ?2, unixepoch())
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = excluded.updated_at",
            params![key, text],
        )?;
        Ok(())
    }

    /// Remove the value under `key`, if any.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM app_state WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Load one schedule set, defaulting to empty when nothing was
    /// saved yet.
    pub fn load_schedule(&self, kind: SetKind) -> Result<Vec<ScheduleRow>> {
        Ok(self.get_json(kind.cache_key())?.unwrap_or_default())
    }

    /// Persist one schedule set.
    pub fn save_schedule(&self, kind: SetKind, rows: &[ScheduleRow]) -> Result<()> {
        self.set_json(kind.cache_key(), &rows)
    }

    /// Load the monitoring board, seeding the default branches on
    /// first run.
    pub fn load_monitoring(&self) -> Result<Vec<MonitoringEntry>> {
        Ok(self
            .get_json(MONITORING_KEY)?
            .unwrap_or_else(default_branches))
    }

    /// Persist the monitoring board.
    pub fn save_monitoring(&self, entries: &[MonitoringEntry]) -> Result<()> {
        self.set_json(MONITORING_KEY, &entries)
    }

    /// Load the full editing session: both schedule sets plus the
    /// branch/option/ledger metadata.
    pub fn load_session(&self) -> Result<Session> {
        let mut session: Session = self.get_json(SESSION_META_KEY)?.unwrap_or_default();
        session.work = self.load_schedule(SetKind::Work)?;
        session.rest = self.load_schedule(SetKind::Rest)?;
        session.revalidate();
        Ok(session)
    }

    /// Persist the full editing session. The schedule sets live under
    /// their own keys; everything else goes under the metadata key.
    pub fn save_session(&self, session: &Session) -> Result<()> {
        self.save_schedule(SetKind::Work, &session.work)?;
        self.save_schedule(SetKind::Rest, &session.rest)?;

        // The sets are stored separately; blank them in the metadata
        // copy instead of writing them twice.
        let mut meta = session.clone();
        meta.work = Vec::new();
        meta.rest = Vec::new();
        self.set_json(SESSION_META_KEY, &meta)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(employee_id: &str, date: &str) -> ScheduleRow {
        ScheduleRow {
            employee_id: employee_id.to_string(),
            date: date.to_string(),
            ..ScheduleRow::default()
        }
    }

    #[test]
    fn missing_keys_read_as_none() {
        let store = StateStore::open_in_memory().unwrap();
        let value: Option<Vec<ScheduleRow>> = store.get_json("nothing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn set_then_get_roundtrips() {
        let store = StateStore::open_in_memory().unwrap();
        let rows = vec![row("12345", "01/02/24")];
        store.save_schedule(SetKind::Work, &rows).unwrap();
        assert_eq!(store.load_schedule(SetKind::Work).unwrap(), rows);
    }

    #[test]
    fn set_replaces_previous_value() {
        let store = StateStore::open_in_memory().unwrap();
        store.save_schedule(SetKind::Rest, &[row("1", "01/02/24")]).unwrap();
        store.save_schedule(SetKind::Rest, &[row("2", "01/03/24")]).unwrap();

        let loaded = store.load_schedule(SetKind::Rest).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].employee_id, "2");
    }

    #[test]
    fn unsaved_schedules_default_to_empty() {
        let store = StateStore::open_in_memory().unwrap();
        assert!(store.load_schedule(SetKind::Work).unwrap().is_empty());
    }

    #[test]
    fn monitoring_seeds_default_branches_once() {
        let store = StateStore::open_in_memory().unwrap();
        let board = store.load_monitoring().unwrap();
        assert_eq!(board.len(), 2);

        store.save_monitoring(&board[..1]).unwrap();
        assert_eq!(store.load_monitoring().unwrap().len(), 1);
    }

    #[test]
    fn remove_clears_a_key() {
        let store = StateStore::open_in_memory().unwrap();
        store.save_monitoring(&default_branches()).unwrap();
        store.remove(MONITORING_KEY).unwrap();
        // Back to seeded defaults.
        assert_eq!(store.load_monitoring().unwrap(), default_branches());
    }

    #[test]
    fn session_roundtrips_through_store() {
        let store = StateStore::open_in_memory().unwrap();

        let mut session = Session::default();
        session.paste(
            SetKind::Work,
            "John Smith\t12345\t01/02/24\tAM\tTuesday\tCashier",
        );
        session.set_branch(SetKind::Work, "Uptown");
        store.save_session(&session).unwrap();

        let loaded = store.load_session().unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn state_survives_reopen_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.db");

        {
            let store = StateStore::open(&path).unwrap();
            store.save_schedule(SetKind::Work, &[row("12345", "01/02/24")]).unwrap();
        }

        let store = StateStore::open(&path).unwrap();
        assert_eq!(store.load_schedule(SetKind::Work).unwrap().len(), 1);
    }
}
