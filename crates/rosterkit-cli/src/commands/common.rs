use std::env;
use std::io::Read;
use std::path::{Path, PathBuf};

use rosterkit_core::models::MonitoringEntry;
use rosterkit_core::monitoring::MonitoringStats;
use rosterkit_core::{RejectedEntry, ScheduleRow, Session, StateStore};

use crate::error::CliError;

/// Cache path resolution: flag, then env, then the platform data dir.
pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("ROSTERKIT_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rosterkit")
        .join("rosterkit.db")
}

pub fn open_store(db_path: &Path) -> Result<StateStore, CliError> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(StateStore::open(db_path)?)
}

pub fn load_session(store: &StateStore) -> Result<Session, CliError> {
    Ok(store.load_session()?)
}

pub fn save_session(store: &StateStore, session: &Session) -> Result<(), CliError> {
    Ok(store.save_session(session)?)
}

/// Read paste input from a file, or stdin when no file was given.
///
/// Blank input is valid: pasting nothing replaces the set with zero
/// rows (and stays undoable), so no guard here.
pub fn read_paste_input(file: Option<&Path>) -> Result<String, CliError> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    Ok(text)
}

/// One display line per schedule row, numbered the way `delete` expects.
pub fn format_row_lines(rows: &[ScheduleRow]) -> Vec<String> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let mut line = format!(
                "{:>3}. {}  {}  {}  {}  {}",
                index + 1,
                row.employee_id,
                row.name,
                row.date,
                row.weekday,
                row.shift
            );
            if !row.position.is_empty() {
                line.push_str(&format!("  [{}]", row.position));
            }
            for conflict in &row.conflicts {
                line.push_str(&format!("\n       !! {}: {}", conflict.kind, conflict.message));
            }
            line
        })
        .collect()
}

pub fn format_rejection_lines(rejected: &[&RejectedEntry]) -> Vec<String> {
    rejected
        .iter()
        .map(|entry| format!("  - {} ({})", entry.joined(), entry.reasons.join("; ")))
        .collect()
}

pub fn format_board_lines(entries: &[MonitoringEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            let checked = if entry.checked { "x" } else { " " };
            let uploaded = if entry.uploaded { "x" } else { " " };
            let mut line = format!(
                "[{checked}] checked  [{uploaded}] uploaded  {}",
                entry.branch_name
            );
            if !entry.uploaded_by.is_empty() {
                line.push_str(&format!("  (by {})", entry.uploaded_by));
            }
            if !entry.remarks.is_empty() {
                line.push_str(&format!("  - {}", entry.remarks));
            }
            line
        })
        .collect()
}

pub fn format_stats_line(stats: MonitoringStats) -> String {
    format!(
        "{}% complete ({} checked, {} uploaded, {} branches)",
        stats.percent, stats.checked, stats.uploaded, stats.total
    )
}
