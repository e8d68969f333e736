use std::path::Path;

use rosterkit_core::export::{schedule_file_name, schedule_table, write_xlsx};
use rosterkit_core::{SetKind, StateStore};

use crate::commands::common::{format_row_lines, load_session, save_session};
use crate::error::CliError;

pub fn run_list(store: &StateStore, kind: SetKind, as_json: bool) -> Result<(), CliError> {
    let session = load_session(store)?;
    let rows = match kind {
        SetKind::Work => &session.work,
        SetKind::Rest => &session.rest,
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No {} entries.", kind.label());
        return Ok(());
    }
    if !session.branch(kind).is_empty() {
        println!("Branch: {}", session.branch(kind));
    }
    for line in format_row_lines(rows) {
        println!("{line}");
    }
    Ok(())
}

pub fn run_delete(store: &StateStore, kind: SetKind, row_number: usize) -> Result<(), CliError> {
    if row_number == 0 {
        return Err(CliError::ZeroRowNumber);
    }

    let mut session = load_session(store)?;
    let removed = session
        .delete_row(kind, row_number - 1)
        .ok_or_else(|| CliError::RowNotFound(row_number, kind_arg(kind)))?;
    save_session(store, &session)?;

    println!(
        "Deleted row {row_number}: {} {} ({})",
        removed.employee_id, removed.name, removed.date
    );
    print_summary(session.summary().message());
    Ok(())
}

pub fn run_undo(store: &StateStore, kind: SetKind, delete: bool) -> Result<(), CliError> {
    let mut session = load_session(store)?;
    let undone = if delete {
        session.undo_delete(kind)
    } else {
        session.undo_paste(kind)
    };
    // An empty stack is a notice, not an error.
    if !undone {
        println!("Nothing to undo for the {} set.", kind.label());
        return Ok(());
    }
    save_session(store, &session)?;

    if delete {
        println!("Restored the last deleted {} row.", kind.label());
    } else {
        println!("Rolled back the last {} paste.", kind.label());
    }
    print_summary(session.summary().message());
    Ok(())
}

pub fn run_redo(store: &StateStore, kind: SetKind) -> Result<(), CliError> {
    let mut session = load_session(store)?;
    if !session.redo_paste(kind) {
        println!("Nothing to redo for the {} set.", kind.label());
        return Ok(());
    }
    save_session(store, &session)?;

    println!("Re-applied the last undone {} paste.", kind.label());
    print_summary(session.summary().message());
    Ok(())
}

pub fn run_validate(store: &StateStore, as_json: bool) -> Result<(), CliError> {
    let mut session = load_session(store)?;
    let summary = session.revalidate();
    save_session(store, &session)?;

    if as_json {
        let flagged: Vec<_> = session.rest.iter().filter(|row| row.has_conflicts()).collect();
        println!("{}", serde_json::to_string_pretty(&flagged)?);
        return Ok(());
    }

    let message = summary.message();
    if message.is_empty() {
        println!("No rest day entries to validate.");
    } else {
        println!("{message}");
    }
    let flagged: Vec<_> = session
        .rest
        .iter()
        .filter(|row| row.has_conflicts())
        .cloned()
        .collect();
    for line in format_row_lines(&flagged) {
        println!("{line}");
    }
    Ok(())
}

pub fn run_clear(store: &StateStore, kind: Option<SetKind>) -> Result<(), CliError> {
    let mut session = load_session(store)?;
    match kind {
        Some(kind) => {
            session.clear(kind);
            println!("Cleared the {} set.", kind.label());
        }
        None => {
            session.clear_all();
            println!("Cleared both sets and all history.");
        }
    }
    save_session(store, &session)?;
    Ok(())
}

pub fn run_export(
    store: &StateStore,
    kind: SetKind,
    output_dir: Option<&Path>,
) -> Result<(), CliError> {
    let session = load_session(store)?;
    let rows = match kind {
        SetKind::Work => &session.work,
        SetKind::Rest => &session.rest,
    };

    // Conflicts are advisory: warn, but export anyway.
    let flagged = rows.iter().filter(|row| row.has_conflicts()).count();
    if flagged > 0 {
        eprintln!("Warning: {flagged} {} entries still have conflicts.", kind.label());
    }

    let table = schedule_table(kind, session.branch(kind), rows)?;
    let file_name = schedule_file_name(kind, session.branch(kind));
    let path = output_dir.unwrap_or_else(|| Path::new(".")).join(file_name);
    write_xlsx(&path, &table)?;

    println!("{}", path.display());
    Ok(())
}

fn kind_arg(kind: SetKind) -> String {
    match kind {
        SetKind::Work => "work".to_string(),
        SetKind::Rest => "rest".to_string(),
    }
}

fn print_summary(message: String) {
    if !message.is_empty() {
        println!("{message}");
    }
}
