use std::path::Path;

use chrono::{Datelike, Local};
use rosterkit_core::export::{monitoring_file_name, monitoring_table, write_xlsx};
use rosterkit_core::models::default_branches;
use rosterkit_core::monitoring::{
    add_branch, remove_branch, rename_branch, set_checked, set_remarks, set_uploaded, stats,
};
use rosterkit_core::sync::MonitoringSyncClient;
use rosterkit_core::{AppConfig, StateStore};
use serde::Serialize;

use crate::commands::common::{format_board_lines, format_stats_line};
use crate::error::CliError;

pub fn run_list(store: &StateStore, as_json: bool) -> Result<(), CliError> {
    let entries = store.load_monitoring()?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for line in format_board_lines(&entries) {
        println!("{line}");
    }
    Ok(())
}

pub fn run_add(store: &StateStore, name: &str) -> Result<(), CliError> {
    let mut entries = store.load_monitoring()?;
    if !add_branch(&mut entries, name) {
        return Err(CliError::BranchRejected(format!(
            "'{name}' is blank or already on the board"
        )));
    }
    store.save_monitoring(&entries)?;
    println!("Added branch '{name}'.");
    Ok(())
}

pub fn run_rename(store: &StateStore, from: &str, to: &str) -> Result<(), CliError> {
    let mut entries = store.load_monitoring()?;
    if !rename_branch(&mut entries, from, to) {
        return Err(CliError::BranchRejected(format!(
            "cannot rename '{from}' to '{to}'"
        )));
    }
    store.save_monitoring(&entries)?;
    println!("Renamed '{from}' to '{to}'.");
    Ok(())
}

pub fn run_remove(store: &StateStore, name: &str) -> Result<(), CliError> {
    let mut entries = store.load_monitoring()?;
    if !remove_branch(&mut entries, name) {
        return Err(CliError::BranchNotFound(name.to_string()));
    }
    store.save_monitoring(&entries)?;
    println!("Removed branch '{name}'.");
    Ok(())
}

pub fn run_check(store: &StateStore, name: &str, checked: bool) -> Result<(), CliError> {
    let mut entries = store.load_monitoring()?;
    if !set_checked(&mut entries, name, checked) {
        return Err(CliError::BranchNotFound(name.to_string()));
    }
    store.save_monitoring(&entries)?;
    println!(
        "Marked '{name}' as {}.",
        if checked { "checked" } else { "unchecked" }
    );
    Ok(())
}

pub fn run_upload(store: &StateStore, name: &str, by: &str, uploaded: bool) -> Result<(), CliError> {
    let mut entries = store.load_monitoring()?;
    if !set_uploaded(&mut entries, name, uploaded, by) {
        return Err(CliError::BranchNotFound(name.to_string()));
    }
    store.save_monitoring(&entries)?;
    println!(
        "Marked '{name}' as {}.",
        if uploaded { "uploaded" } else { "not uploaded" }
    );
    Ok(())
}

pub fn run_remarks(store: &StateStore, name: &str, text: &str) -> Result<(), CliError> {
    let mut entries = store.load_monitoring()?;
    if !set_remarks(&mut entries, name, text) {
        return Err(CliError::BranchNotFound(name.to_string()));
    }
    store.save_monitoring(&entries)?;
    println!("Updated remarks for '{name}'.");
    Ok(())
}

#[derive(Debug, Serialize)]
struct StatsReport {
    total: usize,
    checked: usize,
    uploaded: usize,
    percent: u32,
    basis: String,
}

pub fn run_stats(store: &StateStore, config: &AppConfig, as_json: bool) -> Result<(), CliError> {
    let entries = store.load_monitoring()?;
    let board_stats = stats(&entries, config.progress_basis);

    if as_json {
        let report = StatsReport {
            total: board_stats.total,
            checked: board_stats.checked,
            uploaded: board_stats.uploaded,
            percent: board_stats.percent,
            basis: config.progress_basis.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", format_stats_line(board_stats));
    Ok(())
}

pub fn run_export(
    store: &StateStore,
    config: &AppConfig,
    output_dir: Option<&Path>,
) -> Result<(), CliError> {
    let entries = store.load_monitoring()?;
    let board_stats = stats(&entries, config.progress_basis);

    let now = Local::now();
    let month = now.format("%B").to_string();
    let table = monitoring_table(&entries, board_stats, &month, now.year());
    let file_name = monitoring_file_name(&month, now.year());
    let path = output_dir.unwrap_or_else(|| Path::new(".")).join(file_name);
    write_xlsx(&path, &table)?;

    println!("{}", path.display());
    Ok(())
}

fn sync_client(config: &AppConfig) -> Result<MonitoringSyncClient, CliError> {
    let endpoint = config
        .sync_endpoint
        .as_deref()
        .ok_or(CliError::SyncNotConfigured)?;
    Ok(MonitoringSyncClient::new(endpoint, config.sync_token.clone())?)
}

pub async fn run_sync_push(store: &StateStore, config: &AppConfig) -> Result<(), CliError> {
    let client = sync_client(config)?;
    let entries = store.load_monitoring()?;
    let doc = client.publish(entries).await?;
    println!("Published {} branches (updated at {}).", doc.data.len(), doc.updated_at);
    Ok(())
}

pub async fn run_sync_pull(store: &StateStore, config: &AppConfig) -> Result<(), CliError> {
    let client = sync_client(config)?;
    match client.fetch().await? {
        Some(doc) => {
            store.save_monitoring(&doc.data)?;
            println!(
                "Pulled {} branches (updated at {}).",
                doc.data.len(),
                doc.updated_at
            );
        }
        None => println!("No shared monitoring document exists yet."),
    }
    Ok(())
}

/// Poll the shared document and overwrite the local board whenever a
/// newer write appears. Runs until interrupted.
pub async fn run_sync_watch(
    store: &StateStore,
    config: &AppConfig,
    interval_secs: u64,
) -> Result<(), CliError> {
    let client = sync_client(config)?;
    let interval = std::time::Duration::from_secs(interval_secs.max(1));

    let mut last_seen = 0_i64;
    println!("Watching the shared monitoring document (every {}s).", interval.as_secs());
    loop {
        match client.poll_changes(last_seen).await {
            Ok(Some(doc)) => {
                store.save_monitoring(&doc.data)?;
                last_seen = doc.updated_at;
                println!(
                    "Applied remote update: {} branches (updated at {}).",
                    doc.data.len(),
                    doc.updated_at
                );
            }
            Ok(None) => {}
            // Transient failures degrade to a retry on the next tick.
            Err(error) => tracing::warn!(%error, "monitoring poll failed"),
        }
        tokio::time::sleep(interval).await;
    }
}

pub fn run_clear(store: &StateStore) -> Result<(), CliError> {
    let seeds = default_branches();
    store.save_monitoring(&seeds)?;
    println!("Monitoring board reset to {} seed branches.", seeds.len());
    Ok(())
}
