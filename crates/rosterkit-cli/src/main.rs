//! Rosterkit CLI - schedule clerk workflows from the terminal
//!
//! Paste, validate, and export branch schedules, and keep the shared
//! upload monitoring board current.

use clap::Parser;
use rosterkit_core::AppConfig;

use crate::cli::{Cli, Commands, MonitorCommands, MonitorSyncCommands};
use crate::commands::common::{open_store, resolve_db_path};
use crate::commands::completions::run_completions;
use crate::commands::{monitor, paste, schedule};
use crate::error::CliError;

mod cli;
mod commands;
mod error;


#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rosterkit=info".parse().unwrap()),
        )
        .init();

    let args = Cli::parse();
    let config = AppConfig::from_env();
    let db_path = resolve_db_path(args.db_path);
    let store = open_store(&db_path)?;

    match args.command {
        Commands::Paste {
            kind,
            file,
            branch,
            json,
        } => paste::run_paste(&store, kind.into(), file.as_deref(), branch.as_deref(), json)?,
        Commands::List { kind, json } => schedule::run_list(&store, kind.into(), json)?,
        Commands::Delete { kind, row } => schedule::run_delete(&store, kind.into(), row)?,
        Commands::Undo { kind, delete } => schedule::run_undo(&store, kind.into(), delete)?,
        Commands::Redo { kind } => schedule::run_redo(&store, kind.into())?,
        Commands::Validate { json } => schedule::run_validate(&store, json)?,
        Commands::Clear { kind } => schedule::run_clear(&store, kind.map(Into::into))?,
        Commands::Export { kind, output } => {
            schedule::run_export(&store, kind.into(), output.as_deref())?;
        }
        Commands::Monitor { command } => match command {
            MonitorCommands::List { json } => monitor::run_list(&store, json)?,
            MonitorCommands::Add { name } => monitor::run_add(&store, &name)?,
            MonitorCommands::Rename { from, to } => monitor::run_rename(&store, &from, &to)?,
            MonitorCommands::Remove { name } => monitor::run_remove(&store, &name)?,
            MonitorCommands::Check { name, off } => monitor::run_check(&store, &name, !off)?,
            MonitorCommands::Upload { name, by, off } => {
                monitor::run_upload(&store, &name, &by, !off)?;
            }
            MonitorCommands::Remarks { name, text } => monitor::run_remarks(&store, &name, &text)?,
            MonitorCommands::Stats { json } => monitor::run_stats(&store, &config, json)?,
            MonitorCommands::Export { output } => {
                monitor::run_export(&store, &config, output.as_deref())?;
            }
            MonitorCommands::Sync { command } => match command {
                MonitorSyncCommands::Push => monitor::run_sync_push(&store, &config).await?,
                MonitorSyncCommands::Pull => monitor::run_sync_pull(&store, &config).await?,
                MonitorSyncCommands::Watch { interval } => {
                    monitor::run_sync_watch(&store, &config, interval).await?;
                }
            },
            MonitorCommands::Clear => monitor::run_clear(&store)?,
        },
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
    }

    Ok(())
}
