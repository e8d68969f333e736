use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rosterkit_core::SetKind;

#[derive(Parser)]
#[command(name = "rosterkit")]
#[command(about = "Paste, validate, and export branch schedules for HRIS upload")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the local cache file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest pasted schedule data from a file or stdin
    Paste {
        /// Which schedule set to replace
        #[arg(value_enum)]
        kind: SetKindArg,
        /// Input file (stdin when omitted)
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,
        /// Branch name override
        #[arg(long, value_name = "NAME")]
        branch: Option<String>,
        /// Output the paste report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the rows of one schedule set with their conflicts
    List {
        /// Which schedule set to show
        #[arg(value_enum)]
        kind: SetKindArg,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete one row by its list number
    Delete {
        /// Which schedule set to edit
        #[arg(value_enum)]
        kind: SetKindArg,
        /// Row number as shown by `list` (1-based)
        row: usize,
    },
    /// Undo the most recent paste (or row deletion) for a set
    Undo {
        /// Which schedule set to roll back
        #[arg(value_enum)]
        kind: SetKindArg,
        /// Undo the last row deletion instead of the last paste
        #[arg(long)]
        delete: bool,
    },
    /// Re-apply the most recently undone paste for a set
    Redo {
        /// Which schedule set to roll forward
        #[arg(value_enum)]
        kind: SetKindArg,
    },
    /// Re-run conflict validation and print the summary
    Validate {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear one schedule set, or everything when no set is given
    Clear {
        /// Which schedule set to clear (both plus history when omitted)
        #[arg(value_enum)]
        kind: Option<SetKindArg>,
    },
    /// Export one schedule set as an HRIS upload spreadsheet
    Export {
        /// Which schedule set to export
        #[arg(value_enum)]
        kind: SetKindArg,
        /// Output directory (current directory when omitted)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Manage the upload monitoring board
    Monitor {
        #[command(subcommand)]
        command: MonitorCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum MonitorCommands {
    /// List board entries
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a branch to the board
    Add {
        /// Branch name
        name: String,
    },
    /// Rename a branch
    Rename {
        /// Current branch name
        from: String,
        /// New branch name
        to: String,
    },
    /// Remove a branch from the board
    Remove {
        /// Branch name
        name: String,
    },
    /// Set or clear the checked mark
    Check {
        /// Branch name
        name: String,
        /// Clear the mark instead of setting it
        #[arg(long)]
        off: bool,
    },
    /// Set or clear the uploaded mark
    Upload {
        /// Branch name
        name: String,
        /// Who performed the upload
        #[arg(long, value_name = "NAME", default_value = "")]
        by: String,
        /// Clear the mark instead of setting it
        #[arg(long)]
        off: bool,
    },
    /// Replace the remarks for a branch
    Remarks {
        /// Branch name
        name: String,
        /// Remarks text
        text: String,
    },
    /// Show board progress statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export the board as a monitoring spreadsheet
    Export {
        /// Output directory (current directory when omitted)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Exchange the board with the shared remote document
    Sync {
        #[command(subcommand)]
        command: MonitorSyncCommands,
    },
    /// Reset the board to the seed branches
    Clear,
}

#[derive(Subcommand)]
pub enum MonitorSyncCommands {
    /// Publish the local board to the shared document
    Push,
    /// Replace the local board with the shared document
    Pull,
    /// Poll the shared document and apply remote changes as they land
    Watch {
        /// Poll interval in seconds
        #[arg(long, default_value = "30")]
        interval: u64,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SetKindArg {
    Work,
    Rest,
}

impl From<SetKindArg> for SetKind {
    fn from(value: SetKindArg) -> Self {
        match value {
            SetKindArg::Work => Self::Work,
            SetKindArg::Rest => Self::Rest,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
