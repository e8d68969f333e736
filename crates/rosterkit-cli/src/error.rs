use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] rosterkit_core::Error),
    #[error(transparent)]
    Sync(#[from] rosterkit_core::sync::SyncError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No row {0} in the {1} set; see `rosterkit list {1}`")]
    RowNotFound(usize, String),
    #[error("Row numbers start at 1")]
    ZeroRowNumber,
    #[error("No branch named '{0}' on the monitoring board")]
    BranchNotFound(String),
    #[error("Branch operation rejected: {0}")]
    BranchRejected(String),
    #[error(
        "Sync is not configured. Set ROSTERKIT_SYNC_URL (and optionally ROSTERKIT_SYNC_TOKEN) to enable `rosterkit monitor sync`."
    )]
    SyncNotConfigured,
}
