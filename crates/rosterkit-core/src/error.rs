//! Error types for rosterkit-core

use thiserror::Error;

/// Result type alias using rosterkit-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rosterkit-core operations
///
/// The parse/validate pipeline itself never fails: malformed input
/// degrades to rejected rows or conflict annotations. These variants
/// cover the storage, export, and configuration boundaries.
#[derive(Error, Debug)]
pub enum Error {
    /// State store error
    #[error("State store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Spreadsheet write error
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}
