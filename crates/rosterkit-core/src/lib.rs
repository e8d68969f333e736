//! rosterkit-core - Core library for Rosterkit
//!
//! This crate contains the paste ingestion pipeline, the rest-day
//! conflict validator, the undo/redo session, the monitoring board,
//! and the cache/sync/export layers shared by the Rosterkit tools.

pub mod classify;
pub mod columns;
pub mod config;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod monitoring;
pub mod normalize;
pub mod parse;
pub mod session;
pub mod storage;
pub mod sync;
pub mod validate;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use models::{Conflict, ConflictKind, MonitoringEntry, RejectedEntry, ScheduleRow, SetKind};
pub use session::Session;
pub use storage::StateStore;
