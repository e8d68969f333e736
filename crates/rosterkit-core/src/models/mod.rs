//! Data models shared across the pipeline, storage, and sync layers

mod conflict;
mod monitoring;
mod row;

pub use conflict::{Conflict, ConflictKind};
pub use monitoring::{default_branches, MonitoringEntry};
pub use row::{RejectedEntry, ScheduleRow, SetKind};
