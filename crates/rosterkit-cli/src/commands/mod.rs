pub mod common;
pub mod completions;
pub mod monitor;
pub mod paste;
pub mod schedule;
