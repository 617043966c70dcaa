//! Data ingestion layer for workout-log.
//!
//! Responsible for discovering and reading plain-text workout logs, parsing
//! set lines, tracking exercise blocks and aggregating the resulting set
//! records across files.

pub mod aggregator;
pub mod metadata;
pub mod parser;
pub mod reader;
pub mod session;

pub use aggregator::{load_set_table, load_workouts};
