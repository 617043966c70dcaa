//! Shared model, errors, settings and formatting for workout-log.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{LineError, Result, WorkoutError};
pub use models::{ParsedSet, SetKind, SetRecord, TrackingConfig, DEFAULT_BODYWEIGHT};
