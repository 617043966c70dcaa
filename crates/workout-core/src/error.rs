use std::path::PathBuf;
use thiserror::Error;

/// Why a single `Set ...` line could not be turned into a set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    /// The line mentions neither `kg` nor `reps`.
    #[error("unrecognised set line shape")]
    UnrecognizedShape,

    /// The line looks like a set of the given kind but a delimiter is absent.
    #[error("missing delimiter {delimiter:?} in {kind} set line")]
    MissingDelimiter {
        kind: &'static str,
        delimiter: &'static str,
    },

    /// A weight, rep or set-number token could not be parsed.
    #[error("invalid {field} value {token:?}")]
    InvalidNumber { field: &'static str, token: String },
}

/// All errors produced while reading and parsing workout logs.
#[derive(Error, Debug)]
pub enum WorkoutError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A set line inside a tracked exercise block was malformed.
    #[error("Malformed line {line_no} in {path}: {line:?}: {source}")]
    MalformedLine {
        path: PathBuf,
        line_no: usize,
        line: String,
        #[source]
        source: LineError,
    },

    /// The filename stem is not of the form `DD_MM_YY`.
    #[error("Invalid workout filename {0}: expected DD_MM_YY")]
    InvalidFilename(PathBuf),

    /// The filename has three components but they do not form a date.
    #[error("Invalid workout date {stem:?} in {path}")]
    InvalidDate { path: PathBuf, stem: String },

    /// A JSON document could not be parsed or written.
    #[error("Failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the workout crates.
pub type Result<T> = std::result::Result<T, WorkoutError>;
