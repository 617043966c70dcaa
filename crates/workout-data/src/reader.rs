//! Workout log discovery and loading.
//!
//! Lists `*.txt` logs in the data directory and loads each one whole into
//! memory together with its name and date.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, warn};
use workout_core::error::{Result, WorkoutError};

use crate::metadata::{workout_date, workout_name};

/// Extension of workout log files.
pub const WORKOUT_EXTENSION: &str = "txt";

/// One workout log file loaded into memory.
#[derive(Debug, Clone)]
pub struct WorkoutLog {
    pub path: PathBuf,
    /// First line of the file, trimmed.
    pub name: Option<String>,
    pub date: NaiveDate,
    /// Every line of the file, without line terminators.
    pub lines: Vec<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `*.txt` files directly inside `data_dir`, sorted by path.
///
/// Subdirectories are not searched. A missing directory yields an empty list.
pub fn find_workout_files(data_dir: &Path) -> Vec<PathBuf> {
    if !data_dir.exists() {
        warn!("Data directory does not exist: {}", data_dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == WORKOUT_EXTENSION)
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Read a whole file into its lines, in order.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| WorkoutError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Load one workout log: its lines, name and filename-derived date.
pub fn read_workout_log(path: &Path) -> Result<WorkoutLog> {
    let date = workout_date(path)?;
    let lines = read_lines(path)?;
    let name = workout_name(&lines);

    debug!(
        "Loaded {} ({} lines, workout {:?}, date {})",
        path.display(),
        lines.len(),
        name,
        date
    );

    Ok(WorkoutLog {
        path: path.to_path_buf(),
        name,
        date,
        lines,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
