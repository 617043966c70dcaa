//! Workout name and date extraction.

use std::path::Path;

use chrono::NaiveDate;
use workout_core::error::{Result, WorkoutError};

/// The workout name: the first line of the file, trimmed.
///
/// Returns `None` for an empty file.
pub fn workout_name(lines: &[String]) -> Option<String> {
    lines.first().map(|line| line.trim().to_string())
}

/// Derive the workout date from a `DD_MM_YY` filename stem.
///
/// The two-digit year is read as `20YY`, so `26_09_25.txt` is 2025-09-26.
pub fn workout_date(path: &Path) -> Result<NaiveDate> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| WorkoutError::InvalidFilename(path.to_path_buf()))?;

    let parts: Vec<&str> = stem.split('_').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(WorkoutError::InvalidFilename(path.to_path_buf()));
    };

    let invalid_date = || WorkoutError::InvalidDate {
        path: path.to_path_buf(),
        stem: stem.to_string(),
    };

    let day = parse_component(day, 1..=2).ok_or_else(invalid_date)?;
    let month = parse_component(month, 1..=2).ok_or_else(invalid_date)?;
    let year = parse_component(year, 2..=2).ok_or_else(invalid_date)?;

    NaiveDate::from_ymd_opt(2000 + year as i32, month, day).ok_or_else(invalid_date)
}

/// Parse an all-digit component whose length falls in `width`.
fn parse_component(s: &str, width: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !width.contains(&s.len()) || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
