//! Exercise block tracking.
//!
//! Walks a workout log line by line. A line equal to a tracked exercise name
//! opens a block; set lines inside the block become [`SetRecord`]s numbered
//! from 1; a blank line closes the block.

use chrono::NaiveDate;
use tracing::debug;
use workout_core::error::{LineError, Result, WorkoutError};
use workout_core::models::{SetRecord, TrackingConfig};

use crate::parser::{is_set_line, parse_set_line};
use crate::reader::WorkoutLog;

/// Where the extractor is within a workout file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Outside any tracked exercise block.
    Idle,
    /// Inside the block of `exercise`, having seen `count` sets so far.
    Tracking { exercise: String, count: u32 },
}

/// Line-by-line state machine turning one file's lines into set records.
#[derive(Debug)]
pub struct SessionExtractor<'a> {
    config: &'a TrackingConfig,
    date: NaiveDate,
    state: SessionState,
}

impl<'a> SessionExtractor<'a> {
    pub fn new(config: &'a TrackingConfig, date: NaiveDate) -> Self {
        Self {
            config,
            date,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Consume one line, returning a record when it is a set of the current
    /// block.
    ///
    /// A tracked exercise header restarts numbering even when it repeats the
    /// current exercise. Untracked headers do not end a block; only a blank
    /// line does.
    pub fn feed(&mut self, line: &str) -> std::result::Result<Option<SetRecord>, LineError> {
        if let Some(exercise) = self.config.tracked_exercise(line) {
            self.state = SessionState::Tracking {
                exercise: exercise.to_string(),
                count: 0,
            };
            return Ok(None);
        }

        let SessionState::Tracking { exercise, count } = &mut self.state else {
            return Ok(None);
        };

        if is_set_line(line) {
            let parsed = parse_set_line(line, self.config.bodyweight)?;
            *count += 1;
            return Ok(Some(SetRecord::from_parsed(
                self.date,
                exercise.as_str(),
                *count,
                &parsed,
            )));
        }

        if line.trim().is_empty() {
            self.state = SessionState::Idle;
        }
        Ok(None)
    }
}

/// Extract every tracked set from a loaded workout log, in line order.
///
/// The first malformed set line aborts the file with
/// [`WorkoutError::MalformedLine`].
pub fn extract_sets(log: &WorkoutLog, config: &TrackingConfig) -> Result<Vec<SetRecord>> {
    let mut extractor = SessionExtractor::new(config, log.date);
    let mut records = Vec::new();

    for (idx, line) in log.lines.iter().enumerate() {
        let record = extractor
            .feed(line)
            .map_err(|source| WorkoutError::MalformedLine {
                path: log.path.clone(),
                line_no: idx + 1,
                line: line.clone(),
                source,
            })?;
        records.extend(record);
    }

    debug!(
        "File {}: {} tracked sets",
        log.path.display(),
        records.len()
    );

    Ok(records)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
