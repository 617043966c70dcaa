//! Cross-file aggregation of set records.
//!
//! Loads every workout log in a directory, concatenates the tracked sets into
//! one date-sorted table and derives per-day and per-workout summaries.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};
use workout_core::error::Result;
use workout_core::models::{SetRecord, TrackingConfig};

use crate::reader::{find_workout_files, read_workout_log};
use crate::session::extract_sets;

// ── SetStats ──────────────────────────────────────────────────────────────────

/// Set, rep and volume totals accumulated across multiple records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SetStats {
    pub sets: u32,
    pub reps: u64,
    pub volume: f64,
    /// Heaviest load seen, in kg.
    pub top_weight: f64,
}

impl SetStats {
    /// Add a single record's counts to the running totals.
    pub fn add_record(&mut self, record: &SetRecord) {
        self.sets += 1;
        self.reps += u64::from(record.reps);
        self.volume += record.volume;
        self.top_weight = self.top_weight.max(record.weight);
    }

    fn merge(&mut self, other: &SetStats) {
        self.sets += other.sets;
        self.reps += other.reps;
        self.volume += other.volume;
        self.top_weight = self.top_weight.max(other.top_weight);
    }
}

// ── Summary rows ──────────────────────────────────────────────────────────────

/// All sets of one exercise on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyExerciseSummary {
    pub date: NaiveDate,
    pub exercise: String,
    #[serde(flatten)]
    pub stats: SetStats,
}

/// The tracked sets of one workout file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutSummary {
    pub date: NaiveDate,
    /// Workout name from the first line of the file.
    pub name: Option<String>,
    pub path: PathBuf,
    #[serde(flatten)]
    pub stats: SetStats,
}

/// One workout file after extraction.
#[derive(Debug, Clone)]
pub struct ParsedWorkout {
    pub path: PathBuf,
    pub name: Option<String>,
    pub date: NaiveDate,
    /// Tracked sets in line order.
    pub records: Vec<SetRecord>,
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load and extract every workout log in `data_dir`, in path order.
///
/// A missing directory or one without logs yields an empty list. The first
/// malformed filename or set line aborts the whole run.
pub fn load_workouts(data_dir: &Path, config: &TrackingConfig) -> Result<Vec<ParsedWorkout>> {
    let files = find_workout_files(data_dir);
    if files.is_empty() {
        warn!("No workout logs found in {}", data_dir.display());
        return Ok(Vec::new());
    }

    let mut workouts = Vec::with_capacity(files.len());
    for path in &files {
        let log = read_workout_log(path)?;
        let records = extract_sets(&log, config)?;
        workouts.push(ParsedWorkout {
            path: log.path,
            name: log.name,
            date: log.date,
            records,
        });
    }

    debug!(
        "Processed {} sets from {} files",
        workouts.iter().map(|w| w.records.len()).sum::<usize>(),
        files.len()
    );

    Ok(workouts)
}

/// Load every tracked set in `data_dir` as one table sorted by date.
pub fn load_set_table(data_dir: &Path, config: &TrackingConfig) -> Result<Vec<SetRecord>> {
    let workouts = load_workouts(data_dir, config)?;
    Ok(build_set_table(workouts))
}

/// Concatenate per-file records in file order, then sort by date.
///
/// The sort is stable: records sharing a date keep their file-then-line
/// order.
pub fn build_set_table(workouts: Vec<ParsedWorkout>) -> Vec<SetRecord> {
    let mut table: Vec<SetRecord> = workouts.into_iter().flat_map(|w| w.records).collect();
    table.sort_by_key(|r| r.date);
    table
}

// ── Summaries ─────────────────────────────────────────────────────────────────

/// Group records by `(date, exercise)`, ascending by date then name.
pub fn summarize_daily(records: &[SetRecord]) -> Vec<DailyExerciseSummary> {
    let mut map: BTreeMap<(NaiveDate, &str), SetStats> = BTreeMap::new();
    for record in records {
        map.entry((record.date, record.exercise.as_str()))
            .or_default()
            .add_record(record);
    }

    map.into_iter()
        .map(|((date, exercise), stats)| DailyExerciseSummary {
            date,
            exercise: exercise.to_string(),
            stats,
        })
        .collect()
}

/// One summary per workout file, sorted by date (stable on path order).
///
/// Files without tracked sets are kept with zero totals.
pub fn summarize_workouts(workouts: &[ParsedWorkout]) -> Vec<WorkoutSummary> {
    let mut summaries: Vec<WorkoutSummary> = workouts
        .iter()
        .map(|w| {
            let mut stats = SetStats::default();
            for record in &w.records {
                stats.add_record(record);
            }
            WorkoutSummary {
                date: w.date,
                name: w.name.clone(),
                path: w.path.clone(),
                stats,
            }
        })
        .collect();

    summaries.sort_by_key(|s| s.date);
    summaries
}

/// Totals across all records.
pub fn calculate_totals(records: &[SetRecord]) -> SetStats {
    let mut totals = SetStats::default();
    for record in records {
        totals.add_record(record);
    }
    totals
}

/// Totals across summary rows.
pub fn merge_stats<'a>(rows: impl IntoIterator<Item = &'a SetStats>) -> SetStats {
    let mut totals = SetStats::default();
    for stats in rows {
        totals.merge(stats);
    }
    totals
}

// ── Tests ─────────────────────────────────────────────────────────────────────
