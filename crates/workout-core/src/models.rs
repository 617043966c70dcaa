use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkoutError};

/// Bodyweight (kg) assumed for bodyweight sets when none is configured.
pub const DEFAULT_BODYWEIGHT: f64 = 80.0;

/// Which line shape a set was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetKind {
    /// `Set N : W kg x R`
    Weighted,
    /// `Set N : R reps`, loaded with the configured bodyweight.
    Bodyweight,
}

/// One set line after parsing, before it is attached to a date and exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSet {
    pub kind: SetKind,
    /// The `N` written after `Set` in the log line, when it is numeric.
    pub declared_number: Option<u32>,
    pub weight: f64,
    pub reps: u32,
    pub volume: f64,
}

impl ParsedSet {
    pub fn weighted(declared_number: Option<u32>, weight: f64, reps: u32) -> Self {
        Self::build(SetKind::Weighted, declared_number, weight, reps)
    }

    pub fn bodyweight(declared_number: Option<u32>, bodyweight: f64, reps: u32) -> Self {
        Self::build(SetKind::Bodyweight, declared_number, bodyweight, reps)
    }

    fn build(kind: SetKind, declared_number: Option<u32>, weight: f64, reps: u32) -> Self {
        Self {
            kind,
            declared_number,
            weight,
            reps,
            volume: weight * f64::from(reps),
        }
    }
}

/// A single performed set, tagged with its workout date and exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    /// Calendar date taken from the workout filename.
    pub date: NaiveDate,
    /// Exercise name exactly as tracked.
    pub exercise: String,
    /// 1-based position within the exercise block.
    pub set_number: u32,
    /// Load in kg (the configured bodyweight for bodyweight sets).
    pub weight: f64,
    pub reps: u32,
    /// `weight * reps`.
    pub volume: f64,
}

impl SetRecord {
    /// Attach a parsed set to its date, exercise and block position.
    ///
    /// `volume` is carried over from the [`ParsedSet`], which always derives
    /// it from `weight * reps`.
    pub fn from_parsed(
        date: NaiveDate,
        exercise: impl Into<String>,
        set_number: u32,
        parsed: &ParsedSet,
    ) -> Self {
        Self {
            date,
            exercise: exercise.into(),
            set_number,
            weight: parsed.weight,
            reps: parsed.reps,
            volume: parsed.volume,
        }
    }
}

/// What to track and how to load bodyweight sets.
///
/// Passed explicitly through the pipeline; nothing reads a global default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Bodyweight in kg used as the load of `Set N : R reps` lines.
    pub bodyweight: f64,
    /// Exercise header lines to track, matched exactly after trimming.
    pub exercise_names: Vec<String>,
}

impl TrackingConfig {
    /// Validate and build a config.
    ///
    /// Fails when `bodyweight` is not a positive finite number. Blank exercise
    /// names are dropped since a blank line can never open a block.
    pub fn new<I, S>(bodyweight: f64, exercise_names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !bodyweight.is_finite() || bodyweight <= 0.0 {
            return Err(WorkoutError::Config(format!(
                "bodyweight must be a positive number of kg, got {bodyweight}"
            )));
        }

        let exercise_names = exercise_names
            .into_iter()
            .map(Into::into)
            .map(|name: String| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        Ok(Self {
            bodyweight,
            exercise_names,
        })
    }

    /// Return the tracked name equal to `line` once trimmed, if any.
    pub fn tracked_exercise(&self, line: &str) -> Option<&str> {
        let trimmed = line.trim();
        self.exercise_names
            .iter()
            .map(String::as_str)
            .find(|name| *name == trimmed)
    }
}
