use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, WorkoutError};
use crate::models::{TrackingConfig, DEFAULT_BODYWEIGHT};

/// Directory globbed for `*.txt` logs when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "data/raw/workouts";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Turn plain-text workout logs into a table of sets
#[derive(Parser, Debug, Clone)]
#[command(
    name = "workout-log",
    about = "Turn plain-text workout logs into a table of sets",
    version
)]
pub struct Settings {
    /// Directory containing DD_MM_YY.txt workout logs
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Exercise name to track (repeatable, matched exactly)
    #[arg(short = 'e', long = "exercise")]
    pub exercises: Vec<String>,

    /// Bodyweight in kg used for `Set N : R reps` lines
    #[arg(long, default_value_t = DEFAULT_BODYWEIGHT)]
    pub bodyweight: f64,

    /// What to print
    #[arg(long, default_value = "sets", value_parser = ["sets", "daily", "workouts"])]
    pub view: String,

    /// Output format
    #[arg(long, default_value = "table", value_parser = ["table", "csv", "json"])]
    pub format: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.workout-log/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bodyweight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".workout-log").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to `path`, creating parent directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at `path` if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with explicit args and
    /// config path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("Failed to clear {}: {}", config_path.display(), e);
            }
            return Self::apply_debug(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // clap stores the arg id under the field name.
        if !is_arg_explicitly_set(&matches, "data_dir") {
            if let Some(v) = last.data_dir {
                settings.data_dir = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "exercises") {
            if let Some(v) = last.exercises {
                settings.exercises = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "bodyweight") {
            if let Some(v) = last.bodyweight {
                settings.bodyweight = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "format") {
            if let Some(v) = last.format {
                settings.format = v;
            }
        }

        settings = Self::apply_debug(settings);

        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            tracing::warn!("Failed to persist {}: {}", config_path.display(), e);
        }

        settings
    }

    /// Build the parser configuration from the resolved settings.
    ///
    /// Fails when no exercise is tracked or the bodyweight is invalid.
    pub fn tracking_config(&self) -> Result<TrackingConfig> {
        let config = TrackingConfig::new(self.bodyweight, self.exercises.iter().cloned())?;
        if config.exercise_names.is_empty() {
            return Err(WorkoutError::Config(
                "no exercises to track; pass at least one --exercise".to_string(),
            ));
        }
        Ok(config)
    }

    /// `--debug` overrides log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            data_dir: Some(s.data_dir.clone()),
            exercises: if s.exercises.is_empty() {
                None
            } else {
                Some(s.exercises.clone())
            },
            bodyweight: Some(s.bodyweight),
            view: Some(s.view.clone()),
            format: Some(s.format.clone()),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tmp_config_path(tmp: &TempDir) -> PathBuf {
        LastUsedParams::config_path_in(tmp.path())
    }

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        let params = LastUsedParams {
            data_dir: Some(PathBuf::from("/logs")),
            exercises: Some(vec!["Squat".to_string(), "Pull Up".to_string()]),
            bodyweight: Some(72.5),
            view: Some("daily".to_string()),
            format: Some("csv".to_string()),
        };

        params.save_to(&path).expect("save");
        let loaded = LastUsedParams::load_from(&path);

        assert_eq!(loaded, params);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_last_used_params_default_when_missing_or_corrupt() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        assert_eq!(LastUsedParams::load_from(&path), LastUsedParams::default());

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(LastUsedParams::load_from(&path), LastUsedParams::default());
    }

    #[test]
    fn test_last_used_params_clear() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        LastUsedParams::default().save_to(&path).expect("save");
        assert!(path.exists());

        LastUsedParams::clear_at(&path).expect("clear");
        assert!(!path.exists());
        // Clearing twice is fine.
        LastUsedParams::clear_at(&path).expect("clear again");
    }

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["workout-log"]);

        assert_eq!(settings.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert!(settings.exercises.is_empty());
        assert_eq!(settings.bodyweight, 80.0);
        assert_eq!(settings.view, "sets");
        assert_eq!(settings.format, "table");
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
        assert!(!settings.clear);
    }

    #[test]
    fn test_settings_repeated_exercise_flag() {
        let settings = Settings::parse_from([
            "workout-log",
            "-e",
            "Bench Press (Barbell)",
            "--exercise",
            "Pull Up",
        ]);
        assert_eq!(settings.exercises, vec!["Bench Press (Barbell)", "Pull Up"]);
    }

    #[test]
    fn test_settings_rejects_unknown_view() {
        let result = Settings::try_parse_from(["workout-log", "--view", "monthly"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_tracking_config_requires_exercises() {
        let settings = Settings::parse_from(["workout-log"]);
        let err = settings.tracking_config().unwrap_err();
        assert!(err.to_string().contains("no exercises to track"));
    }

    #[test]
    fn test_tracking_config_threads_bodyweight() {
        let settings =
            Settings::parse_from(["workout-log", "-e", "Dips", "--bodyweight", "72.5"]);
        let config = settings.tracking_config().unwrap();
        assert_eq!(config.bodyweight, 72.5);
        assert_eq!(config.exercise_names, vec!["Dips"]);
    }

    #[test]
    fn test_load_with_last_used_merges_persisted_exercises() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            exercises: Some(vec!["Squat".to_string()]),
            bodyweight: Some(70.0),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings =
            Settings::load_with_last_used_impl(vec!["workout-log".into()], &config_path);
        assert_eq!(settings.exercises, vec!["Squat"]);
        assert_eq!(settings.bodyweight, 70.0);
    }

    #[test]
    fn test_load_with_last_used_cli_overrides_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            exercises: Some(vec!["Squat".to_string()]),
            view: Some("daily".to_string()),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(
            vec![
                "workout-log".into(),
                "-e".into(),
                "Deadlift".into(),
                "--view".into(),
                "workouts".into(),
            ],
            &config_path,
        );
        assert_eq!(settings.exercises, vec!["Deadlift"]);
        assert_eq!(settings.view, "workouts");

        let persisted = LastUsedParams::load_from(&config_path);
        assert_eq!(persisted.exercises, Some(vec!["Deadlift".to_string()]));
    }

    #[test]
    fn test_load_with_last_used_clear_removes_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            format: Some("json".to_string()),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(
            vec!["workout-log".into(), "--clear".into()],
            &config_path,
        );

        assert!(!config_path.exists());
        assert_eq!(settings.format, "table");
    }

    #[test]
    fn test_load_with_last_used_debug_overrides_log_level() {
        let tmp = TempDir::new().expect("tempdir");
        let settings = Settings::load_with_last_used_impl(
            vec!["workout-log".into(), "--debug".into()],
            &tmp_config_path(&tmp),
        );
        assert_eq!(settings.log_level, "DEBUG");
    }
}
