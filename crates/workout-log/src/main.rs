mod bootstrap;
mod render;

use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use workout_core::settings::Settings;
use workout_data::aggregator::{build_set_table, load_workouts, summarize_daily, summarize_workouts};

use crate::render::{OutputFormat, View};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("workout-log v{} starting", env!("CARGO_PKG_VERSION"));

    let config = settings.tracking_config()?;
    let view: View = settings.view.parse()?;
    let format: OutputFormat = settings.format.parse()?;

    tracing::info!(
        "Reading {} (tracking {} exercises, bodyweight {} kg, view {})",
        settings.data_dir.display(),
        config.exercise_names.len(),
        config.bodyweight,
        settings.view
    );

    let workouts = load_workouts(&settings.data_dir, &config)
        .with_context(|| format!("loading workouts from {}", settings.data_dir.display()))?;

    let mut out = BufWriter::new(std::io::stdout().lock());

    match view {
        View::Sets => {
            let table = build_set_table(workouts);
            tracing::info!("{} sets extracted", table.len());
            render::render_sets(&table, format, &mut out)?;
        }
        View::Daily => {
            let table = build_set_table(workouts);
            render::render_daily(&summarize_daily(&table), format, &mut out)?;
        }
        View::Workouts => {
            render::render_workouts(&summarize_workouts(&workouts), format, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
