//! Rendering of set tables and summaries as text, CSV or JSON.

use std::io::Write;
use std::str::FromStr;

use serde::Serialize;
use workout_core::formatting::{csv_field, format_number, format_weight, trim_decimal};
use workout_core::models::SetRecord;
use workout_data::aggregator::{
    calculate_totals, merge_stats, DailyExerciseSummary, SetStats, WorkoutSummary,
};

/// What the binary prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Every tracked set, sorted by date.
    Sets,
    /// Totals per day and exercise.
    Daily,
    /// Totals per workout file.
    Workouts,
}

impl FromStr for View {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "sets" => Ok(View::Sets),
            "daily" => Ok(View::Daily),
            "workouts" => Ok(View::Workouts),
            other => anyhow::bail!("Unknown view: {other}"),
        }
    }
}

/// How rows are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("Unknown output format: {other}"),
        }
    }
}

// ── Public renderers ──────────────────────────────────────────────────────────

pub fn render_sets(
    records: &[SetRecord],
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return write_json(records, out);
    }

    let mut grid = Grid::new(&[
        ("date", Align::Left),
        ("exercise", Align::Left),
        ("set_number", Align::Right),
        ("weight", Align::Right),
        ("reps", Align::Right),
        ("volume", Align::Right),
    ]);
    let pretty = format == OutputFormat::Table;

    for r in records {
        grid.push(vec![
            r.date.to_string(),
            r.exercise.clone(),
            r.set_number.to_string(),
            if pretty { format_weight(r.weight) } else { r.weight.to_string() },
            r.reps.to_string(),
            if pretty { format_number(r.volume, 1) } else { r.volume.to_string() },
        ]);
    }

    if pretty {
        let totals = calculate_totals(records);
        grid.footer(vec![
            "Total".to_string(),
            String::new(),
            totals.sets.to_string(),
            String::new(),
            totals.reps.to_string(),
            format_number(totals.volume, 1),
        ]);
    }

    grid.write(format, out)
}

pub fn render_daily(
    rows: &[DailyExerciseSummary],
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return write_json(rows, out);
    }

    let mut grid = Grid::new(&stats_columns(&[("date", Align::Left), ("exercise", Align::Left)]));
    let pretty = format == OutputFormat::Table;

    for row in rows {
        let mut cells = vec![row.date.to_string(), row.exercise.clone()];
        cells.extend(stats_cells(&row.stats, pretty));
        grid.push(cells);
    }

    if pretty {
        let mut cells = vec!["Total".to_string(), String::new()];
        cells.extend(stats_cells(&merge_stats(rows.iter().map(|r| &r.stats)), true));
        grid.footer(cells);
    }

    grid.write(format, out)
}

pub fn render_workouts(
    rows: &[WorkoutSummary],
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return write_json(rows, out);
    }

    let mut grid = Grid::new(&stats_columns(&[("date", Align::Left), ("workout", Align::Left)]));
    let pretty = format == OutputFormat::Table;

    for row in rows {
        let mut cells = vec![row.date.to_string(), row.name.clone().unwrap_or_default()];
        cells.extend(stats_cells(&row.stats, pretty));
        grid.push(cells);
    }

    if pretty {
        let mut cells = vec!["Total".to_string(), format!("{} workouts", rows.len())];
        cells.extend(stats_cells(&merge_stats(rows.iter().map(|r| &r.stats)), true));
        grid.footer(cells);
    }

    grid.write(format, out)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn write_json<T: Serialize + ?Sized>(value: &T, out: &mut impl Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn stats_columns(leading: &[(&'static str, Align)]) -> Vec<(&'static str, Align)> {
    let mut columns = leading.to_vec();
    columns.extend([
        ("sets", Align::Right),
        ("reps", Align::Right),
        ("volume", Align::Right),
        ("top_weight", Align::Right),
    ]);
    columns
}

fn stats_cells(stats: &SetStats, pretty: bool) -> Vec<String> {
    if pretty {
        vec![
            stats.sets.to_string(),
            stats.reps.to_string(),
            format_number(stats.volume, 1),
            format_weight(stats.top_weight),
        ]
    } else {
        vec![
            stats.sets.to_string(),
            stats.reps.to_string(),
            stats.volume.to_string(),
            trim_decimal(stats.top_weight),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Column-aligned rows shared by the table and CSV writers.
struct Grid {
    columns: Vec<(&'static str, Align)>,
    rows: Vec<Vec<String>>,
    footer: Option<Vec<String>>,
}

impl Grid {
    fn new(columns: &[(&'static str, Align)]) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: Vec::new(),
            footer: None,
        }
    }

    fn push(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn footer(&mut self, cells: Vec<String>) {
        self.footer = Some(cells);
    }

    fn write(&self, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
        match format {
            OutputFormat::Csv => self.write_csv(out),
            _ => self.write_table(out),
        }
    }

    fn write_csv(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let header: Vec<&str> = self.columns.iter().map(|(name, _)| *name).collect();
        writeln!(out, "{}", header.join(","))?;
        for row in &self.rows {
            let fields: Vec<String> = row.iter().map(|c| csv_field(c)).collect();
            writeln!(out, "{}", fields.join(","))?;
        }
        Ok(())
    }

    fn write_table(&self, out: &mut impl Write) -> anyhow::Result<()> {
        if self.rows.is_empty() {
            writeln!(out, "No sets found.")?;
            return Ok(());
        }

        let mut widths: Vec<usize> = self.columns.iter().map(|(name, _)| name.len()).collect();
        for row in self.rows.iter().chain(self.footer.iter()) {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = self.columns.iter().map(|(name, _)| name.to_string()).collect();
        self.write_line(&header, &widths, out)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(out, "{}", rule.join("  "))?;
        for row in &self.rows {
            self.write_line(row, &widths, out)?;
        }
        if let Some(footer) = &self.footer {
            writeln!(out, "{}", rule.join("  "))?;
            self.write_line(footer, &widths, out)?;
        }
        Ok(())
    }

    fn write_line(&self, cells: &[String], widths: &[usize], out: &mut impl Write) -> anyhow::Result<()> {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .zip(&self.columns)
            .map(|((cell, width), (_, align))| {
                let pad = width.saturating_sub(cell.chars().count());
                match align {
                    Align::Left => format!("{cell}{}", " ".repeat(pad)),
                    Align::Right => format!("{}{cell}", " ".repeat(pad)),
                }
            })
            .collect();
        writeln!(out, "{}", padded.join("  ").trim_end())?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
