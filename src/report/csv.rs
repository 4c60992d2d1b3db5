//! CSV writers for batch reports.
//!
//! Every writer is generic over [`Write`]; the `*_file` helpers wrap them
//! with buffered file handles.

use crate::error::Result;
use crate::harness::{ResultSet, TaskOutcome};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Header row of the per-task report.
pub const REPORT_HEADER: [&str; 5] = [
    "Algorithm",
    "Benchmark",
    "Best Fitness",
    "Execution Time (s)",
    "PID",
];

/// Header row of the robustness table.
pub const ROBUSTNESS_HEADER: [&str; 8] = [
    "Optimizer",
    "Benchmark",
    "Population Size",
    "Generations",
    "Best Fitness",
    "Average Fitness",
    "StdDev",
    "Eval Count",
];

/// Header row of the scalability table.
pub const SCALABILITY_HEADER: [&str; 2] = ["Cores", "Execution Time (s)"];

/// Default scalability table name.
pub const SCALABILITY_FILE_NAME: &str = "scalability_data.csv";

/// Fitness cell written for failed tasks.
pub const FAILURE_MARKER: &str = "Error";

/// Default report file name for a pool of `pool_width` workers.
pub fn report_file_name(pool_width: usize) -> String {
    format!("optimization_results_{pool_width}_cores.csv")
}

/// Formats a fitness value for a CSV cell.
///
/// Magnitudes in `[1e-4, 1e16)` and zero use the shortest decimal that
/// round-trips; anything else uses scientific notation.
///
/// ```
/// use u_swarmbench::report::format_fitness;
///
/// assert_eq!(format_fitness(0.25), "0.25");
/// assert_eq!(format_fitness(1e-300), "1e-300");
/// ```
pub fn format_fitness(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || !value.is_finite() || (1e-4..1e16).contains(&magnitude) {
        value.to_string()
    } else {
        format!("{value:e}")
    }
}

/// Formats a duration in seconds with two decimals.
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.2}", duration.as_secs_f64())
}

/// Quotes a field if it contains a delimiter, a quote or a line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row<W, S>(writer: &mut W, fields: &[S]) -> Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    let line = fields
        .iter()
        .map(|f| escape(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{line}")?;
    Ok(())
}

/// Writes the per-task report followed by the batch summary rows.
///
/// Failed tasks carry [`FAILURE_MARKER`] as fitness and an empty time
/// cell. The `PID` column holds the worker id.
pub fn write_report<W: Write>(writer: &mut W, results: &ResultSet) -> Result<()> {
    write_row(writer, &REPORT_HEADER)?;
    for outcome in &results.outcomes {
        let (fitness, time) = match outcome {
            TaskOutcome::Success(s) => (
                format_fitness(s.result.best_fitness),
                format_seconds(s.elapsed),
            ),
            TaskOutcome::Failure(_) => (FAILURE_MARKER.to_string(), String::new()),
        };
        write_row(
            writer,
            &[
                outcome.algorithm().name().to_string(),
                outcome.benchmark_name().to_string(),
                fitness,
                time,
                outcome.worker().to_string(),
            ],
        )?;
    }

    writeln!(writer)?;
    write_row(writer, &["Total Time (s)".to_string(), format_seconds(results.total_time)])?;
    write_row(writer, &["Requested CPU Cores".to_string(), results.pool_width.to_string()])?;
    write_row(
        writer,
        &["Actual CPU Processes Used".to_string(), results.distinct_workers().to_string()],
    )?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the report into it.
pub fn write_report_file(path: &Path, results: &ResultSet) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_report(&mut writer, results)?;
    writer.flush()?;
    Ok(())
}

/// Appends a `(pool_width, total_time)` row to the scalability table.
///
/// The header is written only when the file is new or empty.
pub fn append_scalability_sample(path: &Path, pool_width: usize, total_time: Duration) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let is_new = file.metadata()?.len() == 0;
    let mut writer = BufWriter::new(file);
    if is_new {
        write_row(&mut writer, &SCALABILITY_HEADER)?;
    }
    write_row(&mut writer, &[pool_width.to_string(), format_seconds(total_time)])?;
    writer.flush()?;
    Ok(())
}

/// Writes one convergence row per successful task:
/// `Algorithm,Benchmark,t0,t1,...`.
///
/// The header spans the longest trace in the set.
pub fn write_convergence<W: Write>(writer: &mut W, results: &ResultSet) -> Result<()> {
    let width = results
        .successes()
        .map(|s| s.result.trace.len())
        .max()
        .unwrap_or(0);

    let mut header = vec!["Algorithm".to_string(), "Benchmark".to_string()];
    header.extend((0..width).map(|t| format!("t{t}")));
    write_row(writer, &header)?;

    for success in results.successes() {
        let mut row = Vec::with_capacity(success.result.trace.len() + 2);
        row.push(success.task.algorithm.name().to_string());
        row.push(success.benchmark_name.clone());
        row.extend(success.result.trace.iter().map(|&f| format_fitness(f)));
        write_row(writer, &row)?;
    }
    Ok(())
}

/// Writes one row per successful task with its repetition statistics:
/// `Optimizer,Benchmark,Population Size,Generations,Best Fitness,
/// Average Fitness,StdDev,Eval Count`.
pub fn write_robustness<W: Write>(writer: &mut W, results: &ResultSet) -> Result<()> {
    write_row(writer, &ROBUSTNESS_HEADER)?;
    for success in results.successes() {
        write_row(
            writer,
            &[
                success.task.algorithm.name().to_string(),
                success.benchmark_name.clone(),
                success.task.population_size.to_string(),
                success.task.max_iteration.to_string(),
                format_fitness(success.stats.best),
                format_fitness(success.stats.mean),
                format_fitness(success.stats.std_dev),
                success.stats.evaluations.to_string(),
            ],
        )?;
    }
    Ok(())
}
