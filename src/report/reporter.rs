//! Report persistence and console summary.

use super::csv::{
    append_scalability_sample, format_fitness, report_file_name, write_convergence,
    write_report_file, write_robustness, SCALABILITY_FILE_NAME,
};
use crate::error::Result;
use crate::harness::{ResultSet, TaskOutcome};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Files written by [`Reporter::persist`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportPaths {
    /// Per-task report.
    pub report: PathBuf,

    /// Scalability table, if a sample was appended.
    pub scalability: Option<PathBuf>,

    /// Convergence table, if written.
    pub convergence: Option<PathBuf>,

    /// Robustness table, if written.
    pub robustness: Option<PathBuf>,
}

/// Writes the files of a finished batch into one directory.
///
/// # Examples
///
/// ```no_run
/// use u_swarmbench::report::Reporter;
/// # fn demo(results: &u_swarmbench::harness::ResultSet) -> u_swarmbench::Result<()> {
/// let paths = Reporter::new("out").with_scalability(true).persist(results)?;
/// println!("report: {}", paths.report.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reporter {
    output_dir: PathBuf,
    scalability: bool,
    convergence: bool,
    robustness: bool,
}

impl Reporter {
    /// Creates a reporter writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            scalability: false,
            convergence: false,
            robustness: false,
        }
    }

    /// Appends a sample to the scalability table on every persist.
    pub fn with_scalability(mut self, enabled: bool) -> Self {
        self.scalability = enabled;
        self
    }

    /// Also writes the convergence traces.
    pub fn with_convergence(mut self, enabled: bool) -> Self {
        self.convergence = enabled;
        self
    }

    /// Also writes the per-task repetition statistics.
    pub fn with_robustness(mut self, enabled: bool) -> Self {
        self.robustness = enabled;
        self
    }

    /// Output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the report (and the optional tables) for `results`.
    ///
    /// The output directory is created if missing.
    pub fn persist(&self, results: &ResultSet) -> Result<ReportPaths> {
        fs::create_dir_all(&self.output_dir)?;

        let report = self.output_dir.join(report_file_name(results.pool_width));
        write_report_file(&report, results)?;
        tracing::info!(path = %report.display(), "report written");

        let scalability = if self.scalability {
            let path = self.output_dir.join(SCALABILITY_FILE_NAME);
            append_scalability_sample(&path, results.pool_width, results.total_time)?;
            tracing::info!(path = %path.display(), "scalability sample appended");
            Some(path)
        } else {
            None
        };

        let convergence = if self.convergence {
            let path = self
                .output_dir
                .join(format!("convergence_{}_cores.csv", results.pool_width));
            let mut writer = BufWriter::new(File::create(&path)?);
            write_convergence(&mut writer, results)?;
            writer.flush()?;
            tracing::info!(path = %path.display(), "convergence traces written");
            Some(path)
        } else {
            None
        };

        let robustness = if self.robustness {
            let path = self
                .output_dir
                .join(format!("robustness_{}_cores.csv", results.pool_width));
            let mut writer = BufWriter::new(File::create(&path)?);
            write_robustness(&mut writer, results)?;
            writer.flush()?;
            tracing::info!(path = %path.display(), "robustness statistics written");
            Some(path)
        } else {
            None
        };

        Ok(ReportPaths {
            report,
            scalability,
            convergence,
            robustness,
        })
    }
}

/// Logs one line per task and the batch totals.
pub fn log_summary(results: &ResultSet) {
    for outcome in &results.outcomes {
        match outcome {
            TaskOutcome::Success(s) => tracing::info!(
                "{} on {} (N = {}, T = {}) by worker {}: best fitness = {}, mean = {}, std = {}",
                s.task.algorithm,
                s.benchmark_name,
                s.task.population_size,
                s.task.max_iteration,
                s.worker,
                format_fitness(s.result.best_fitness),
                format_fitness(s.stats.mean),
                format_fitness(s.stats.std_dev)
            ),
            TaskOutcome::Failure(f) => tracing::info!(
                "error in {} on {} by worker {}: {}",
                f.task.algorithm,
                f.benchmark_name,
                f.worker,
                f.message
            ),
        }
    }
    tracing::info!(
        "total execution time: {:.2} seconds",
        results.total_time.as_secs_f64()
    );
    tracing::info!("worker pool width requested: {}", results.pool_width);
    tracing::info!("distinct workers used: {}", results.distinct_workers());
}
