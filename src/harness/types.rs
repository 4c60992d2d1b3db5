//! Task and outcome types.

use super::config::ExecutionMode;
use crate::optimizer::{Algorithm, OptimizationResult};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

/// Identifier of the worker that executed a task.
///
/// Assigned by the pool: the worker thread index in parallel mode, `0` in
/// sequential mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerId(pub usize);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One (algorithm, benchmark, N, T) combination of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    /// Position in the batch; also selects the task's random stream.
    pub index: usize,

    /// Optimizer variant.
    pub algorithm: Algorithm,

    /// Benchmark index passed to the provider.
    pub benchmark: usize,

    /// Population size `N` of every run of the task.
    pub population_size: usize,

    /// Iteration budget of every run of the task.
    pub max_iteration: usize,
}

/// Summary over the repetitions of one task.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepetitionStats {
    /// Number of runs.
    pub runs: usize,

    /// Lowest final fitness.
    pub best: f64,

    /// Mean final fitness.
    pub mean: f64,

    /// Population standard deviation of the final fitness.
    pub std_dev: f64,

    /// Objective evaluations summed over all runs.
    pub evaluations: u64,
}

impl RepetitionStats {
    /// Computes the summary of `fitnesses`.
    ///
    /// An empty slice yields `NaN` statistics.
    pub fn from_runs(fitnesses: &[f64], evaluations: u64) -> Self {
        let runs = fitnesses.len();
        if runs == 0 {
            return Self {
                runs,
                best: f64::NAN,
                mean: f64::NAN,
                std_dev: f64::NAN,
                evaluations,
            };
        }
        let best = fitnesses.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = fitnesses.iter().sum::<f64>() / runs as f64;
        let variance = fitnesses.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / runs as f64;
        Self {
            runs,
            best,
            mean,
            std_dev: variance.sqrt(),
            evaluations,
        }
    }
}

/// A task that completed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskSuccess {
    /// The task.
    pub task: Task,

    /// Name reported by the benchmark.
    pub benchmark_name: String,

    /// Best run of the task.
    pub result: OptimizationResult,

    /// Statistics over all runs of the task.
    pub stats: RepetitionStats,

    /// Wall-clock time of the whole task.
    pub elapsed: Duration,

    /// Worker that executed the task.
    pub worker: WorkerId,
}

/// A task that failed during setup or execution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskFailure {
    /// The task.
    pub task: Task,

    /// Benchmark name, or `benchmark#<index>` if it could not be resolved.
    pub benchmark_name: String,

    /// Error or panic message.
    pub message: String,

    /// `true` when the error is confined to this task (domain error,
    /// unknown benchmark); `false` for panics.
    pub task_local: bool,

    /// Worker that executed the task.
    pub worker: WorkerId,
}

/// Result of one task: either a success or a tagged failure.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskOutcome {
    /// The optimizer ran to completion.
    Success(TaskSuccess),
    /// The task failed; siblings are unaffected.
    Failure(TaskFailure),
}

impl TaskOutcome {
    /// The task this outcome belongs to.
    pub fn task(&self) -> &Task {
        match self {
            TaskOutcome::Success(s) => &s.task,
            TaskOutcome::Failure(f) => &f.task,
        }
    }

    /// Optimizer variant of the task.
    pub fn algorithm(&self) -> Algorithm {
        self.task().algorithm
    }

    /// Benchmark name as written in reports.
    pub fn benchmark_name(&self) -> &str {
        match self {
            TaskOutcome::Success(s) => &s.benchmark_name,
            TaskOutcome::Failure(f) => &f.benchmark_name,
        }
    }

    /// Population size the task ran with.
    pub fn population_size(&self) -> usize {
        self.task().population_size
    }

    /// Iteration budget the task ran with.
    pub fn max_iteration(&self) -> usize {
        self.task().max_iteration
    }

    /// Worker that executed the task.
    pub fn worker(&self) -> WorkerId {
        match self {
            TaskOutcome::Success(s) => s.worker,
            TaskOutcome::Failure(f) => f.worker,
        }
    }

    /// Returns `true` for a success.
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success(_))
    }

    /// Best fitness, for successes.
    pub fn best_fitness(&self) -> Option<f64> {
        match self {
            TaskOutcome::Success(s) => Some(s.result.best_fitness),
            TaskOutcome::Failure(_) => None,
        }
    }

    /// Task duration, for successes.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            TaskOutcome::Success(s) => Some(s.elapsed),
            TaskOutcome::Failure(_) => None,
        }
    }
}

/// Everything a batch produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultSet {
    /// One outcome per task, in task order.
    pub outcomes: Vec<TaskOutcome>,

    /// Wall-clock time from dispatch to the final join.
    pub total_time: Duration,

    /// Requested pool width.
    pub pool_width: usize,

    /// Dispatch mode used.
    pub mode: ExecutionMode,

    /// Distinct workers that executed at least one task.
    pub workers: BTreeSet<WorkerId>,

    /// Root seed of the batch; rerunning with it reproduces every task.
    pub root_seed: u64,
}

impl ResultSet {
    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns `true` if the batch produced no outcome.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of distinct workers used.
    pub fn distinct_workers(&self) -> usize {
        self.workers.len()
    }

    /// Successful outcomes.
    pub fn successes(&self) -> impl Iterator<Item = &TaskSuccess> {
        self.outcomes.iter().filter_map(|o| match o {
            TaskOutcome::Success(s) => Some(s),
            TaskOutcome::Failure(_) => None,
        })
    }

    /// Failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &TaskFailure> {
        self.outcomes.iter().filter_map(|o| match o {
            TaskOutcome::Failure(f) => Some(f),
            TaskOutcome::Success(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_single_run() {
        let stats = RepetitionStats::from_runs(&[3.5], 100);
        assert_eq!(stats.runs, 1);
        assert_eq!(stats.best, 3.5);
        assert_eq!(stats.mean, 3.5);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.evaluations, 100);
    }

    #[test]
    fn test_stats_multiple_runs() {
        let stats = RepetitionStats::from_runs(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 8);
        assert_eq!(stats.best, 2.0);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_stats_empty() {
        let stats = RepetitionStats::from_runs(&[], 0);
        assert_eq!(stats.runs, 0);
        assert!(stats.mean.is_nan());
    }

    #[test]
    fn test_outcome_accessors() {
        let task = Task {
            index: 3,
            algorithm: Algorithm::Mfo,
            benchmark: 7,
            population_size: 100,
            max_iteration: 250,
        };
        let failure = TaskOutcome::Failure(TaskFailure {
            task,
            benchmark_name: "schwefel".into(),
            message: "boom".into(),
            task_local: true,
            worker: WorkerId(2),
        });
        assert_eq!(failure.algorithm(), Algorithm::Mfo);
        assert_eq!(failure.benchmark_name(), "schwefel");
        assert_eq!(failure.worker(), WorkerId(2));
        assert!(!failure.is_success());
        assert_eq!(failure.best_fitness(), None);
        assert_eq!(failure.elapsed(), None);
        assert_eq!(failure.task().index, 3);
        assert_eq!(failure.population_size(), 100);
        assert_eq!(failure.max_iteration(), 250);
    }
}
