//! Batch configuration.
//!
//! [`BatchConfig`] describes the cross product of benchmarks × algorithms
//! (optionally × population sizes × iteration budgets) to run and how to
//! dispatch it ([`ExecutionPolicy`]).

use super::types::Task;
use crate::benchmark::StandardSuite;
use crate::error::{Error, Result};
use crate::optimizer::{Algorithm, RunConfig};
use std::io::{BufRead, Write};

/// Number of hardware threads available to this process.
pub fn hardware_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// How tasks are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionMode {
    /// Tasks run in order on the calling thread (worker 0).
    Sequential,

    /// Tasks run on a dedicated pool of `pool_width` worker threads.
    Parallel,
}

/// Execution policy: pool width and dispatch mode.
///
/// # Examples
///
/// ```
/// use u_swarmbench::harness::{ExecutionMode, ExecutionPolicy};
///
/// let policy = ExecutionPolicy::parallel(1);
/// assert_eq!(policy.mode, ExecutionMode::Parallel);
/// assert!(policy.validate().is_ok());
///
/// assert!(ExecutionPolicy::parallel(0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionPolicy {
    /// Requested number of workers. Must lie in `[1, hardware_parallelism()]`.
    pub pool_width: usize,

    /// Dispatch mode.
    pub mode: ExecutionMode,
}

impl ExecutionPolicy {
    /// Single-threaded execution on the caller's thread.
    pub fn sequential() -> Self {
        Self {
            pool_width: 1,
            mode: ExecutionMode::Sequential,
        }
    }

    /// A pool of `pool_width` workers.
    pub fn parallel(pool_width: usize) -> Self {
        Self {
            pool_width,
            mode: ExecutionMode::Parallel,
        }
    }

    /// A pool using every hardware thread.
    pub fn available() -> Self {
        Self::parallel(hardware_parallelism())
    }

    /// Validates the pool width against the hardware.
    pub fn validate(&self) -> Result<()> {
        let max = hardware_parallelism();
        if self.pool_width == 0 || self.pool_width > max {
            return Err(Error::InvalidConfig(format!(
                "pool width must be between 1 and {max}, got {}",
                self.pool_width
            )));
        }
        if self.mode == ExecutionMode::Sequential && self.pool_width != 1 {
            return Err(Error::InvalidConfig(
                "sequential execution uses exactly one worker".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        Self::available()
    }
}

/// Reads a pool width from `input`, re-prompting until it lies in `[1, max]`.
///
/// Prompts and corrections go to `output`. Running out of input before a
/// valid answer is an [`Error::InvalidConfig`].
///
/// ```
/// use u_swarmbench::harness::prompt_pool_width;
///
/// let mut shown = Vec::new();
/// let width = prompt_pool_width("0\nfour\n3\n".as_bytes(), &mut shown, 4).unwrap();
/// assert_eq!(width, 3);
/// ```
pub fn prompt_pool_width<R, W>(input: R, output: &mut W, max: usize) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Available CPU cores: {max}")?;
    let mut lines = input.lines();
    loop {
        write!(output, "Enter number of cores to use (1-{max}): ")?;
        output.flush()?;
        let line = lines.next().ok_or_else(|| {
            Error::InvalidConfig("no pool width given before end of input".into())
        })??;
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=max).contains(&n) => return Ok(n),
            Ok(_) => writeln!(output, "Please enter a number between 1 and {max}")?,
            Err(_) => writeln!(output, "Please enter a valid number")?,
        }
    }
}

/// Configuration of a benchmark batch.
///
/// # Defaults
///
/// Every standard benchmark × every algorithm, `dim = 30` in
/// `[-100, 100]`, `N = 50`, 1000 iterations, one repetition, all hardware
/// threads, no parameter sweep.
///
/// # Builder Pattern
///
/// ```
/// use u_swarmbench::harness::{BatchConfig, ExecutionPolicy};
/// use u_swarmbench::optimizer::{Algorithm, RunConfig};
///
/// let config = BatchConfig::default()
///     .with_benchmarks(vec![0, 5])
///     .with_algorithms(vec![Algorithm::Gea])
///     .with_run(RunConfig::default().with_population_size(10).with_max_iteration(20))
///     .with_policy(ExecutionPolicy::sequential())
///     .with_root_seed(42);
/// assert_eq!(config.tasks().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchConfig {
    /// Benchmark indices, resolved by the provider inside each task.
    pub benchmarks: Vec<usize>,

    /// Optimizer variants.
    pub algorithms: Vec<Algorithm>,

    /// Per-run parameters. Its `seed` is ignored; each run gets a seed
    /// derived from `root_seed`.
    pub run: RunConfig,

    /// Population sizes to sweep. Empty means `run.population_size` only.
    pub population_sizes: Vec<usize>,

    /// Iteration budgets to sweep. Empty means `run.max_iteration` only.
    pub max_iterations: Vec<usize>,

    /// Root of all per-task random streams. `None` draws one at start.
    pub root_seed: Option<u64>,

    /// Independent runs per task. The best run is reported together with
    /// summary statistics over all runs.
    pub repetitions: usize,

    /// Dispatch policy.
    pub policy: ExecutionPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            benchmarks: StandardSuite::indices(),
            algorithms: Algorithm::ALL.to_vec(),
            run: RunConfig::default(),
            population_sizes: Vec::new(),
            max_iterations: Vec::new(),
            root_seed: None,
            repetitions: 1,
            policy: ExecutionPolicy::default(),
        }
    }
}

impl BatchConfig {
    /// Sets the benchmark indices.
    pub fn with_benchmarks(mut self, benchmarks: Vec<usize>) -> Self {
        self.benchmarks = benchmarks;
        self
    }

    /// Sets the algorithms.
    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }

    /// Sets the per-run parameters.
    pub fn with_run(mut self, run: RunConfig) -> Self {
        self.run = run;
        self
    }

    /// Sweeps the population size over `sizes`.
    pub fn with_population_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.population_sizes = sizes;
        self
    }

    /// Sweeps the iteration budget over `budgets`.
    pub fn with_max_iterations(mut self, budgets: Vec<usize>) -> Self {
        self.max_iterations = budgets;
        self
    }

    /// Population sizes actually enumerated.
    pub fn swept_population_sizes(&self) -> Vec<usize> {
        if self.population_sizes.is_empty() {
            vec![self.run.population_size]
        } else {
            self.population_sizes.clone()
        }
    }

    /// Iteration budgets actually enumerated.
    pub fn swept_max_iterations(&self) -> Vec<usize> {
        if self.max_iterations.is_empty() {
            vec![self.run.max_iteration]
        } else {
            self.max_iterations.clone()
        }
    }

    /// Sets the root seed.
    pub fn with_root_seed(mut self, seed: u64) -> Self {
        self.root_seed = Some(seed);
        self
    }

    /// Sets the number of repetitions per task.
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Sets the execution policy.
    pub fn with_policy(mut self, policy: ExecutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enumerates the batch: benchmark, then algorithm, then population
    /// size, then iteration budget.
    pub fn tasks(&self) -> Vec<Task> {
        let sizes = self.swept_population_sizes();
        let budgets = self.swept_max_iterations();
        let mut tasks = Vec::with_capacity(
            self.benchmarks.len() * self.algorithms.len() * sizes.len() * budgets.len(),
        );
        for &benchmark in &self.benchmarks {
            for &algorithm in &self.algorithms {
                for &population_size in &sizes {
                    for &max_iteration in &budgets {
                        tasks.push(Task {
                            index: tasks.len(),
                            algorithm,
                            benchmark,
                            population_size,
                            max_iteration,
                        });
                    }
                }
            }
        }
        tasks
    }

    /// Validates the batch before dispatch.
    pub fn validate(&self) -> Result<()> {
        if self.benchmarks.is_empty() {
            return Err(Error::InvalidConfig("no benchmarks selected".into()));
        }
        if self.algorithms.is_empty() {
            return Err(Error::InvalidConfig("no algorithms selected".into()));
        }
        if self.repetitions == 0 {
            return Err(Error::InvalidConfig(
                "repetitions must be at least 1".into(),
            ));
        }
        if self.population_sizes.contains(&0) {
            return Err(Error::InvalidConfig(
                "swept population sizes must be at least 1".into(),
            ));
        }
        if self.max_iterations.contains(&0) {
            return Err(Error::InvalidConfig(
                "swept iteration budgets must be at least 1".into(),
            ));
        }
        self.run.validate()?;
        self.policy.validate()
    }
}
