//! Batch dispatch.
//!
//! [`Harness`] enumerates a [`BatchConfig`] into tasks, runs every task in
//! isolation and joins on all of them before returning the [`ResultSet`].

use super::config::{BatchConfig, ExecutionMode};
use super::types::{RepetitionStats, ResultSet, Task, TaskFailure, TaskOutcome, TaskSuccess, WorkerId};
use crate::benchmark::{Benchmark, BenchmarkProvider};
use crate::error::{Error, Result};
use crate::optimizer::{OptimizationResult, OptimizerRunner};
use crate::random::derive_seed;
use rayon::prelude::*;
use std::any::Any;
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

/// Executes benchmark batches.
///
/// # Usage
///
/// ```
/// use u_swarmbench::benchmark::StandardSuite;
/// use u_swarmbench::harness::{BatchConfig, ExecutionPolicy, Harness};
/// use u_swarmbench::optimizer::RunConfig;
/// use u_swarmbench::population::Bounds;
///
/// let config = BatchConfig::default()
///     .with_benchmarks(vec![0, 1])
///     .with_run(
///         RunConfig::new(Bounds::uniform(-5.0, 5.0, 3).unwrap())
///             .with_population_size(8)
///             .with_max_iteration(10),
///     )
///     .with_policy(ExecutionPolicy::parallel(1))
///     .with_root_seed(7);
///
/// let results = Harness::run(&StandardSuite, &config).unwrap();
/// assert_eq!(results.len(), 6);
/// assert!(results.distinct_workers() <= 1);
/// ```
pub struct Harness;

impl Harness {
    /// Runs every task of the batch and waits for all of them.
    ///
    /// Per-task errors and panics become [`TaskOutcome::Failure`]. Only an
    /// invalid configuration or a pool that cannot be built fail the call.
    pub fn run<P>(provider: &P, config: &BatchConfig) -> Result<ResultSet>
    where
        P: BenchmarkProvider + ?Sized,
    {
        config.validate()?;
        let root_seed = config.root_seed.unwrap_or_else(rand::random);
        let tasks = config.tasks();
        let collector = Mutex::new(BTreeSet::new());

        let _span = tracing::info_span!(
            "batch",
            tasks = tasks.len(),
            pool_width = config.policy.pool_width,
            mode = ?config.policy.mode,
            root_seed
        )
        .entered();
        tracing::info!("dispatching {} tasks", tasks.len());

        let started = Instant::now();
        let outcomes: Vec<TaskOutcome> = match config.policy.mode {
            ExecutionMode::Sequential => tasks
                .iter()
                .map(|task| execute_task(provider, task, config, root_seed, WorkerId(0), &collector))
                .collect(),
            ExecutionMode::Parallel => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(config.policy.pool_width)
                    .thread_name(|i| format!("swarmbench-worker-{i}"))
                    .build()
                    .map_err(|e| Error::PoolBuild(e.to_string()))?;
                pool.install(|| {
                    tasks
                        .par_iter()
                        .map(|task| {
                            let worker = WorkerId(rayon::current_thread_index().unwrap_or(0));
                            execute_task(provider, task, config, root_seed, worker, &collector)
                        })
                        .collect()
                })
            }
        };
        let total_time = started.elapsed();

        let workers = collector
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);

        let results = ResultSet {
            outcomes,
            total_time,
            pool_width: config.policy.pool_width,
            mode: config.policy.mode,
            workers,
            root_seed,
        };
        tracing::info!(
            succeeded = results.successes().count(),
            failed = results.failures().count(),
            workers = results.distinct_workers(),
            total_ms = total_time.as_millis() as u64,
            "batch finished"
        );
        Ok(results)
    }
}

/// Runs one task to completion, converting any error or panic into a
/// failure outcome.
fn execute_task<P>(
    provider: &P,
    task: &Task,
    config: &BatchConfig,
    root_seed: u64,
    worker: WorkerId,
    collector: &Mutex<BTreeSet<WorkerId>>,
) -> TaskOutcome
where
    P: BenchmarkProvider + ?Sized,
{
    collector
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(worker);

    let started = Instant::now();
    let mut resolved_name: Option<String> = None;
    let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
        let benchmark = provider.select(task.benchmark)?;
        resolved_name = Some(benchmark.name().to_string());
        run_repetitions(task, &benchmark, config, root_seed)
    }));
    let elapsed = started.elapsed();
    let benchmark_name =
        resolved_name.unwrap_or_else(|| format!("benchmark#{}", task.benchmark));

    let (message, task_local) = match attempt {
        Ok(Ok((result, stats))) => {
            tracing::debug!(
                algorithm = %task.algorithm,
                benchmark = %benchmark_name,
                population_size = task.population_size,
                max_iteration = task.max_iteration,
                %worker,
                best_fitness = result.best_fitness,
                elapsed_ms = elapsed.as_millis() as u64,
                "task finished"
            );
            return TaskOutcome::Success(TaskSuccess {
                task: *task,
                benchmark_name,
                result,
                stats,
                elapsed,
                worker,
            });
        }
        Ok(Err(err)) => (err.to_string(), err.is_task_local()),
        Err(payload) => (panic_message(payload.as_ref()), false),
    };

    tracing::warn!(
        algorithm = %task.algorithm,
        benchmark = %benchmark_name,
        population_size = task.population_size,
        max_iteration = task.max_iteration,
        %worker,
        task_local,
        error = %message,
        "task failed"
    );
    TaskOutcome::Failure(TaskFailure {
        task: *task,
        benchmark_name,
        message,
        task_local,
        worker,
    })
}

/// Runs the configured number of repetitions with the task's `N` and `T`
/// and keeps the best one.
fn run_repetitions(
    task: &Task,
    benchmark: &Benchmark,
    config: &BatchConfig,
    root_seed: u64,
) -> Result<(OptimizationResult, RepetitionStats)> {
    let repetitions = config.repetitions;
    let mut best: Option<OptimizationResult> = None;
    let mut fitnesses = Vec::with_capacity(repetitions);
    let mut evaluations = 0u64;

    for rep in 0..repetitions {
        let stream = (task.index * repetitions + rep) as u64;
        let run = config
            .run
            .clone()
            .with_population_size(task.population_size)
            .with_max_iteration(task.max_iteration)
            .with_seed(derive_seed(root_seed, stream));
        let result = OptimizerRunner::run(task.algorithm, benchmark, &run)?;

        fitnesses.push(result.best_fitness);
        evaluations += result.evaluations;
        if best
            .as_ref()
            .map_or(true, |b| result.best_fitness < b.best_fitness)
        {
            best = Some(result);
        }
    }

    let best = best.ok_or_else(|| Error::InvalidConfig("repetitions must be at least 1".into()))?;
    Ok((best, RepetitionStats::from_runs(&fitnesses, evaluations)))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic: task aborted".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
