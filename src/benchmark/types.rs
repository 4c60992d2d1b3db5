//! Objective function contract.
//!
//! A [`Benchmark`] is a named, pure scalar function `R^dim -> R`. Benchmarks
//! are shared across worker threads, so the wrapped function must be
//! `Send + Sync` and free of shared mutable state.

use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Raw benchmark function signature.
///
/// Returns `Err(message)` when the input is outside the function's domain.
pub type BenchmarkFn = fn(&[f64]) -> std::result::Result<f64, String>;

type SharedFn = Arc<dyn Fn(&[f64]) -> std::result::Result<f64, String> + Send + Sync>;

/// A named objective function to be minimized.
///
/// # Examples
///
/// ```
/// use u_swarmbench::benchmark::Benchmark;
///
/// let sum_sq = Benchmark::from_fn("sum_squares", |x: &[f64]| Ok(x.iter().map(|v| v * v).sum()));
/// assert_eq!(sum_sq.evaluate(&[1.0, 2.0]).unwrap(), 5.0);
/// ```
#[derive(Clone)]
pub struct Benchmark {
    name: String,
    function: SharedFn,
}

impl Benchmark {
    /// Wraps a plain function pointer.
    pub fn new(name: impl Into<String>, function: BenchmarkFn) -> Self {
        Self::from_fn(name, function)
    }

    /// Wraps any thread-safe closure.
    pub fn from_fn<F>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&[f64]) -> std::result::Result<f64, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            function: Arc::new(function),
        }
    }

    /// The benchmark's name, as written in reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluates the function at `x`.
    ///
    /// Domain failures are tagged with the benchmark name.
    pub fn evaluate(&self, x: &[f64]) -> Result<f64> {
        (self.function)(x).map_err(|message| Error::ObjectiveEvaluation {
            benchmark: self.name.clone(),
            message,
        })
    }
}

impl fmt::Debug for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Benchmark").field("name", &self.name).finish()
    }
}

/// Maps benchmark indices to objective functions.
///
/// The harness calls [`select`](BenchmarkProvider::select) from worker
/// threads, once per task.
pub trait BenchmarkProvider: Send + Sync {
    /// Returns the benchmark registered under `index`.
    ///
    /// Fails with [`Error::UnknownBenchmark`] for unsupported indices.
    fn select(&self, index: usize) -> Result<Benchmark>;
}

impl<P: BenchmarkProvider + ?Sized> BenchmarkProvider for &P {
    fn select(&self, index: usize) -> Result<Benchmark> {
        (**self).select(index)
    }
}

/// A provider backed by an explicit list of benchmarks, indexed by position.
///
/// Useful for custom suites and for tests that need a misbehaving objective.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkList {
    benchmarks: Vec<Benchmark>,
}

impl BenchmarkList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a benchmark; its index is the previous length.
    pub fn with(mut self, benchmark: Benchmark) -> Self {
        self.benchmarks.push(benchmark);
        self
    }

    /// Number of registered benchmarks.
    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    /// Returns `true` if no benchmark is registered.
    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}

impl BenchmarkProvider for BenchmarkList {
    fn select(&self, index: usize) -> Result<Benchmark> {
        self.benchmarks
            .get(index)
            .cloned()
            .ok_or(Error::UnknownBenchmark(index))
    }
}
