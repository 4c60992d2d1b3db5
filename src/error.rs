//! Error types shared by the optimizers, the harness and the reporter.
//!
//! Per-task errors are converted into failure outcomes by the harness and
//! never abort a batch. Only [`Error::PoolBuild`] and configuration errors
//! raised before dispatch are fatal to a whole run.

use thiserror::Error;

/// Errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The objective function rejected or failed on an input.
    #[error("objective '{benchmark}' failed: {message}")]
    ObjectiveEvaluation {
        /// Name of the failing benchmark.
        benchmark: String,
        /// Message reported by the function.
        message: String,
    },

    /// No benchmark is registered under the requested index.
    #[error("unknown benchmark index: {0}")]
    UnknownBenchmark(usize),

    /// No optimizer variant has the requested name.
    #[error("unknown algorithm: '{0}' (expected one of SSA, MFO, GEA)")]
    UnknownAlgorithm(String),

    /// A configuration value is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    PoolBuild(String),

    /// Report persistence failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if this error is confined to a single task.
    ///
    /// Such errors are reported as a failure row; the rest of the batch
    /// keeps running.
    pub fn is_task_local(&self) -> bool {
        matches!(
            self,
            Error::ObjectiveEvaluation { .. }
                | Error::UnknownBenchmark(_)
                | Error::UnknownAlgorithm(_)
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
