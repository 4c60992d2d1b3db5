//! Parallel task harness.
//!
//! Runs the cross product of benchmarks × algorithms as independent tasks on
//! a bounded worker pool and gathers one outcome per task. A task that
//! errors or panics is recorded as a failure; its siblings keep running.
//!
//! # Key Types
//!
//! - [`BatchConfig`]: What to run and how to dispatch it
//! - [`ExecutionPolicy`]: Pool width and sequential/parallel mode
//! - [`prompt_pool_width`]: Interactive pool width selection
//! - [`Harness`]: Dispatches the batch and joins on every task
//! - [`TaskOutcome`]: Success or tagged failure of one task
//! - [`ResultSet`]: All outcomes plus batch timing and worker usage
//!
//! # Reproducibility
//!
//! Every run draws from its own random stream, derived from the batch's
//! root seed and the task index. Outcomes therefore do not depend on the
//! scheduling order or on the pool width.

mod config;
mod runner;
mod types;

pub use config::{
    hardware_parallelism, prompt_pool_width, BatchConfig, ExecutionMode, ExecutionPolicy,
};
pub use runner::Harness;
pub use types::{RepetitionStats, ResultSet, Task, TaskFailure, TaskOutcome, TaskSuccess, WorkerId};
