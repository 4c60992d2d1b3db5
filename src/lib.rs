//! Swarm metaheuristic benchmarking framework.
//!
//! Runs population-based optimizers against a suite of continuous benchmark
//! functions and measures solution quality and parallel scalability:
//!
//! - **Benchmarks**: Nine standard minimization functions (sphere, ackley,
//!   rastrigin, ...) behind an index-based provider contract.
//! - **Population**: Box-constrained candidate sets with uniform
//!   initialization, clipping and fitness bookkeeping.
//! - **Optimizers**: Salp Swarm (SSA), Moth-Flame (MFO) and Golden Eagle
//!   (GEA) sharing one run loop that records a convergence trace.
//! - **Harness**: Executes every (algorithm, benchmark) pair as an isolated
//!   task on a bounded worker pool, seeding each task reproducibly.
//! - **Report**: CSV report with batch totals, a cumulative scalability
//!   table and optional convergence traces.
//!
//! # Quick Start
//!
//! ```
//! use u_swarmbench::benchmark::StandardSuite;
//! use u_swarmbench::harness::{BatchConfig, ExecutionPolicy, Harness};
//! use u_swarmbench::optimizer::RunConfig;
//!
//! let config = BatchConfig::default()
//!     .with_benchmarks(vec![0, 5])
//!     .with_run(RunConfig::default().with_population_size(10).with_max_iteration(20))
//!     .with_policy(ExecutionPolicy::sequential())
//!     .with_root_seed(42);
//!
//! let results = Harness::run(&StandardSuite, &config).unwrap();
//! assert_eq!(results.len(), 6);
//!
//! let mut csv = Vec::new();
//! u_swarmbench::report::write_report(&mut csv, &results).unwrap();
//! ```

pub mod benchmark;
pub mod error;
pub mod harness;
pub mod optimizer;
pub mod population;
pub mod random;
pub mod report;

pub use error::{Error, Result};
