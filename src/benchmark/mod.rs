//! Objective function provider.
//!
//! Maps benchmark indices to named scalar functions `R^dim -> R`.
//!
//! # Key Types
//!
//! - [`Benchmark`]: A named, thread-safe objective function
//! - [`BenchmarkProvider`]: Index → benchmark lookup used by the harness
//! - [`StandardSuite`]: The built-in nine-function suite
//! - [`BenchmarkList`]: Ad-hoc provider over an explicit list
//!
//! # References
//!
//! - Jamil & Yang (2013), "A Literature Survey of Benchmark Functions for
//!   Global Optimization Problems"

mod functions;
mod types;

pub use functions::{
    ackley, dixon_price, griewank, perm, rastrigin, rosenbrock, schwefel, sphere, zakharov,
    StandardSuite,
};
pub use types::{Benchmark, BenchmarkFn, BenchmarkList, BenchmarkProvider};
