//! Population-based optimizers.
//!
//! Three interchangeable variants share one run loop: the population is
//! initialized and evaluated, then for `max_iteration - 1` iterations every
//! candidate is moved, clipped into bounds, re-evaluated and compared
//! against the best (strict `<`). The iteration budget is the only
//! termination condition.
//!
//! # Core Traits
//!
//! - [`MovementRule`]: Per-variant position update
//!
//! # Key Types
//!
//! - [`Algorithm`]: Variant selector (SSA, MFO, GEA)
//! - [`RunConfig`]: Bounds, population size, iteration budget, seed
//! - [`OptimizerRunner`]: Executes the shared loop
//! - [`OptimizationResult`]: Best solution, convergence trace, timing
//!
//! # References
//!
//! - Mirjalili et al. (2017), "Salp Swarm Algorithm"
//! - Mirjalili (2015), "Moth-flame optimization algorithm"
//! - Mohammadi-Balani et al. (2021), "Golden eagle optimizer"

mod config;
mod gea;
mod mfo;
mod runner;
mod ssa;
mod types;

pub use config::RunConfig;
pub use gea::GoldenEagle;
pub use mfo::MothFlame;
pub use runner::{OptimizationResult, OptimizerRunner, TRACE_SENTINEL};
pub use ssa::SalpSwarm;
pub use types::{Algorithm, IterationContext, MovementRule};
