//! Population model.
//!
//! Owns the candidate solutions of one optimizer run and their fitness
//! values. Candidates are sampled uniformly inside the box constraints
//! and clamped back into them after every move.
//!
//! # Key Types
//!
//! - [`Bounds`]: Per-dimension box constraints
//! - [`Candidate`]: A position and its fitness
//! - [`Population`]: Fixed-size candidate set
//! - [`Evaluator`]: Counting wrapper around the objective

mod bounds;
mod model;

pub use bounds::Bounds;
pub use model::{Candidate, Evaluator, Population};
