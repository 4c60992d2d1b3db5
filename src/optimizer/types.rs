//! Core trait definitions for the optimizer framework.
//!
//! The shared run loop (initialize, move, clip, evaluate, track the best)
//! lives in [`OptimizerRunner`](super::OptimizerRunner). Each variant only
//! supplies a [`MovementRule`].

use crate::error::Error;
use crate::population::{Bounds, Candidate, Population};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Read-only state handed to a movement rule at each step.
#[derive(Debug, Clone, Copy)]
pub struct IterationContext<'a> {
    /// Current iteration, starting at 1.
    pub iteration: usize,

    /// Iteration budget of the run.
    pub max_iteration: usize,

    /// Search space.
    pub bounds: &'a Bounds,

    /// Best candidate found so far.
    pub best: &'a Candidate,
}

/// Position update of one optimizer variant.
///
/// The runner calls [`begin_iteration`](MovementRule::begin_iteration) once
/// per iteration, then [`move_candidate`](MovementRule::move_candidate) for
/// each index in order. Updates are applied in place, so a rule that reads
/// other candidates sees the ones already moved in this iteration.
///
/// The rule must not clip or evaluate; the runner does both after every
/// move.
pub trait MovementRule {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Prepares per-iteration state. The default does nothing.
    fn begin_iteration<R: Rng>(
        &mut self,
        _ctx: &IterationContext<'_>,
        _population: &Population,
        _rng: &mut R,
    ) {
    }

    /// Moves the candidate at `index`.
    fn move_candidate<R: Rng>(
        &mut self,
        index: usize,
        ctx: &IterationContext<'_>,
        population: &mut Population,
        rng: &mut R,
    );
}

/// The optimizer variants available to the harness.
///
/// # Examples
///
/// ```
/// use u_swarmbench::optimizer::Algorithm;
///
/// let alg: Algorithm = "gea".parse().unwrap();
/// assert_eq!(alg, Algorithm::Gea);
/// assert_eq!(alg.to_string(), "GEA");
/// assert!("PSO".parse::<Algorithm>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Salp Swarm Algorithm.
    Ssa,
    /// Moth-Flame Optimization.
    Mfo,
    /// Golden Eagle optimizer.
    Gea,
}

impl Algorithm {
    /// All variants, in report order.
    pub const ALL: [Algorithm; 3] = [Algorithm::Ssa, Algorithm::Mfo, Algorithm::Gea];

    /// Upper-case report name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Ssa => "SSA",
            Algorithm::Mfo => "MFO",
            Algorithm::Gea => "GEA",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}
