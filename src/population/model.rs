//! Candidates, populations and fitness evaluation.

use super::bounds::Bounds;
use crate::benchmark::Benchmark;
use crate::error::Result;
use rand::Rng;
use std::cmp::Ordering;

/// One point of the search space with its fitness.
///
/// Lower fitness is better. An unevaluated candidate has fitness
/// `f64::INFINITY`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Coordinates, one per dimension.
    pub position: Vec<f64>,
    /// Objective value at `position`.
    pub fitness: f64,
}

impl Candidate {
    /// Creates an unevaluated candidate.
    pub fn new(position: Vec<f64>) -> Self {
        Self {
            position,
            fitness: f64::INFINITY,
        }
    }

    /// Orders candidates by fitness, NaN last.
    pub fn cmp_fitness(&self, other: &Self) -> Ordering {
        match (self.fitness.is_nan(), other.fitness.is_nan()) {
            (false, false) => self.fitness.total_cmp(&other.fitness),
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
        }
    }
}

/// Counts objective calls for one optimizer run.
///
/// Every evaluation of the run goes through this wrapper.
#[derive(Debug)]
pub struct Evaluator<'a> {
    benchmark: &'a Benchmark,
    evaluations: u64,
}

impl<'a> Evaluator<'a> {
    /// Wraps `benchmark` with a zeroed counter.
    pub fn new(benchmark: &'a Benchmark) -> Self {
        Self {
            benchmark,
            evaluations: 0,
        }
    }

    /// Evaluates `x`, propagating domain errors.
    pub fn evaluate(&mut self, x: &[f64]) -> Result<f64> {
        self.evaluations += 1;
        self.benchmark.evaluate(x)
    }

    /// Number of calls made so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}

/// A fixed-size set of candidates for a single run.
///
/// The size never changes after [`initialize`](Population::initialize).
#[derive(Debug, Clone)]
pub struct Population {
    candidates: Vec<Candidate>,
}

impl Population {
    /// Samples `size` candidates uniformly inside `bounds`.
    ///
    /// Each coordinate is drawn independently from `[lb_i, ub_i]`.
    pub fn initialize<R: Rng>(bounds: &Bounds, size: usize, rng: &mut R) -> Self {
        let candidates = (0..size)
            .map(|_| {
                let position = (0..bounds.dim())
                    .map(|d| bounds.lower()[d] + rng.random_range(0.0..1.0) * bounds.span(d))
                    .collect();
                Candidate::new(position)
            })
            .collect();
        Self { candidates }
    }

    /// Builds a population from existing candidates.
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// Computes the fitness of every candidate.
    ///
    /// Stops at the first evaluation error.
    pub fn evaluate(&mut self, evaluator: &mut Evaluator<'_>) -> Result<()> {
        for candidate in &mut self.candidates {
            candidate.fitness = evaluator.evaluate(&candidate.position)?;
        }
        Ok(())
    }

    /// Index of the best candidate (first one on ties).
    ///
    /// Returns `None` for an empty population.
    pub fn best_index(&self) -> Option<usize> {
        self.candidates
            .iter()
            .enumerate()
            .min_by(|(i, a), (j, b)| a.cmp_fitness(b).then(i.cmp(j)))
            .map(|(i, _)| i)
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns `true` if the population holds no candidates.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidate at `index`.
    pub fn get(&self, index: usize) -> &Candidate {
        &self.candidates[index]
    }

    /// Mutable candidate at `index`.
    pub fn get_mut(&mut self, index: usize) -> &mut Candidate {
        &mut self.candidates[index]
    }

    /// All candidates in order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Copies of all candidates sorted by fitness, best first.
    pub fn sorted(&self) -> Vec<Candidate> {
        let mut sorted = self.candidates.clone();
        sorted.sort_by(Candidate::cmp_fitness);
        sorted
    }
}
