//! Optimizer run loop.
//!
//! [`OptimizerRunner`] drives the common state machine shared by every
//! variant: initialize → evaluate → (move → clip → evaluate → track best)
//! for each candidate, for each iteration.

use super::config::RunConfig;
use super::gea::GoldenEagle;
use super::mfo::MothFlame;
use super::ssa::SalpSwarm;
use super::types::{Algorithm, IterationContext, MovementRule};
use crate::benchmark::Benchmark;
use crate::error::{Error, Result};
use crate::population::{Candidate, Evaluator, Population};
use crate::random::create_rng;
use std::time::{Duration, Instant};

/// Value stored at `trace[0]`. The loop starts at iteration 1, so the
/// first slot never receives a best fitness.
pub const TRACE_SENTINEL: f64 = 0.0;

/// Result of a single optimizer run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationResult {
    /// Fitness of the best candidate found.
    pub best_fitness: f64,

    /// Position of the best candidate found (owned copy).
    pub best_candidate: Vec<f64>,

    /// Best fitness known at each iteration; `trace.len() == max_iteration`
    /// and `trace[0]` is [`TRACE_SENTINEL`].
    pub trace: Vec<f64>,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,

    /// Number of objective evaluations.
    pub evaluations: u64,

    /// Seed the run was started with.
    pub seed: u64,
}

/// Executes optimizer runs.
///
/// # Usage
///
/// ```
/// use u_swarmbench::benchmark::{BenchmarkProvider, StandardSuite};
/// use u_swarmbench::optimizer::{Algorithm, OptimizerRunner, RunConfig};
/// use u_swarmbench::population::Bounds;
///
/// let sphere = StandardSuite.select(0).unwrap();
/// let config = RunConfig::new(Bounds::uniform(-10.0, 10.0, 2).unwrap())
///     .with_population_size(4)
///     .with_max_iteration(5)
///     .with_seed(42);
///
/// let result = OptimizerRunner::run(Algorithm::Gea, &sphere, &config).unwrap();
/// assert_eq!(result.trace.len(), 5);
/// ```
pub struct OptimizerRunner;

impl OptimizerRunner {
    /// Runs `algorithm` on `benchmark`.
    pub fn run(
        algorithm: Algorithm,
        benchmark: &Benchmark,
        config: &RunConfig,
    ) -> Result<OptimizationResult> {
        Self::run_observed(algorithm, benchmark, config, |_, _, _| {})
    }

    /// Runs `algorithm` and calls `observer` after initialization
    /// (iteration 0) and after every iteration with the population and
    /// the best candidate.
    pub fn run_observed<F>(
        algorithm: Algorithm,
        benchmark: &Benchmark,
        config: &RunConfig,
        observer: F,
    ) -> Result<OptimizationResult>
    where
        F: FnMut(usize, &Population, &Candidate),
    {
        match algorithm {
            Algorithm::Ssa => Self::run_rule(SalpSwarm::new(), benchmark, config, observer),
            Algorithm::Mfo => Self::run_rule(MothFlame::new(), benchmark, config, observer),
            Algorithm::Gea => Self::run_rule(GoldenEagle, benchmark, config, observer),
        }
    }

    /// Runs an arbitrary movement rule through the shared loop.
    pub fn run_rule<M, F>(
        mut rule: M,
        benchmark: &Benchmark,
        config: &RunConfig,
        mut observer: F,
    ) -> Result<OptimizationResult>
    where
        M: MovementRule,
        F: FnMut(usize, &Population, &Candidate),
    {
        config.validate()?;
        let started = Instant::now();
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);
        let mut evaluator = Evaluator::new(benchmark);
        let bounds = &config.bounds;

        let _span = tracing::debug_span!(
            "optimize",
            algorithm = rule.name(),
            benchmark = benchmark.name(),
            seed
        )
        .entered();

        // Initialized
        let mut population = Population::initialize(bounds, config.population_size, &mut rng);
        population.evaluate(&mut evaluator)?;
        let best_index = population
            .best_index()
            .ok_or_else(|| Error::InvalidConfig("population is empty".into()))?;
        let mut best = population.get(best_index).clone();
        observer(0, &population, &best);

        let mut trace = vec![TRACE_SENTINEL; config.max_iteration];

        // Iterating
        for t in 1..config.max_iteration {
            let ctx = IterationContext {
                iteration: t,
                max_iteration: config.max_iteration,
                bounds,
                best: &best,
            };
            rule.begin_iteration(&ctx, &population, &mut rng);

            for i in 0..population.len() {
                let ctx = IterationContext {
                    iteration: t,
                    max_iteration: config.max_iteration,
                    bounds,
                    best: &best,
                };
                rule.move_candidate(i, &ctx, &mut population, &mut rng);

                let candidate = population.get_mut(i);
                bounds.clip(&mut candidate.position);
                candidate.fitness = evaluator.evaluate(&candidate.position)?;
                if candidate.fitness < best.fitness {
                    best = candidate.clone();
                }
            }

            trace[t] = best.fitness;
            observer(t, &population, &best);
            tracing::trace!(
                "{}: at iteration {}, the best fitness is {}",
                rule.name(),
                t,
                best.fitness
            );
        }

        // Terminated
        let elapsed = started.elapsed();
        tracing::debug!(
            best_fitness = best.fitness,
            evaluations = evaluator.evaluations(),
            elapsed_ms = elapsed.as_millis() as u64,
            "run finished"
        );

        Ok(OptimizationResult {
            best_fitness: best.fitness,
            best_candidate: best.position,
            trace,
            elapsed,
            evaluations: evaluator.evaluations(),
            seed,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::{BenchmarkProvider, StandardSuite};
    use crate::population::Bounds;
    use std::sync::{Arc, Mutex};

    fn small_config(seed: u64) -> RunConfig {
        RunConfig::new(Bounds::uniform(-10.0, 10.0, 2).unwrap())
            .with_population_size(4)
            .with_max_iteration(5)
            .with_seed(seed)
    }

    /// Sphere that records every value it returns.
    fn recording_sphere() -> (Benchmark, Arc<Mutex<Vec<f64>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let bench = Benchmark::from_fn("sphere", move |x: &[f64]| {
            let f: f64 = x.iter().map(|v| v * v).sum();
            sink.lock().unwrap().push(f);
            Ok(f)
        });
        (bench, log)
    }

    #[test]
    fn test_sphere_scenario() {
        for alg in Algorithm::ALL {
            let (bench, log) = recording_sphere();
            let config = small_config(42);
            let mut initial_min = f64::INFINITY;
            let result = OptimizerRunner::run_observed(alg, &bench, &config, |t, pop, _| {
                if t == 0 {
                    initial_min = pop
                        .candidates()
                        .iter()
                        .map(|c| c.fitness)
                        .fold(f64::INFINITY, f64::min);
                }
            })
            .unwrap();

            assert!(result.best_fitness <= initial_min, "{alg}: best above initial min");
            assert_eq!(result.trace.len(), 5);
            assert_eq!(result.trace[0], TRACE_SENTINEL);
            for t in 2..5 {
                assert!(
                    result.trace[t] <= result.trace[t - 1],
                    "{alg}: trace increased at {t}: {:?}",
                    result.trace
                );
            }
            assert_eq!(result.trace[4], result.best_fitness);

            // 4 initial + 4 per update step, 4 update steps
            assert_eq!(result.evaluations, 4 + 4 * 4);
            let evaluated = log.lock().unwrap();
            assert_eq!(evaluated.len() as u64, result.evaluations);
            assert!(evaluated.iter().all(|&f| result.best_fitness <= f));
        }
    }

    #[test]
    fn test_best_candidate_matches_fitness() {
        let sphere = StandardSuite.select(0).unwrap();
        for alg in Algorithm::ALL {
            let result = OptimizerRunner::run(alg, &sphere, &small_config(3)).unwrap();
            let recomputed: f64 = result.best_candidate.iter().map(|v| v * v).sum();
            assert_eq!(recomputed, result.best_fitness);
        }
    }

    #[test]
    fn test_boundaries_hold_every_iteration() {
        let bounds = Bounds::new(vec![-1.0, 2.0, -30.0], vec![1.0, 3.0, 5.0]).unwrap();
        let config = RunConfig::new(bounds.clone())
            .with_population_size(12)
            .with_max_iteration(40)
            .with_seed(17);
        let schwefel = StandardSuite.select(7).unwrap();
        for alg in Algorithm::ALL {
            let mut checked = 0;
            let result = OptimizerRunner::run_observed(alg, &schwefel, &config, |_, pop, best| {
                for c in pop.candidates() {
                    assert!(bounds.contains(&c.position), "{alg}: {:?}", c.position);
                }
                assert!(bounds.contains(&best.position));
                checked += 1;
            })
            .unwrap();
            assert_eq!(checked, 40);
            assert!(bounds.contains(&result.best_candidate));
        }
    }

    #[test]
    fn test_same_seed_reproducible() {
        let rastrigin = StandardSuite.select(5).unwrap();
        let config = RunConfig::new(Bounds::uniform(-5.12, 5.12, 5).unwrap())
            .with_population_size(10)
            .with_max_iteration(30)
            .with_seed(2024);
        for alg in Algorithm::ALL {
            let a = OptimizerRunner::run(alg, &rastrigin, &config).unwrap();
            let b = OptimizerRunner::run(alg, &rastrigin, &config).unwrap();
            assert_eq!(a.trace, b.trace);
            assert_eq!(a.best_candidate, b.best_candidate);
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let sphere = StandardSuite.select(0).unwrap();
        let base = RunConfig::new(Bounds::uniform(-100.0, 100.0, 10).unwrap())
            .with_population_size(10)
            .with_max_iteration(20);
        for alg in Algorithm::ALL {
            let a = OptimizerRunner::run(alg, &sphere, &base.clone().with_seed(1)).unwrap();
            let b = OptimizerRunner::run(alg, &sphere, &base.clone().with_seed(2)).unwrap();
            assert_ne!(a.trace, b.trace, "{alg}");
        }
    }

    #[test]
    fn test_makes_progress_on_sphere() {
        let sphere = StandardSuite.select(0).unwrap();
        let config = RunConfig::new(Bounds::uniform(-100.0, 100.0, 5).unwrap())
            .with_population_size(30)
            .with_max_iteration(200)
            .with_seed(7);
        // A random point in this box has expected fitness ~16_667. GEA only
        // interpolates between existing eagles and can stall early.
        for (alg, limit) in [
            (Algorithm::Ssa, 1e-3),
            (Algorithm::Mfo, 1e-3),
            (Algorithm::Gea, 2_000.0),
        ] {
            let result = OptimizerRunner::run(alg, &sphere, &config).unwrap();
            assert!(
                result.best_fitness < limit,
                "{alg} stalled at {}",
                result.best_fitness
            );
        }
    }

    #[test]
    fn test_single_iteration_budget() {
        let sphere = StandardSuite.select(0).unwrap();
        let config = small_config(1).with_max_iteration(1);
        let result = OptimizerRunner::run(Algorithm::Mfo, &sphere, &config).unwrap();
        assert_eq!(result.trace, vec![TRACE_SENTINEL]);
        assert_eq!(result.evaluations, 4);
    }

    #[test]
    fn test_single_candidate_population() {
        let sphere = StandardSuite.select(0).unwrap();
        let config = small_config(8).with_population_size(1).with_max_iteration(10);
        for alg in Algorithm::ALL {
            let result = OptimizerRunner::run(alg, &sphere, &config).unwrap();
            assert_eq!(result.trace.len(), 10);
        }
    }

    #[test]
    fn test_evaluation_error_propagates() {
        let calls = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&calls);
        let flaky = Benchmark::from_fn("flaky", move |_: &[f64]| {
            let mut n = counter.lock().unwrap();
            *n += 1;
            if *n > 6 {
                Err("domain violation".to_string())
            } else {
                Ok(1.0)
            }
        });
        let err = OptimizerRunner::run(Algorithm::Ssa, &flaky, &small_config(0)).unwrap_err();
        assert!(matches!(err, Error::ObjectiveEvaluation { .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let sphere = StandardSuite.select(0).unwrap();
        let config = small_config(0).with_population_size(0);
        assert!(matches!(
            OptimizerRunner::run(Algorithm::Gea, &sphere, &config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unseeded_run_reports_seed() {
        let sphere = StandardSuite.select(0).unwrap();
        let mut config = small_config(0);
        config.seed = None;
        let first = OptimizerRunner::run(Algorithm::Gea, &sphere, &config).unwrap();
        let replay = OptimizerRunner::run(Algorithm::Gea, &sphere, &config.with_seed(first.seed))
            .unwrap();
        assert_eq!(first.trace, replay.trace);
    }
}
