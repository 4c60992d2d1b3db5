//! Run-level invariants checked over random seeds, variants and benchmarks.

use proptest::prelude::*;
use u_swarmbench::benchmark::{BenchmarkProvider, StandardSuite};
use u_swarmbench::optimizer::{Algorithm, OptimizerRunner, RunConfig, TRACE_SENTINEL};
use u_swarmbench::population::Bounds;

fn config(dim: usize, population: usize, max_iteration: usize, seed: u64) -> RunConfig {
    RunConfig::new(Bounds::uniform(-10.0, 10.0, dim).unwrap())
        .with_population_size(population)
        .with_max_iteration(max_iteration)
        .with_seed(seed)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn best_never_worse_than_any_evaluation(
        algorithm in 0..3usize,
        benchmark in 0..StandardSuite::LEN,
        dim in 2..=4usize,
        population in 1..=8usize,
        seed in any::<u64>(),
    ) {
        let algorithm = Algorithm::ALL[algorithm];
        let bench = StandardSuite.select(benchmark).unwrap();
        let mut seen = Vec::new();
        let result = OptimizerRunner::run_observed(
            algorithm,
            &bench,
            &config(dim, population, 12, seed),
            |_, pop, _| seen.extend(pop.candidates().iter().map(|c| c.fitness)),
        )
        .unwrap();

        for f in seen {
            prop_assert!(result.best_fitness <= f, "{} > {}", result.best_fitness, f);
        }
        prop_assert_eq!(result.evaluations, (population * 12) as u64);
    }

    #[test]
    fn trace_has_budget_length_and_never_increases(
        algorithm in 0..3usize,
        benchmark in 0..StandardSuite::LEN,
        max_iteration in 1..=20usize,
        seed in any::<u64>(),
    ) {
        let bench = StandardSuite.select(benchmark).unwrap();
        let result = OptimizerRunner::run(
            Algorithm::ALL[algorithm],
            &bench,
            &config(3, 5, max_iteration, seed),
        )
        .unwrap();

        prop_assert_eq!(result.trace.len(), max_iteration);
        prop_assert_eq!(result.trace[0], TRACE_SENTINEL);
        for w in result.trace[1..].windows(2) {
            prop_assert!(w[1] <= w[0], "trace increased: {} -> {}", w[0], w[1]);
        }
        if max_iteration > 1 {
            prop_assert_eq!(result.trace[max_iteration - 1], result.best_fitness);
        }
    }

    #[test]
    fn candidates_stay_inside_bounds(
        algorithm in 0..3usize,
        lower in -50.0..0.0f64,
        width in 0.5..50.0f64,
        seed in any::<u64>(),
    ) {
        let bounds = Bounds::uniform(lower, lower + width, 3).unwrap();
        let run = RunConfig::new(bounds.clone())
            .with_population_size(6)
            .with_max_iteration(10)
            .with_seed(seed);
        let bench = StandardSuite.select(5).unwrap();
        let mut violations = 0usize;
        let result = OptimizerRunner::run_observed(
            Algorithm::ALL[algorithm],
            &bench,
            &run,
            |_, pop, best| {
                violations += pop
                    .candidates()
                    .iter()
                    .filter(|c| !bounds.contains(&c.position))
                    .count();
                if !bounds.contains(&best.position) {
                    violations += 1;
                }
            },
        )
        .unwrap();

        prop_assert_eq!(violations, 0);
        prop_assert!(bounds.contains(&result.best_candidate));
    }
}
