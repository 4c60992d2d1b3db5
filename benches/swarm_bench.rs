//! Criterion benchmarks for the swarm optimizers and the batch harness.
//!
//! Uses the standard suite to measure per-run cost of each variant and the
//! speedup of the worker pool over sequential dispatch.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_swarmbench::benchmark::{BenchmarkProvider, StandardSuite};
use u_swarmbench::harness::{hardware_parallelism, BatchConfig, ExecutionPolicy, Harness};
use u_swarmbench::optimizer::{Algorithm, OptimizerRunner, RunConfig};
use u_swarmbench::population::Bounds;

// ===========================================================================
// Single runs
// ===========================================================================

fn bench_variants_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("variants_sphere");
    group.sample_size(10);

    let sphere = StandardSuite.select(0).expect("sphere is index 0");
    for &dim in &[10, 30] {
        let config = RunConfig::new(Bounds::uniform(-100.0, 100.0, dim).expect("valid bounds"))
            .with_population_size(50)
            .with_max_iteration(200)
            .with_seed(42);
        for algorithm in Algorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), dim),
                &config,
                |b, cfg| {
                    b.iter(|| {
                        let result = OptimizerRunner::run(algorithm, black_box(&sphere), black_box(cfg));
                        black_box(result)
                    })
                },
            );
        }
    }
    group.finish();
}

// ===========================================================================
// Batch dispatch
// ===========================================================================

fn bench_batch_pool_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_pool_width");
    group.sample_size(10);

    let base = BatchConfig::default()
        .with_run(
            RunConfig::new(Bounds::uniform(-100.0, 100.0, 10).expect("valid bounds"))
                .with_population_size(20)
                .with_max_iteration(100),
        )
        .with_root_seed(42);

    let mut widths = vec![1, 2, 4, hardware_parallelism()];
    widths.retain(|&w| w <= hardware_parallelism());
    widths.dedup();

    group.bench_function("sequential", |b| {
        let config = base.clone().with_policy(ExecutionPolicy::sequential());
        b.iter(|| black_box(Harness::run(&StandardSuite, black_box(&config))))
    });
    for width in widths {
        let config = base.clone().with_policy(ExecutionPolicy::parallel(width));
        group.bench_with_input(BenchmarkId::from_parameter(width), &config, |b, cfg| {
            b.iter(|| black_box(Harness::run(&StandardSuite, black_box(cfg))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_variants_sphere, bench_batch_pool_width);
criterion_main!(benches);
