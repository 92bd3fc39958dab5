//! Criterion benchmarks for strategy resolution.
//!
//! Run with: `cargo bench -p paramvec-runner`
//!
//! - Single-strategy resolution, including the factory call
//! - Parallel batch resolution across a growing registry

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use paramvec_core::{vector, ArgSpec, FloatGen, IntegerGen, ParamSet, SeededSource, VectorMode};
use paramvec_runner::{resolve, resolve_all, Invocation, StrategyRegistry};

fn registry(strategies: usize) -> StrategyRegistry {
    let mut registry = StrategyRegistry::new();
    for i in 0..strategies {
        registry.register_nullary(format!("strategy_{i:03}"), || {
            ParamSet::new(vec![
                ArgSpec::random("n", IntegerGen::new(0, 10_000)?),
                ArgSpec::random("ratio", FloatGen::new(0.0, 1.0)?),
            ])?
            .with_directed_vector("origin", vector![0, 0.0])
        });
    }
    registry
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let registry = registry(1);

    for n in [10usize, 100, 1000] {
        let inv = Invocation::new(n, VectorMode::All).with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &inv, |b, inv| {
            let mut src = SeededSource::new(0);
            b.iter(|| {
                let _ = resolve(&registry, black_box("strategy_000"), inv, &mut src);
            });
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_all");
    let inv = Invocation::new(100, VectorMode::All);

    for strategies in [4usize, 16, 64] {
        let registry = registry(strategies);
        group.bench_with_input(
            BenchmarkId::from_parameter(strategies),
            &registry,
            |b, registry| {
                b.iter(|| {
                    let _ = resolve_all(registry, &inv, black_box(7));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_batch);
criterion_main!(benches);
