//! Criterion benchmarks for generation hot paths.
//!
//! Benchmarks:
//! 1. Primitive draws (integer, float, weighted integer, string)
//! 2. Rejection sampling with a selective predicate
//! 3. Constrained tuple generation
//! 4. Exhaustive product enumeration

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use paramvec_core::{
    ArgSpec, FloatGen, IntegerGen, ParamSet, SeededSource, SequenceGen, StringGen, ValueGenerator,
    WeightedIntegerGen,
};

// ── 1. Primitive Draws ───────────────────────────────────────────────

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitive_draws");
    let mut src = SeededSource::new(42);

    let int_gen = IntegerGen::new(-1000, 1000).unwrap();
    group.bench_function("integer_1000", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                black_box(int_gen.generate(&mut src).unwrap());
            }
        });
    });

    let float_gen = FloatGen::new(0.0, 1.0).unwrap();
    group.bench_function("float_1000", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                black_box(float_gen.generate(&mut src).unwrap());
            }
        });
    });

    let ports = WeightedIntegerGen::new([(1, 1023, 0.2), (1024, 49151, 0.7), (49152, 65535, 0.1)]).unwrap();
    group.bench_function("weighted_integer_1000", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                black_box(ports.generate(&mut src).unwrap());
            }
        });
    });

    let strings = StringGen::default();
    group.bench_function("string_default_1000", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                black_box(strings.generate(&mut src).unwrap());
            }
        });
    });

    group.finish();
}

// ── 2. Rejection Sampling ────────────────────────────────────────────

fn bench_rejection(c: &mut Criterion) {
    let mut group = c.benchmark_group("rejection_sampling");

    for modulus in [2i64, 10, 50] {
        let gen = IntegerGen::new(0, 10_000)
            .unwrap()
            .with_predicate(move |x| x % modulus == 0);
        group.bench_with_input(BenchmarkId::new("multiple_of", modulus), &modulus, |b, _| {
            let mut src = SeededSource::new(7);
            src.set_max_retries(10_000);
            b.iter(|| black_box(gen.generate(&mut src).unwrap()));
        });
    }

    group.finish();
}

// ── 3. Constrained Tuples ────────────────────────────────────────────

fn bench_constrained_vectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("constrained_vectors");

    let set = ParamSet::new(vec![
        ArgSpec::random("low", IntegerGen::new(0, 100).unwrap()),
        ArgSpec::random("high", IntegerGen::new(0, 100).unwrap()),
        ArgSpec::random("label", StringGen::with_length(8).unwrap()),
    ])
    .unwrap()
    .with_constraint(|v| v[0] < v[1]);

    group.bench_function("ordered_pair_100", |b| {
        let mut src = SeededSource::new(11);
        b.iter(|| {
            for _ in 0..100 {
                black_box(set.generate_vector(&mut src).unwrap());
            }
        });
    });

    group.finish();
}

// ── 4. Exhaustive Product ────────────────────────────────────────────

fn bench_exhaustive(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhaustive_product");

    for side in [4i64, 16, 64] {
        let set = ParamSet::new(vec![
            ArgSpec::random("x", SequenceGen::new(0..side).unwrap()),
            ArgSpec::random("y", SequenceGen::new(0..side).unwrap()),
        ])
        .unwrap()
        .with_constraint(|v| v[0] <= v[1]);

        group.bench_with_input(BenchmarkId::new("square", side), &side, |b, _| {
            let mut src = SeededSource::new(3);
            b.iter(|| black_box(set.generate_exhaustive(&mut src).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_primitives,
    bench_rejection,
    bench_constrained_vectors,
    bench_exhaustive
);
criterion_main!(benches);
