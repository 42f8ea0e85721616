//! Criterion benchmarks for lock-step Lorenz runs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use falc_bench::{reference_profile, stress_profile, wide_block_profile};
use falc_core::RelationSet;

/// Benchmark: build and seed the reference system.
fn bench_build(c: &mut Criterion) {
    let cfg = reference_profile(1.0);
    c.bench_function("lorenz_build_100k", |b| {
        b.iter(|| {
            let system = cfg.build_system::<f64>().unwrap();
            black_box(system.len());
        });
    });
}

/// Benchmark: one full run of the reference buffer.
fn bench_run_reference(c: &mut Criterion) {
    let mut system = reference_profile(1.0).build_system::<f64>().unwrap();
    c.bench_function("lorenz_run_100k", |b| {
        b.iter(|| {
            system.wrap().unwrap();
            system.run().unwrap();
            black_box(system.image_elem(0, 99_999).unwrap());
        });
    });
}

/// Benchmark: the same run stored in a single block.
fn bench_run_wide_block(c: &mut Criterion) {
    let mut system = wide_block_profile(1.0).build_system::<f64>().unwrap();
    c.bench_function("lorenz_run_100k_single_block", |b| {
        b.iter(|| {
            system.wrap().unwrap();
            system.run().unwrap();
            black_box(system.image_elem(0, 99_999).unwrap());
        });
    });
}

/// Benchmark: a 1M-sample run with the divergence check enabled.
fn bench_run_stress_checked(c: &mut Criterion) {
    let mut system = stress_profile(1.0)
        .build_system::<f32>()
        .unwrap()
        .with_divergence_check(true);
    let mut group = c.benchmark_group("stress");
    group.sample_size(10);
    group.bench_function("lorenz_run_1m_checked", |b| {
        b.iter(|| {
            system.wrap().unwrap();
            system.run().unwrap();
            black_box(system.image_elem(2, 999_999).unwrap());
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_run_reference,
    bench_run_wide_block,
    bench_run_stress_checked
);
criterion_main!(benches);
