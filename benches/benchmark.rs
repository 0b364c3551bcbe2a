//! Resampling benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Scalability in time columns and in features
//! - Bandwidth rank K
//! - Grid density (step)
//! - Weight functions
//! - Serial against parallel grid evaluation
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::prelude::*;
use rand_distr::{Normal, Uniform};
use resample_rs::prelude::*;
use std::hint::black_box;

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Irregularly sampled table: `n_times` columns with exponential-ish gaps,
/// `n_features` noisy sinusoids.
fn generate_irregular_table(n_times: usize, n_features: usize, seed: u64) -> ObservationTable<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let gap_dist = Uniform::new(0.5, 12.0).unwrap();
    let noise_dist = Normal::new(0.0, 0.2).unwrap();

    let mut times = Vec::with_capacity(n_times);
    let mut t = 0.0;
    for _ in 0..n_times {
        times.push(t);
        t += gap_dist.sample(&mut rng);
    }

    let rows = (0..n_features)
        .map(|f| {
            let phase = rng.random_range(0.0..std::f64::consts::TAU);
            times
                .iter()
                .map(|&ti| (ti * 0.05 + phase).sin() * (f % 7 + 1) as f64 + noise_dist.sample(&mut rng))
                .collect()
        })
        .collect();
    let features = (0..n_features).map(|f| format!("feature_{}", f)).collect();

    ObservationTable::from_rows(features, times, rows).unwrap()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalability");
    group.sample_size(20);

    for n_times in [50, 200, 1000, 5000] {
        let table = generate_irregular_table(n_times, 100, 42);
        group.throughput(Throughput::Elements(n_times as u64));
        group.bench_with_input(BenchmarkId::new("columns", n_times), &table, |b, table| {
            b.iter(|| {
                Resampler::new()
                    .step(7.0)
                    .neighbors(5)
                    .adapter(Batch)
                    .build()
                    .unwrap()
                    .regularize(black_box(table))
                    .unwrap()
            })
        });
    }

    for n_features in [10, 1000, 10000] {
        let table = generate_irregular_table(200, n_features, 42);
        group.throughput(Throughput::Elements(n_features as u64));
        group.bench_with_input(BenchmarkId::new("features", n_features), &table, |b, table| {
            b.iter(|| {
                Resampler::new()
                    .step(7.0)
                    .neighbors(5)
                    .adapter(Batch)
                    .build()
                    .unwrap()
                    .regularize(black_box(table))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbors");
    let table = generate_irregular_table(1000, 50, 42);

    for k in [1, 5, 20, 100] {
        group.bench_with_input(BenchmarkId::new("batch", k), &k, |b, &k| {
            b.iter(|| {
                Resampler::new()
                    .neighbors(k)
                    .adapter(Batch)
                    .build()
                    .unwrap()
                    .regularize(black_box(&table))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    let table = generate_irregular_table(500, 50, 42);

    for step in [1.0, 7.0, 30.0] {
        group.bench_with_input(BenchmarkId::new("batch", step), &step, |b, &step| {
            b.iter(|| {
                Resampler::new()
                    .step(step)
                    .adapter(Batch)
                    .build()
                    .unwrap()
                    .regularize(black_box(&table))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_weight_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("weight_function");
    let table = generate_irregular_table(500, 50, 42);

    let kernels = [
        ("epanechnikov", Epanechnikov),
        ("tricube", Tricube),
        ("gaussian", Gaussian),
        ("cosine", Cosine),
    ];

    for (name, wf) in kernels {
        group.bench_with_input(BenchmarkId::new("batch", name), &wf, |b, &wf| {
            b.iter(|| {
                Resampler::new()
                    .weight_function(wf)
                    .adapter(Batch)
                    .build()
                    .unwrap()
                    .regularize(black_box(&table))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_single_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate");
    let table = generate_irregular_table(2000, 500, 42);
    let model = Resampler::new().adapter(Batch).build().unwrap();
    let (start, end) = table.time_range().unwrap();
    let query = (start + end) / 2.0 + 0.123;

    group.bench_function("midpoint", |b| {
        b.iter(|| model.estimate(black_box(&table), black_box(query)).unwrap())
    });
    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel");
    group.sample_size(20);
    let table = generate_irregular_table(2000, 500, 42);

    for parallel in [false, true] {
        let name = if parallel { "parallel" } else { "serial" };
        group.bench_with_input(BenchmarkId::new("batch", name), &parallel, |b, &parallel| {
            b.iter(|| {
                Resampler::new()
                    .parallel(parallel)
                    .adapter(Batch)
                    .build()
                    .unwrap()
                    .regularize(black_box(&table))
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_scalability,
    bench_neighbors,
    bench_step,
    bench_weight_functions,
    bench_single_estimate,
    bench_parallel,
);
criterion_main!(benches);
