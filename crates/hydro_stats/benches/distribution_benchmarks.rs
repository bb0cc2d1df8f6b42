//! Benchmarks for hydro_stats.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hydro_core::types::Tail;
use hydro_stats::distributions::{ContinuousDistribution, Gamma, Pearson3};
use hydro_stats::rng::HydroRng;
use hydro_stats::{ppearson3, qpearson3, rpearson3};

fn benchmark_gamma_quantile(c: &mut Criterion) {
    let mut group = c.benchmark_group("gamma_quantile");

    for shape in [0.25, 1.78, 44.0, 4000.0] {
        let gamma = Gamma::new(shape, 1.0).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(shape), &gamma, |b, g| {
            b.iter(|| g.quantile(black_box(0.01), Tail::Upper))
        });
    }

    group.finish();
}

fn benchmark_pearson3_cdf(c: &mut Criterion) {
    let x: Vec<f64> = (0..1000).map(|i| 5.0 + i as f64 * 0.02).collect();

    c.bench_function("ppearson3_1000", |b| {
        b.iter(|| ppearson3(black_box(&x), 10.0, 0.3, 1.5, Tail::Lower))
    });
}

fn benchmark_pearson3_quantile(c: &mut Criterion) {
    let p: Vec<f64> = (1..100).map(|i| i as f64 / 100.0).collect();

    c.bench_function("qpearson3_99", |b| {
        b.iter(|| qpearson3(black_box(&p), 10.0, 0.3, 1.5, Tail::Lower))
    });
}

fn benchmark_return_levels(c: &mut Criterion) {
    let dist = Pearson3::new(120.0, 0.35, -0.6).unwrap();

    c.bench_function("return_levels", |b| {
        b.iter(|| {
            [2.0, 10.0, 100.0, 1000.0]
                .iter()
                .map(|&t| dist.return_level(black_box(t)))
                .collect::<Vec<_>>()
        })
    });
}

fn benchmark_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("rpearson3");

    for n in [1_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = HydroRng::from_seed(42);
            b.iter(|| rpearson3(n, 10.0, 0.3, 1.5, &mut rng))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_gamma_quantile,
    benchmark_pearson3_cdf,
    benchmark_pearson3_quantile,
    benchmark_return_levels,
    benchmark_sampling
);
criterion_main!(benches);
