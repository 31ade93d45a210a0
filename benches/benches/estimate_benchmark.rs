//! Resource estimation benchmarks.
//!
//! Run with: `cargo bench --package footfall-bench --bench estimate_benchmark`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use footfall_bench::footfall_samples;
use footfall_estimate::ResourceEstimator;

fn estimate_benchmark(c: &mut Criterion) {
    let estimator = ResourceEstimator::global();
    let mut group = c.benchmark_group("estimate");

    for (name, footfall) in footfall_samples() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &footfall, |b, &footfall| {
            b.iter(|| estimator.estimate(black_box(footfall)));
        });
    }

    // A year of monthly predictions for a few dozen sites
    let batch: Vec<f64> = (0..480).map(|i| f64::from(i) * 1_337.5).collect();
    group.throughput(Throughput::Elements(batch.len() as u64));
    group.bench_function("batch_480", |b| {
        b.iter(|| {
            batch
                .iter()
                .filter_map(|&footfall| estimator.estimate(black_box(footfall)).ok())
                .map(|plan| plan.budget.total)
                .sum::<u64>()
        });
    });

    group.finish();
}

fn format_benchmark(c: &mut Criterion) {
    let plan = ResourceEstimator::global()
        .estimate(25_000.0)
        .expect("valid footfall");

    c.bench_function("format_plan", |b| {
        b.iter(|| ResourceEstimator::format_plan(black_box(&plan)));
    });
}

criterion_group!(benches, estimate_benchmark, format_benchmark);
criterion_main!(benches);
