//! Prediction log benchmarks.
//!
//! Run with: `cargo bench --package footfall-bench --bench store_benchmark`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use footfall_bench::seed_store;
use footfall_store::{PredictionFilter, PredictionStore};
use tempfile::TempDir;

fn list_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_list");
    group.sample_size(20);

    for count in [100, 1_000] {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = PredictionStore::new(dir.path().to_path_buf()).expect("failed to open store");
        seed_store(&store, count).expect("failed to seed store");

        group.bench_with_input(BenchmarkId::new("all", count), &store, |b, store| {
            b.iter(|| store.list(&PredictionFilter::new()));
        });

        let filter = PredictionFilter::new().location("Gulmarg").month(12);
        group.bench_with_input(BenchmarkId::new("filtered", count), &store, |b, store| {
            b.iter(|| store.list(&filter));
        });
    }

    group.finish();
}

criterion_group!(benches, list_benchmark);
criterion_main!(benches);
