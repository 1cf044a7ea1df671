use std::sync::Arc;

use chrono::{TimeZone, Utc};
use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use payrelay::prelude::*;
use tokio::runtime::Runtime;

fn entry(i: i64) -> OutcomeEntry {
    let processor = if i % 3 == 0 {
        Processor::Fallback
    } else {
        Processor::Default
    };
    OutcomeEntry::new(
        format!("p{i}"),
        Amount::from_raw(10_000 + i),
        processor,
        Utc.timestamp_opt(1_700_000_000 + i, 0).unwrap(),
    )
}

fn seeded(runtime: &Runtime, size: i64) -> Arc<ConcurrentOutcomeStore> {
    let store = Arc::new(ConcurrentOutcomeStore::new());
    runtime.block_on(async {
        for i in 0..size {
            store.insert(entry(i)).await.unwrap();
        }
    });
    store
}

/// Benchmark sequential inserts into an empty store
fn bench_insert(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let mut group = c.benchmark_group("outcome_insert");

    for size in [1_000i64, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.to_async(&runtime).iter_batched(
                ConcurrentOutcomeStore::new,
                |store| async move {
                    for i in 0..size {
                        black_box(store.insert(entry(i)).await.unwrap());
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark inserts from several workers at once
fn bench_concurrent_insert(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let mut group = c.benchmark_group("outcome_insert_concurrent");

    for workers in [2i64, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            b.to_async(&runtime).iter_batched(
                || Arc::new(ConcurrentOutcomeStore::new()),
                |store| async move {
                    let handles: Vec<_> = (0..workers)
                        .map(|w| {
                            let store = Arc::clone(&store);
                            tokio::spawn(async move {
                                for i in 0..1_000 {
                                    store.insert(entry(w * 1_000 + i)).await.unwrap();
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.await.unwrap();
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark summarizing a populated store over half its time range
fn bench_summarize(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let mut group = c.benchmark_group("summarize");

    for size in [1_000i64, 10_000, 100_000] {
        let aggregator = SummaryAggregator::new(seeded(&runtime, size));
        let window = TimeWindow::new(
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            Utc.timestamp_opt(1_700_000_000 + size / 2, 0).unwrap(),
        );

        group.bench_with_input(BenchmarkId::from_parameter(size), &window, |b, &window| {
            b.to_async(&runtime)
                .iter(|| async { black_box(aggregator.summarize(window).await.unwrap()) });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_concurrent_insert, bench_summarize);
criterion_main!(benches);
