//! Engine benchmarks over synthetic ledger data.
//!
//! Run with: `cargo bench --package tapline-bench`

use chrono::TimeDelta;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tapline_bench::{drink_timeline, history_catalog, origin, tapped_barrel};
use tapline_pace::{EventPaceAggregator, PaceCalculator};
use tapline_predict::{DepletionPredictor, resolve_historical_pace};
use tapline_types::{BarrelSize, PacePolicy};

fn pace_benchmark(c: &mut Criterion) {
    let calculator = PaceCalculator::new(PacePolicy::default()).unwrap();
    let mut group = c.benchmark_group("current_pace");

    for size in [100usize, 1_000, 10_000] {
        let timeline = drink_timeline(size);
        let as_of = *timeline.last().unwrap() + TimeDelta::minutes(5);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &timeline,
            |b, timeline| {
                b.iter(|| calculator.current_pace(black_box(timeline), origin(), as_of));
            },
        );
    }

    group.finish();
}

fn history_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_historical_pace");

    for size in [10usize, 100, 1_000] {
        let catalog = history_catalog(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter(|| resolve_historical_pace(black_box(7), BarrelSize::Liters30, catalog));
        });
    }

    group.finish();
}

fn predict_benchmark(c: &mut Criterion) {
    let predictor = DepletionPredictor::new(PacePolicy::default()).unwrap();
    let barrel = tapped_barrel();
    let timeline = drink_timeline(1_000);
    let catalog = history_catalog(50);
    let as_of = *timeline.last().unwrap() + TimeDelta::minutes(5);

    c.bench_function("predict", |b| {
        b.iter(|| {
            predictor.predict(
                black_box(Some(&barrel)),
                black_box(&timeline),
                black_box(&catalog),
                as_of,
            )
        });
    });
}

fn event_pace_benchmark(c: &mut Criterion) {
    let aggregator = EventPaceAggregator::new(PacePolicy::default()).unwrap();
    let mut group = c.benchmark_group("event_pace");

    for size in [100usize, 1_000, 10_000] {
        let timeline = drink_timeline(size);
        let as_of = *timeline.last().unwrap() + TimeDelta::minutes(5);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &timeline,
            |b, timeline| {
                b.iter(|| aggregator.event_pace(black_box(timeline), as_of));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    pace_benchmark,
    history_benchmark,
    predict_benchmark,
    event_pace_benchmark
);
criterion_main!(benches);
