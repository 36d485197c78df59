//! Benchmarks for the per-frame geometry path.
//!
//! Measures:
//! - Full rebuild after a single append, across capacities
//! - The clean (no append) path, which should be a flag check
//! - Append throughput with an auto-following view attached

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use livegraph::{Series, ViewController, follow};

fn filled_series(capacity: usize) -> Series {
    let mut series = Series::new("bench", capacity);
    for i in 0..capacity {
        let t = i as f64 * 0.01;
        series.add_data(t, t.sin());
    }
    series
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry/rebuild");

    for capacity in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(capacity as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                let mut series = filled_series(capacity);
                let mut t = capacity as f64 * 0.01;
                b.iter(|| {
                    t += 0.01;
                    series.add_data(t, t.sin());
                    black_box(series.prepare_geometry().live_count())
                });
            },
        );
    }

    group.finish();
}

fn bench_clean_prepare(c: &mut Criterion) {
    let mut series = filled_series(10_000);
    series.prepare_geometry();

    c.bench_function("geometry/clean_prepare", |b| {
        b.iter(|| black_box(series.prepare_geometry().rebuild_count()));
    });
}

fn bench_append_following(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry/append");
    group.throughput(Throughput::Elements(1));

    group.bench_function("plain", |b| {
        let mut series = Series::new("bench", 1_000);
        let mut t = 0.0;
        b.iter(|| {
            t += 0.01;
            series.add_data(black_box(t), 1.0);
        });
    });

    group.bench_function("following", |b| {
        let view = ViewController::new().shared();
        view.borrow_mut().set_auto_follow(true, true);
        let mut series = Series::new("bench", 1_000);
        follow(&view, &mut series);

        let mut t = 0.0;
        b.iter(|| {
            t += 0.01;
            series.add_data(black_box(t), 1.0);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_rebuild,
    bench_clean_prepare,
    bench_append_following
);
criterion_main!(benches);
