//! Registry and runner benchmarks
//!
//! Measures the bookkeeping around a run rather than the test bodies:
//! - Registering suites and tests from scratch
//! - Name lookup in a populated registry
//! - Filter application
//! - Driving a run of no-op tests end to end

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use gauntlet_core::{Registry, Runner};

fn noop() {}

/// Registry with `suites` suites of `tests_per_suite` no-op tests each.
fn build_registry(suites: usize, tests_per_suite: usize) -> Registry {
    let mut registry = Registry::with_capacity(suites, tests_per_suite);
    for suite in 0..suites {
        let suite_name = format!("suite_{suite}");
        for test in 0..tests_per_suite {
            registry
                .add_test(&suite_name, &format!("test_{test}"), noop)
                .unwrap();
        }
    }
    registry
}

fn bench_registration(c: &mut Criterion) {
    c.bench_function("register_1000_tests", |b| {
        b.iter(|| build_registry(black_box(10), black_box(100)));
    });

    c.bench_function("register_into_single_suite", |b| {
        b.iter(|| build_registry(black_box(1), black_box(1000)));
    });
}

fn bench_lookup(c: &mut Criterion) {
    let registry = build_registry(10, 100);

    c.bench_function("find_test_last_of_1000", |b| {
        b.iter(|| registry.find_test(black_box("suite_9"), black_box("test_99")));
    });

    c.bench_function("find_test_missing", |b| {
        b.iter(|| registry.find_test(black_box("suite_9"), black_box("test_100")));
    });
}

fn bench_filtering(c: &mut Criterion) {
    c.bench_function("filter_one_suite_of_10", |b| {
        b.iter_batched(
            || build_registry(10, 100),
            |mut registry| registry.apply_filter(black_box("suite_5")),
            BatchSize::SmallInput,
        );
    });

    c.bench_function("filter_one_test_of_1000", |b| {
        b.iter_batched(
            || build_registry(10, 100),
            |mut registry| registry.apply_filter(black_box("suite_5.test_50")),
            BatchSize::SmallInput,
        );
    });
}

fn bench_run(c: &mut Criterion) {
    c.bench_function("run_1000_noop_tests", |b| {
        let mut registry = build_registry(10, 100);
        b.iter(|| {
            let mut runner = Runner::new();
            black_box(runner.run(&mut registry, &mut ()))
        });
    });
}

criterion_group!(
    benches,
    bench_registration,
    bench_lookup,
    bench_filtering,
    bench_run
);
criterion_main!(benches);
