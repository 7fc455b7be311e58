//! Benchmarks for the Standard Library's [`BTreeSet`].

use std::collections::BTreeSet;

use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration, black_box};
use rand::prelude::*;

/// Benchmarking sizes
const SIZES: [usize; 6] = [1, 10, 100, 1000, 10_000, 100_000];

/// Build a set of `size` random elements, returning the elements as well.
fn filled(rng: &mut StdRng, size: usize) -> (BTreeSet<u64>, Vec<u64>) {
    let values: Vec<u64> = std::iter::repeat_with(|| rng.random()).take(size).collect();
    (values.iter().copied().collect(), values)
}

/// Benchmarking insertion
pub fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeSet Insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let (mut sl, _) = filled(&mut rng, size);

            b.iter(|| {
                sl.insert(rng.random::<u64>());
            });
        });
    }
}

/// Benchmarking membership tests
pub fn contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeSet Contains");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let (sl, values) = filled(&mut rng, size);
            let probes: Vec<u64> = values.choose_multiple(&mut rng, 10).copied().collect();

            b.iter(|| {
                for probe in &probes {
                    black_box(sl.contains(probe));
                }
            });
        });
    }
}

/// Benchmarking removal, reinserting each removed element so the size stays
/// constant.
pub fn remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeSet Remove");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let (mut sl, values) = filled(&mut rng, size);

            b.iter(|| {
                if let Some(&value) = values.choose(&mut rng) {
                    black_box(sl.remove(&value));
                    sl.insert(value);
                }
            });
        });
    }
}

/// Benchmarking iteration
pub fn iter(c: &mut Criterion) {
    c.bench_function("BTreeSet Iter", |b| {
        let mut rng = StdRng::seed_from_u64(0x1234_abcd);
        let (sl, _) = filled(&mut rng, 100_000);

        b.iter(|| {
            for el in &sl {
                black_box(el);
            }
        });
    });
}
