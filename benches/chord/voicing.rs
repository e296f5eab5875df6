//! Benchmarks for range-constrained voicing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use chordsplit::chord::{
    modifier::{Extension, ModifierState, Triad},
    range::RangeBounds,
    voicing::voice,
};

pub fn bench_voicing(c: &mut Criterion) {
    let mut group = c.benchmark_group("chord/voicing");

    let mut min9 = ModifierState::default();
    min9.set_triad(Triad::Minor, true);
    min9.set_extension(Extension::Ninth, true);
    let intervals = min9.intervals();
    let root_only: &[u8] = &[];

    // Narrow, default and full-keyboard ranges
    for (name, range) in [
        ("octave", RangeBounds::new(60, 72)),
        ("default", RangeBounds::DEFAULT),
        ("full", RangeBounds::new(0, 127)),
    ] {
        group.bench_with_input(BenchmarkId::new("min9", name), &range, |b, range| {
            b.iter(|| voice(black_box(74), black_box(&intervals), *range))
        });

        group.bench_with_input(BenchmarkId::new("root_only", name), &range, |b, range| {
            b.iter(|| voice(black_box(74), black_box(root_only), *range))
        });
    }

    group.finish();
}
