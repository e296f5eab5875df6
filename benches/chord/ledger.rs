//! Benchmarks for trigger ownership bookkeeping.

use std::hint::black_box;

use criterion::Criterion;
use chordsplit::{
    chord::{
        ledger::{Ledger, RetriggerMode},
        modifier::Intervals,
        range::RangeBounds,
        voicing::ChordShape,
    },
    io::MidiBuffer,
};

pub fn bench_ledger(c: &mut Criterion) {
    let mut group = c.benchmark_group("chord/ledger");
    let major = ChordShape::new(Intervals::from_slice(&[4, 7]), RangeBounds::DEFAULT);
    let minor7 = ChordShape::new(Intervals::from_slice(&[3, 7, 10]), RangeBounds::DEFAULT);
    let mut out = MidiBuffer::with_capacity(1024);

    // Press and release one trigger
    let mut ledger = Ledger::new();
    group.bench_function("trigger_release", |b| {
        b.iter(|| {
            out.clear();
            ledger.note_on(black_box(72), 0, 100, 0, &major, false, &mut out);
            ledger.note_off(black_box(72), 32, &major, false, &mut out);
        })
    });

    // Two held keys, release the top: hand-off path
    let mut ledger = Ledger::new();
    group.bench_function("hand_off", |b| {
        b.iter(|| {
            out.clear();
            ledger.note_on(72, 0, 100, 0, &major, false, &mut out);
            ledger.note_on(76, 0, 100, 8, &major, false, &mut out);
            ledger.note_off(black_box(76), 16, &major, false, &mut out);
            ledger.note_off(black_box(72), 24, &major, false, &mut out);
        })
    });

    // Modifier flip on a held chord
    for mode in [RetriggerMode::Smart, RetriggerMode::Full] {
        let mut ledger = Ledger::new();
        ledger.note_on(72, 0, 100, 0, &major, false, &mut out);
        let mut flip = false;
        group.bench_function(format!("revoice_{}", mode.name().to_lowercase()), |b| {
            b.iter(|| {
                out.clear();
                flip = !flip;
                let shape = if flip { &minor7 } else { &major };
                ledger.revoice(0, black_box(shape), mode, false, &mut out);
            })
        });
    }

    group.finish();
}
