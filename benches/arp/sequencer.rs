//! Benchmarks for arpeggiator stepping over one block.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use chordsplit::{
    arp::{rate::ArpRate, sequencer::Arpeggiator},
    chord::note_set::NoteSet,
    io::{MidiBuffer, MirrorSink},
    relay::visual_channel,
};

use crate::BLOCK_SIZES;

pub fn bench_sequencer(c: &mut Criterion) {
    let mut group = c.benchmark_group("arp/sequencer");
    let pool: NoteSet = [48, 52, 55, 60, 64, 67, 72, 76, 79, 84].into_iter().collect();

    for &size in BLOCK_SIZES {
        let mut out = MidiBuffer::with_capacity(1024);
        let (mut tx, mut rx) = visual_channel(4096);

        // Typical rate: at most one step per block
        let mut arp = Arpeggiator::new(12345);
        let eighth = ArpRate::EIGHTH.samples_per_step(48_000.0, 120.0);
        group.bench_with_input(BenchmarkId::new("eighth", size), &size, |b, &size| {
            b.iter(|| {
                out.clear();
                let mut sink = MirrorSink::new(&mut out, &mut tx);
                arp.advance(0, size, black_box(pool), true, eighth, &mut sink);
                rx.drain().for_each(drop);
            })
        });

        // Worst case: a step every 16 samples
        let mut arp = Arpeggiator::new(12345);
        group.bench_with_input(BenchmarkId::new("dense", size), &size, |b, &size| {
            b.iter(|| {
                out.clear();
                let mut sink = MirrorSink::new(&mut out, &mut tx);
                arp.advance(0, size, black_box(pool), true, 16.0, &mut sink);
                rx.drain().for_each(drop);
            })
        });
    }

    group.finish();
}
