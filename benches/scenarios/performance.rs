//! Benchmarks for complete engine blocks.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use chordsplit::{
    io::{MidiBuffer, TimedMidiEvent, Transport},
    ChordEngine, EngineConfig,
};

use crate::BLOCK_SIZES;

/// A busy block: modifier change, a new trigger, and a release.
fn busy_input(size: usize) -> Vec<TimedMidiEvent> {
    vec![
        TimedMidiEvent::note_on(0, 0, 63, 100),
        TimedMidiEvent::note_on(size / 4, 0, 74, 100),
        TimedMidiEvent::note_on(size / 2, 0, 70, 100),
        TimedMidiEvent::note_off(size / 2, 0, 63),
        TimedMidiEvent::note_off(3 * size / 4, 0, 74),
    ]
}

pub fn bench_performance(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/performance");
    let transport = Transport::new(48_000.0).with_bpm(128.0);

    for &size in BLOCK_SIZES {
        let input = busy_input(size);
        let silence: &[TimedMidiEvent] = &[];
        let mut out = MidiBuffer::with_capacity(1024);

        // === IDLE ===
        // No input, nothing held: the per-block floor
        let (mut engine, mut rx) = ChordEngine::from_config(&EngineConfig::default());
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, &size| {
            b.iter(|| {
                out.clear();
                engine.process_block(black_box(silence), size, &transport, &mut out);
                rx.drain().for_each(drop);
            })
        });

        // === CHORDS ===
        let (mut engine, mut rx) = ChordEngine::from_config(&EngineConfig::default());
        group.bench_with_input(BenchmarkId::new("chords", size), &size, |b, &size| {
            b.iter(|| {
                out.clear();
                engine.process_block(black_box(&input), size, &transport, &mut out);
                rx.drain().for_each(drop);
            })
        });

        // === ARPEGGIO ===
        // Fast arp over a held chord plus the same busy input
        let config = EngineConfig {
            arp_enabled: true,
            arp_rate: 5,
            ..EngineConfig::default()
        };
        let (mut engine, mut rx) = ChordEngine::from_config(&config);
        let mut hold = MidiBuffer::with_capacity(64);
        engine.process_block(&[TimedMidiEvent::note_on(0, 0, 72, 100)], size, &transport, &mut hold);
        group.bench_with_input(BenchmarkId::new("arpeggio", size), &size, |b, &size| {
            b.iter(|| {
                out.clear();
                engine.process_block(black_box(&input), size, &transport, &mut out);
                rx.drain().for_each(drop);
            })
        });
    }

    group.finish();
}
