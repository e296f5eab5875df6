//! Benchmarks for the arpeggiator.

mod sequencer;

pub use sequencer::bench_sequencer;
