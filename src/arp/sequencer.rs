//! Arpeggiator - sample-accurate, seeded single-note stream over the chord pool
//!
//! The engine calls `advance` for each stretch of the block between MIDI
//! events, so pool changes take effect at the exact sample they happen.

use crate::{
    arp::pattern::{ArpPattern, PATTERN_LEN},
    chord::note_set::NoteSet,
    io::{
        midi::FULL_VELOCITY,
        sink::{MirrorSink, NoteSink},
    },
    relay::{VisualEvent, BAND_COUNT},
};

/// Arp notes go out on MIDI channel 1.
pub const ARP_CHANNEL: u8 = 0;

#[derive(Debug, Clone)]
pub struct Arpeggiator {
    pattern: ArpPattern,
    /// Position in the pattern
    step: usize,
    /// Samples elapsed since the last step
    phase: f64,
    /// Note currently sounding, if any
    current: Option<u8>,
    running: bool,
}

impl Arpeggiator {
    pub fn new(seed: u64) -> Self {
        Self {
            pattern: ArpPattern::generate(seed),
            step: 0,
            phase: 0.0,
            current: None,
            running: false,
        }
    }

    /// Swap the pattern if the seed changed.
    pub fn reseed(&mut self, seed: u64) -> bool {
        self.pattern.reseed(seed)
    }

    /// Process samples `[from, to)` of the current block.
    ///
    /// Disabled or with an empty pool the arpeggiator idles, releasing its
    /// last note at `from`. When it (re)starts the pattern rewinds and the
    /// first step fires immediately.
    pub fn advance<S: NoteSink>(
        &mut self,
        from: usize,
        to: usize,
        pool: NoteSet,
        enabled: bool,
        samples_per_step: f64,
        out: &mut MirrorSink<'_, S>,
    ) {
        if !enabled || pool.is_empty() {
            self.stop(from, out);
            return;
        }

        let samples_per_step = samples_per_step.max(1.0);
        if !self.running {
            self.running = true;
            self.step = 0;
            self.phase = samples_per_step;
        }

        let end = to as f64;
        let mut cursor = from as f64;
        loop {
            let until_step = (samples_per_step - self.phase).max(0.0);
            if cursor + until_step < end {
                cursor += until_step;
                self.phase = 0.0;
                self.fire(cursor as usize, pool, out);
            } else {
                self.phase += end - cursor;
                break;
            }
        }
    }

    /// Release the sounding note and go idle.
    pub fn stop<S: NoteSink>(&mut self, offset: usize, out: &mut S) {
        if let Some(note) = self.current.take() {
            out.note_off(offset, ARP_CHANNEL, note, 0);
        }
        self.running = false;
    }

    /// Forget all playback state without emitting.
    pub fn reset(&mut self) {
        self.current = None;
        self.running = false;
        self.step = 0;
        self.phase = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_note(&self) -> Option<u8> {
        self.current
    }

    pub fn step(&self) -> usize {
        self.step
    }

    fn fire<S: NoteSink>(&mut self, offset: usize, pool: NoteSet, out: &mut MirrorSink<'_, S>) {
        if let Some(prev) = self.current.take() {
            out.note_off(offset, ARP_CHANNEL, prev, 0);
        }

        let index = self.pattern.index(self.step, pool.len());
        if let Some(note) = pool.nth(index) {
            out.note_on(offset, ARP_CHANNEL, note, FULL_VELOCITY);
            self.current = Some(note);
            out.visual(VisualEvent::Band((index % BAND_COUNT as usize) as u8));
        }

        self.step = (self.step + 1) % PATTERN_LEN;
    }
}
