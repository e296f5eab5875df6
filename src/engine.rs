//! Block processor - glues modifier tracking, voicing, the ownership ledger
//! and the arpeggiator into one allocation-free per-block pass.

use std::sync::Arc;

use crate::{
    arp::{rate::DEFAULT_BPM, sequencer::Arpeggiator},
    chord::{
        ledger::{is_trigger_note, Ledger},
        modifier::{is_modifier_note, ModifierState},
        range::RangeBounds,
        voicing::ChordShape,
    },
    config::EngineConfig,
    io::{
        midi::{MidiEvent, TimedMidiEvent, Transport, MAX_NOTE, NUM_CHANNELS},
        sink::{MirrorSink, NoteSink},
    },
    params::{EngineParams, EngineStatus, ParamSnapshot},
    relay::{visual_channel, RelayReceiver, RelaySender, VisualEvent},
};

/// Most MIDI events one block can emit for `input_events` input events over
/// `num_samples` samples.
///
/// The block start may broadcast all-notes-off, hand a full-range chord to
/// or from the arpeggiator and fully revoice it. Each input event can swap
/// one full-range chord for another. Arpeggiator steps fire at most once per
/// sample. An output buffer reserved to this size never grows.
pub const fn max_output_events(input_events: usize, num_samples: usize) -> usize {
    const NOTES: usize = MAX_NOTE as usize + 1;
    let block_start = NUM_CHANNELS as usize + 4 * NOTES + 1;
    let per_event = 2 * NOTES + 1;
    block_start + input_events * per_event + 2 * num_samples
}

/// Chord-split engine. Owned by the block thread.
pub struct ChordEngine {
    params: Arc<EngineParams>,
    status: Arc<EngineStatus>,
    relay: RelaySender<VisualEvent>,
    core: EngineCore,
}

/// Per-block state, kept apart from the relay so both can be borrowed at once.
struct EngineCore {
    ledger: Ledger,
    modifiers: ModifierState,
    arp: Arpeggiator,
    /// Parameter values applied at the end of the previous block
    chord_mode: bool,
    arpeggiating: bool,
    range: RangeBounds,
}

impl ChordEngine {
    pub fn new(params: Arc<EngineParams>, relay: RelaySender<VisualEvent>) -> Self {
        let snap = params.snapshot();
        log::info!(
            "chord engine ready: chord mode {}, range {}..{}, arp {} at {} (seed {})",
            if snap.chord_mode { "on" } else { "off" },
            snap.range.low(),
            snap.range.high(),
            if snap.arp_enabled { "on" } else { "off" },
            snap.arp_rate.name(),
            snap.arp_seed
        );

        Self {
            params,
            status: Arc::new(EngineStatus::new()),
            relay,
            core: EngineCore {
                ledger: Ledger::new(),
                modifiers: ModifierState::default(),
                arp: Arpeggiator::new(snap.arp_seed),
                chord_mode: snap.chord_mode,
                arpeggiating: snap.arp_enabled,
                range: snap.range,
            },
        }
    }

    /// Build an engine with its own parameters and visualization relay.
    pub fn from_config(config: &EngineConfig) -> (Self, RelayReceiver<VisualEvent>) {
        let params = Arc::new(EngineParams::from_config(config));
        let (tx, rx) = visual_channel(config.relay_capacity.max(1));
        (Self::new(params, tx), rx)
    }

    /// Shared handle for the control thread.
    pub fn params(&self) -> &Arc<EngineParams> {
        &self.params
    }

    /// Shared handle for displays.
    pub fn status(&self) -> &Arc<EngineStatus> {
        &self.status
    }

    pub fn modifiers(&self) -> ModifierState {
        self.core.modifiers
    }

    pub fn ledger(&self) -> &Ledger {
        &self.core.ledger
    }

    pub fn arpeggiator(&self) -> &Arpeggiator {
        &self.core.arp
    }

    /// Process one block.
    ///
    /// `input` must be ordered by offset; offsets past the block end are
    /// treated as the last sample. Every output transition lands in `out`
    /// and is mirrored to the visualization relay.
    pub fn process_block<S: NoteSink>(
        &mut self,
        input: &[TimedMidiEvent],
        num_samples: usize,
        transport: &Transport,
        out: &mut S,
    ) {
        let snap = self.params.snapshot();
        {
            let mut sink = MirrorSink::new(out, &mut self.relay);
            self.core.run(&snap, input, num_samples, transport, &mut sink);
        }

        self.status.publish(
            self.core.ledger.active_root(),
            self.core.modifiers,
            self.core.arp.current_note(),
            self.relay.dropped(),
        );
    }
}

impl EngineCore {
    fn run<S: NoteSink>(
        &mut self,
        snap: &ParamSnapshot,
        input: &[TimedMidiEvent],
        num_samples: usize,
        transport: &Transport,
        out: &mut MirrorSink<'_, S>,
    ) {
        if snap.chord_mode != self.chord_mode {
            self.switch_chord_mode(snap.chord_mode, out);
        }

        if !snap.chord_mode {
            for event in input {
                out.forward(*event);
            }
            return;
        }

        let arpeggiating = snap.arp_enabled;
        if arpeggiating != self.arpeggiating {
            if arpeggiating {
                self.ledger.silence(0, out);
            } else {
                self.arp.stop(0, out);
                self.ledger.resound(0, out);
            }
            self.arpeggiating = arpeggiating;
        }

        let mut shape = ChordShape::new(self.modifiers.intervals(), snap.range);
        if snap.range != self.range {
            self.ledger
                .revoice(0, &shape, snap.retrigger, arpeggiating, out);
            self.range = snap.range;
        }

        self.arp.reseed(snap.arp_seed);

        let bpm = transport
            .bpm
            .filter(|bpm| *bpm > 0.0)
            .unwrap_or(DEFAULT_BPM);
        let samples_per_step = snap.arp_rate.samples_per_step(transport.sample_rate, bpm);
        let last = num_samples.saturating_sub(1);

        let mut cursor = 0;
        for timed in input {
            let offset = timed.offset.min(last).max(cursor);
            if offset > cursor {
                self.arp.advance(
                    cursor,
                    offset,
                    self.ledger.pool(),
                    arpeggiating,
                    samples_per_step,
                    out,
                );
                cursor = offset;
            }

            let (channel, key, velocity, pressed) = match timed.event.normalized() {
                MidiEvent::NoteOn {
                    channel,
                    key,
                    velocity,
                } => (channel, key, velocity, true),
                MidiEvent::NoteOff { channel, key, .. } => (channel, key, 0, false),
                _ => {
                    out.forward(TimedMidiEvent::new(offset, timed.event));
                    continue;
                }
            };

            if is_modifier_note(key) {
                if self.modifiers.apply(key, pressed) {
                    shape.intervals = self.modifiers.intervals();
                    self.ledger
                        .revoice(offset, &shape, snap.retrigger, arpeggiating, out);
                }
            } else if is_trigger_note(key) {
                if pressed {
                    self.ledger
                        .note_on(key, channel, velocity, offset, &shape, arpeggiating, out);
                } else {
                    self.ledger.note_off(key, offset, &shape, arpeggiating, out);
                }
            } else {
                out.forward(TimedMidiEvent::new(offset, timed.event));
            }
        }

        if num_samples > cursor {
            self.arp.advance(
                cursor,
                num_samples,
                self.ledger.pool(),
                arpeggiating,
                samples_per_step,
                out,
            );
        }
    }

    fn switch_chord_mode<S: NoteSink>(&mut self, on: bool, out: &mut MirrorSink<'_, S>) {
        if on {
            // Whatever passed through while chord mode was off may still be
            // sounding on any channel.
            for channel in 0..NUM_CHANNELS {
                out.all_notes_off(0, channel);
            }
            out.visual(VisualEvent::Reset);
            self.ledger.reset();
            self.arp.reset();
        } else {
            self.ledger.release_all(0, out);
            self.arp.stop(0, out);
        }
        // Modifier keys go untracked while chord mode is off.
        self.modifiers = ModifierState::default();
        self.chord_mode = on;
    }
}
