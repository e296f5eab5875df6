//! Trigger ownership ledger.
//!
//! Every note the chord engine sounds is owned by exactly one held trigger
//! key, so every note-off can be matched to the note-on that started it. Only
//! one trigger's chord is active at a time; the held-stack gives last-note
//! priority when keys are released out of order.

use crate::chord::{note_set::NoteSet, voicing::ChordShape};
use crate::io::{midi::FULL_VELOCITY, sink::NoteSink};

/// First note of the trigger zone (C5).
pub const TRIGGER_ZONE_START: u8 = 72;
/// Last note of the trigger zone (B5).
pub const TRIGGER_ZONE_END: u8 = 83;

pub fn is_trigger_note(note: u8) -> bool {
    (TRIGGER_ZONE_START..=TRIGGER_ZONE_END).contains(&note)
}

/// How an active chord reacts to a modifier or range change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RetriggerMode {
    /// Stop only the notes that left the chord, start only the new ones.
    #[default]
    Smart,
    /// Stop the whole chord and start the new one.
    Full,
}

impl RetriggerMode {
    pub fn name(&self) -> &'static str {
        match self {
            RetriggerMode::Smart => "Smart",
            RetriggerMode::Full => "Full",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct LedgerEntry {
    notes: NoteSet,
    channel: u8,
    velocity: u8,
    /// False when the chord was taken over by the arpeggiator; its notes
    /// were never started (or already stopped) by the ledger.
    sounding: bool,
}

/// Physically held trigger keys, most recent last.
#[derive(Debug, Clone)]
struct HeldStack {
    keys: [u8; 128],
    channels: [u8; 128],
    len: usize,
}

impl HeldStack {
    const fn new() -> Self {
        Self {
            keys: [0; 128],
            channels: [0; 128],
            len: 0,
        }
    }

    fn remove(&mut self, key: u8) {
        if let Some(pos) = self.keys[..self.len].iter().position(|&k| k == key) {
            self.keys.copy_within(pos + 1..self.len, pos);
            self.channels.copy_within(pos + 1..self.len, pos);
            self.len -= 1;
        }
    }

    fn push(&mut self, key: u8, channel: u8) {
        self.remove(key);
        if self.len < self.keys.len() {
            self.keys[self.len] = key;
            self.channels[self.len] = channel;
            self.len += 1;
        }
    }

    fn top(&self) -> Option<(u8, u8)> {
        self.len
            .checked_sub(1)
            .map(|i| (self.keys[i], self.channels[i]))
    }

    fn keys(&self) -> &[u8] {
        &self.keys[..self.len]
    }

    fn clear(&mut self) {
        self.len = 0;
    }
}

pub struct Ledger {
    entries: [Option<LedgerEntry>; 128],
    /// Trigger keys with an entry, for iteration without scanning.
    active: NoteSet,
    held: HeldStack,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            entries: [None; 128],
            active: NoteSet::EMPTY,
            held: HeldStack::new(),
        }
    }

    /// Trigger key pressed.
    ///
    /// Any active chord (including a duplicate press of `key`) is stopped,
    /// then `key`'s chord starts. With `arpeggiating` the chord is only
    /// recorded for the arpeggiator's pool.
    #[allow(clippy::too_many_arguments)]
    pub fn note_on<S: NoteSink>(
        &mut self,
        key: u8,
        channel: u8,
        velocity: u8,
        offset: usize,
        shape: &ChordShape,
        arpeggiating: bool,
        out: &mut S,
    ) {
        if key > 127 {
            return;
        }
        self.held.push(key, channel);
        self.play(key, channel, velocity, offset, shape, arpeggiating, out);
    }

    /// Trigger key released.
    ///
    /// If it owned the active chord, the chord stops and the most recently
    /// pressed key still held takes over at full velocity.
    pub fn note_off<S: NoteSink>(
        &mut self,
        key: u8,
        offset: usize,
        shape: &ChordShape,
        arpeggiating: bool,
        out: &mut S,
    ) {
        if key > 127 {
            return;
        }
        self.held.remove(key);

        if self.entries[key as usize].is_none() {
            return;
        }
        self.release_entry(key, offset, out);

        if let Some((next, channel)) = self.held.top() {
            self.play(next, channel, FULL_VELOCITY, offset, shape, arpeggiating, out);
        }
    }

    /// Re-voice the active chord after a modifier or range change.
    pub fn revoice<S: NoteSink>(
        &mut self,
        offset: usize,
        shape: &ChordShape,
        mode: RetriggerMode,
        arpeggiating: bool,
        out: &mut S,
    ) {
        for key in self.active {
            let target = shape.voice(key);
            let Some(entry) = self.entries[key as usize].as_mut() else {
                continue;
            };

            if entry.sounding {
                let (to_stop, to_start) = match mode {
                    RetriggerMode::Smart => (
                        entry.notes.difference(target),
                        target.difference(entry.notes),
                    ),
                    RetriggerMode::Full => (entry.notes, target),
                };
                for note in to_stop {
                    out.note_off(offset, entry.channel, note, 0);
                }
                if !arpeggiating {
                    for note in to_start {
                        out.note_on(offset, entry.channel, note, entry.velocity);
                    }
                }
            }

            entry.notes = target;
        }
    }

    /// Stop every sounding chord but keep ownership (arpeggiator takes over).
    pub fn silence<S: NoteSink>(&mut self, offset: usize, out: &mut S) {
        for key in self.active {
            if let Some(entry) = self.entries[key as usize].as_mut() {
                if entry.sounding {
                    for note in entry.notes {
                        out.note_off(offset, entry.channel, note, 0);
                    }
                    entry.sounding = false;
                }
            }
        }
    }

    /// Start every silent chord again (arpeggiator handed back).
    pub fn resound<S: NoteSink>(&mut self, offset: usize, out: &mut S) {
        for key in self.active {
            if let Some(entry) = self.entries[key as usize].as_mut() {
                if !entry.sounding {
                    for note in entry.notes {
                        out.note_on(offset, entry.channel, note, entry.velocity);
                    }
                    entry.sounding = true;
                }
            }
        }
    }

    /// Stop and forget everything, including held keys.
    pub fn release_all<S: NoteSink>(&mut self, offset: usize, out: &mut S) {
        for key in self.active {
            self.release_entry(key, offset, out);
        }
        self.held.clear();
    }

    /// Forget everything without emitting (the caller silenced the sink).
    pub fn reset(&mut self) {
        self.entries = [None; 128];
        self.active = NoteSet::EMPTY;
        self.held.clear();
    }

    /// Union of every owned note: the arpeggiator's pool.
    pub fn pool(&self) -> NoteSet {
        self.active
            .iter()
            .filter_map(|k| self.entries[k as usize].map(|e| e.notes))
            .fold(NoteSet::EMPTY, NoteSet::union)
    }

    /// Trigger key whose chord is active.
    pub fn active_root(&self) -> Option<u8> {
        self.active.lowest()
    }

    pub fn owned(&self, key: u8) -> Option<NoteSet> {
        self.entries.get(key as usize).copied().flatten().map(|e| e.notes)
    }

    /// Whether the active chord is sounding through the ledger itself.
    pub fn is_sounding(&self) -> bool {
        self.active
            .iter()
            .any(|k| self.entries[k as usize].is_some_and(|e| e.sounding))
    }

    pub fn held(&self) -> &[u8] {
        self.held.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    #[allow(clippy::too_many_arguments)]
    fn play<S: NoteSink>(
        &mut self,
        key: u8,
        channel: u8,
        velocity: u8,
        offset: usize,
        shape: &ChordShape,
        arpeggiating: bool,
        out: &mut S,
    ) {
        // Monophonic at root level: a repeated key and any other key alike
        // release their chord first.
        for active in self.active {
            self.release_entry(active, offset, out);
        }

        let target = shape.voice(key);
        if !arpeggiating {
            for note in target {
                out.note_on(offset, channel, note, velocity);
            }
        }

        self.entries[key as usize] = Some(LedgerEntry {
            notes: target,
            channel,
            velocity,
            sounding: !arpeggiating,
        });
        self.active.insert(key);
    }

    fn release_entry<S: NoteSink>(&mut self, key: u8, offset: usize, out: &mut S) {
        if let Some(entry) = self.entries[key as usize].take() {
            if entry.sounding {
                for note in entry.notes {
                    out.note_off(offset, entry.channel, note, 0);
                }
            }
        }
        self.active.remove(key);
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
