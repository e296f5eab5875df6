use crate::io::{
    midi::{MidiEvent, TimedMidiEvent},
    sink::NoteSink,
};

/// MIDI controller number for "All Notes Off".
pub const ALL_NOTES_OFF_CC: u8 = 123;

/// Pre-allocated, offset-ordered output buffer for one block.
///
/// Events with equal offsets keep their insertion order, so a note-off
/// followed by a note-on of the same key at the same sample stays in that
/// order. Capacity is reserved up front; running past it grows the buffer
/// rather than losing MIDI.
#[derive(Debug, Clone, Default)]
pub struct MidiBuffer {
    events: Vec<TimedMidiEvent>,
}

impl MidiBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, event: TimedMidiEvent) {
        // Scan from the back: engine output is almost always appended in order.
        let idx = self
            .events
            .iter()
            .rposition(|e| e.offset <= event.offset)
            .map_or(0, |i| i + 1);
        self.events.insert(idx, event);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.events.capacity()
    }

    pub fn events(&self) -> &[TimedMidiEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedMidiEvent> {
        self.events.iter()
    }

    /// Keys of every note-on, in output order.
    pub fn note_ons(&self) -> impl Iterator<Item = u8> + '_ {
        self.events.iter().filter_map(|e| match e.event {
            MidiEvent::NoteOn { key, .. } => Some(key),
            _ => None,
        })
    }

    /// Keys of every note-off, in output order.
    pub fn note_offs(&self) -> impl Iterator<Item = u8> + '_ {
        self.events.iter().filter_map(|e| match e.event {
            MidiEvent::NoteOff { key, .. } => Some(key),
            _ => None,
        })
    }
}

impl NoteSink for MidiBuffer {
    fn note_on(&mut self, offset: usize, channel: u8, note: u8, velocity: u8) {
        self.push(TimedMidiEvent::note_on(offset, channel, note, velocity));
    }

    fn note_off(&mut self, offset: usize, channel: u8, note: u8, velocity: u8) {
        self.push(TimedMidiEvent::new(
            offset,
            MidiEvent::NoteOff {
                channel,
                key: note,
                velocity,
            },
        ));
    }

    fn all_notes_off(&mut self, offset: usize, channel: u8) {
        self.push(TimedMidiEvent::new(
            offset,
            MidiEvent::ControlChange {
                channel,
                controller: ALL_NOTES_OFF_CC,
                value: 0,
            },
        ));
    }

    fn forward(&mut self, event: TimedMidiEvent) {
        self.push(event);
    }
}
