use crate::{
    io::midi::{MidiEvent, TimedMidiEvent},
    relay::{RelaySender, VisualEvent},
};

/// Destination for the engine's note stream (the external voice engine).
///
/// Offsets are sample positions inside the current block.
pub trait NoteSink {
    fn note_on(&mut self, offset: usize, channel: u8, note: u8, velocity: u8);

    fn note_off(&mut self, offset: usize, channel: u8, note: u8, velocity: u8);

    fn all_notes_off(&mut self, offset: usize, channel: u8);

    /// Pass an untouched input event through.
    ///
    /// The default implementation is lossy: note events are routed through
    /// `note_on`/`note_off`, but controllers, pitch bend and program changes
    /// are dropped. Sinks that feed a real voice engine should override it.
    fn forward(&mut self, event: TimedMidiEvent) {
        match event.event {
            MidiEvent::NoteOn {
                channel,
                key,
                velocity,
            } => self.note_on(event.offset, channel, key, velocity),
            MidiEvent::NoteOff {
                channel,
                key,
                velocity,
            } => self.note_off(event.offset, channel, key, velocity),
            _ => {}
        }
    }
}

impl<S: NoteSink + ?Sized> NoteSink for &mut S {
    fn note_on(&mut self, offset: usize, channel: u8, note: u8, velocity: u8) {
        (**self).note_on(offset, channel, note, velocity)
    }

    fn note_off(&mut self, offset: usize, channel: u8, note: u8, velocity: u8) {
        (**self).note_off(offset, channel, note, velocity)
    }

    fn all_notes_off(&mut self, offset: usize, channel: u8) {
        (**self).all_notes_off(offset, channel)
    }

    fn forward(&mut self, event: TimedMidiEvent) {
        (**self).forward(event)
    }
}

/// Sink adapter that mirrors every note transition into the visualization relay.
pub struct MirrorSink<'a, S: NoteSink> {
    inner: &'a mut S,
    relay: &'a mut RelaySender<VisualEvent>,
}

impl<'a, S: NoteSink> MirrorSink<'a, S> {
    pub fn new(inner: &'a mut S, relay: &'a mut RelaySender<VisualEvent>) -> Self {
        Self { inner, relay }
    }

    /// Push a non-note event (arp band, reset) alongside the note stream.
    pub fn visual(&mut self, event: VisualEvent) {
        self.relay.push(event);
    }
}

impl<S: NoteSink> NoteSink for MirrorSink<'_, S> {
    fn note_on(&mut self, offset: usize, channel: u8, note: u8, velocity: u8) {
        self.inner.note_on(offset, channel, note, velocity);
        self.relay.push(VisualEvent::Note { note, on: true });
    }

    fn note_off(&mut self, offset: usize, channel: u8, note: u8, velocity: u8) {
        self.inner.note_off(offset, channel, note, velocity);
        self.relay.push(VisualEvent::Note { note, on: false });
    }

    fn all_notes_off(&mut self, offset: usize, channel: u8) {
        self.inner.all_notes_off(offset, channel);
    }

    fn forward(&mut self, event: TimedMidiEvent) {
        self.inner.forward(event);
        if let Some((note, on)) = event.event.normalized().note() {
            self.relay.push(VisualEvent::Note { note, on });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{io::buffer::MidiBuffer, relay::visual_channel};

    /// Implements only the required methods.
    #[derive(Default)]
    struct NotesOnly {
        notes: Vec<(u8, bool)>,
    }

    impl NoteSink for NotesOnly {
        fn note_on(&mut self, _offset: usize, _channel: u8, note: u8, _velocity: u8) {
            self.notes.push((note, true));
        }

        fn note_off(&mut self, _offset: usize, _channel: u8, note: u8, _velocity: u8) {
            self.notes.push((note, false));
        }

        fn all_notes_off(&mut self, _offset: usize, _channel: u8) {}
    }

    #[test]
    fn default_forward_routes_notes_and_drops_controllers() {
        let mut sink = NotesOnly::default();
        sink.forward(TimedMidiEvent::note_on(0, 0, 40, 90));
        sink.forward(TimedMidiEvent::new(
            1,
            MidiEvent::ControlChange {
                channel: 0,
                controller: 64,
                value: 127,
            },
        ));
        sink.forward(TimedMidiEvent::note_off(2, 0, 40));
        assert_eq!(sink.notes, vec![(40, true), (40, false)]);
    }

    #[test]
    fn mirror_forwards_pass_through_notes_to_relay() {
        let (mut tx, mut rx) = visual_channel(16);
        let mut buf = MidiBuffer::with_capacity(8);
        let cc = TimedMidiEvent::new(
            0,
            MidiEvent::ControlChange {
                channel: 0,
                controller: 1,
                value: 10,
            },
        );
        {
            let mut out = MirrorSink::new(&mut buf, &mut tx);
            out.forward(TimedMidiEvent::note_on(0, 3, 40, 100));
            out.forward(cc);
            // Velocity 0 is shown as a release
            out.forward(TimedMidiEvent::note_on(5, 3, 40, 0));
        }
        assert_eq!(buf.len(), 3);
        assert_eq!(
            rx.drain().collect::<Vec<_>>(),
            vec![
                VisualEvent::Note { note: 40, on: true },
                VisualEvent::Note { note: 40, on: false },
            ]
        );
    }
}
