/// Highest legal MIDI note number.
pub const MAX_NOTE: u8 = 127;

/// Full-scale MIDI velocity.
pub const FULL_VELOCITY: u8 = 127;

/// Number of MIDI channels. Channels are zero-based (0 = MIDI channel 1).
pub const NUM_CHANNELS: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    PitchBend { channel: u8, value: i16 },
    ProgramChange { channel: u8, program: u8 },
}

impl MidiEvent {
    /// Note-on with velocity 0 is a note-off by MIDI convention.
    pub fn normalized(self) -> Self {
        match self {
            MidiEvent::NoteOn {
                channel,
                key,
                velocity: 0,
            } => MidiEvent::NoteOff {
                channel,
                key,
                velocity: 0,
            },
            other => other,
        }
    }

    /// Key and pressed-state for note events, `None` for everything else.
    pub fn note(&self) -> Option<(u8, bool)> {
        match *self {
            MidiEvent::NoteOn { key, velocity, .. } => Some((key, velocity > 0)),
            MidiEvent::NoteOff { key, .. } => Some((key, false)),
            _ => None,
        }
    }
}

/// A MIDI event stamped with its sample offset inside the current block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedMidiEvent {
    pub offset: usize,
    pub event: MidiEvent,
}

impl TimedMidiEvent {
    pub fn new(offset: usize, event: MidiEvent) -> Self {
        Self { offset, event }
    }

    pub fn note_on(offset: usize, channel: u8, key: u8, velocity: u8) -> Self {
        Self::new(
            offset,
            MidiEvent::NoteOn {
                channel,
                key,
                velocity,
            },
        )
    }

    pub fn note_off(offset: usize, channel: u8, key: u8) -> Self {
        Self::new(
            offset,
            MidiEvent::NoteOff {
                channel,
                key,
                velocity: 0,
            },
        )
    }
}

/// Host transport information for one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transport {
    pub sample_rate: f64,
    /// Host tempo, if the host exposes a play head.
    pub bpm: Option<f64>,
}

impl Transport {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            bpm: None,
        }
    }

    pub fn with_bpm(mut self, bpm: f64) -> Self {
        self.bpm = Some(bpm);
        self
    }
}
