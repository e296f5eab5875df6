// Purpose: external interfaces, MIDI in and note sinks out

pub mod buffer;
pub mod midi;
pub mod sink;

pub use buffer::MidiBuffer;
pub use midi::{MidiEvent, TimedMidiEvent, Transport};
pub use sink::{MirrorSink, NoteSink};
