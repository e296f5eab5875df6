// Purpose: tempo-synced, seeded arpeggiation of the chord pool

pub mod pattern;
pub mod rate;
pub mod sequencer;

pub use pattern::ArpPattern;
pub use rate::{ArpRate, DEFAULT_BPM};
pub use sequencer::{Arpeggiator, ARP_CHANNEL};
