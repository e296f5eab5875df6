//! Real-time chord-split MIDI engine.
//!
//! A modifier zone (60-71) selects chord quality, a trigger zone (72-83)
//! selects the root, and the engine voices the chord across a configurable
//! range, optionally as a seeded, tempo-synced arpeggio.

pub mod arp; // Seeded tempo-synced arpeggiator
pub mod chord; // Voicing, modifiers and note ownership
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod params;
pub mod relay; // SPSC visualization channel

pub use config::EngineConfig;
pub use engine::ChordEngine;
pub use error::ConfigError;
pub use params::{EngineParams, EngineStatus};

/// Largest block the demo host renders at once.
pub const MAX_BLOCK_SIZE: usize = 2048;
