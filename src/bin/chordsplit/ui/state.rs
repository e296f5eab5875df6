//! Display-side view of the engine's visualization stream
//!
//! Fed from the relay on the UI thread; nothing here touches the audio thread.

use chordsplit::relay::{VisualEvent, BAND_COUNT};

/// Level a released note starts fading from
const RELEASE_LEVEL: f32 = 0.8;
/// Fraction of a level lost per second
const DECAY_PER_SEC: f32 = 2.5;

/// Static info about the running session
#[derive(Clone, Copy, Debug)]
pub struct UiInfo {
    pub bpm: f64,
    pub sample_rate: f64,
    pub block_size: usize,
}

#[derive(Clone, Debug)]
pub struct DisplayState {
    /// Notes sounding right now
    held: [bool; 128],
    /// Brightness per note: 1.0 while held, fading after release
    levels: [f32; 128],
    /// Arp band activity, kicked to 1.0 on each step
    bands: [f32; BAND_COUNT as usize],
    /// Chord-mode resets seen
    pub resets: u64,
}

impl DisplayState {
    pub fn new() -> Self {
        Self {
            held: [false; 128],
            levels: [0.0; 128],
            bands: [0.0; BAND_COUNT as usize],
            resets: 0,
        }
    }

    pub fn apply(&mut self, event: VisualEvent) {
        match event {
            VisualEvent::Note { note, on } => {
                let i = (note & 0x7f) as usize;
                self.held[i] = on;
                self.levels[i] = if on { 1.0 } else { RELEASE_LEVEL };
            }
            VisualEvent::Band(band) => {
                if let Some(level) = self.bands.get_mut(band as usize) {
                    *level = 1.0;
                }
            }
            VisualEvent::Reset => {
                self.held = [false; 128];
                self.levels = [0.0; 128];
                self.resets += 1;
            }
        }
    }

    /// Age released notes and band peaks by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let keep = (1.0 - DECAY_PER_SEC * dt).max(0.0);
        for (level, held) in self.levels.iter_mut().zip(self.held.iter()) {
            if !held {
                *level *= keep;
            }
        }
        for level in self.bands.iter_mut() {
            *level *= keep;
        }
    }

    pub fn is_held(&self, note: u8) -> bool {
        self.held[(note & 0x7f) as usize]
    }

    pub fn level(&self, note: u8) -> f32 {
        self.levels[(note & 0x7f) as usize]
    }

    pub fn bands(&self) -> &[f32] {
        &self.bands
    }

    pub fn held_count(&self) -> usize {
        self.held.iter().filter(|h| **h).count()
    }
}
