//! Scripted two-hand performance that stands in for a player.
//!
//! The left hand holds modifier keys, the right hand plays trigger keys. The
//! script loops forever and hands out events block by block.

use chordsplit::io::{MidiEvent, TimedMidiEvent};

/// Beats in one pass of the script.
const LOOP_BEATS: f64 = 16.0;

struct Cue {
    at: u64,
    event: MidiEvent,
}

pub struct Script {
    cues: Vec<Cue>,
    /// Loop length in samples
    length: u64,
    /// Current position inside the loop
    position: u64,
}

impl Script {
    /// Four bars: Cmaj7, Am7, Dm9, Gsus2 with a passing B on top.
    pub fn demo(sample_rate: f64, bpm: f64) -> Self {
        let samples_per_beat = sample_rate * 60.0 / bpm;
        let mut cues = Vec::new();
        let mut hold = |beat: f64, beats: f64, keys: &[u8]| {
            let on = (beat * samples_per_beat) as u64;
            let off = ((beat + beats) * samples_per_beat) as u64 - 1;
            for &key in keys {
                cues.push(Cue {
                    at: on,
                    event: note_on(key),
                });
                cues.push(Cue {
                    at: off,
                    event: note_off(key),
                });
            }
        };

        // Left hand: quality
        hold(0.0, 4.0, &[66, 65]); // maj + maj7
        hold(4.0, 4.0, &[63, 62]); // min + min7
        hold(8.0, 4.0, &[63, 67]); // min + 9
        hold(12.0, 4.0, &[68]); // sus2

        // Right hand: roots
        hold(0.0, 4.0, &[72]); // C
        hold(4.0, 2.0, &[81]); // A
        hold(6.0, 2.0, &[81]);
        hold(8.0, 4.0, &[74]); // D
        hold(12.0, 4.0, &[79]); // G, held under...
        hold(13.0, 1.0, &[83]); // ...a passing B

        // Stable: at equal times the modifiers stay ahead of the roots
        cues.sort_by_key(|c| c.at);

        Self {
            cues,
            length: (LOOP_BEATS * samples_per_beat) as u64,
            position: 0,
        }
    }

    /// Replace `out` with the events falling in the next `num_samples`.
    pub fn fill_block(&mut self, num_samples: usize, out: &mut Vec<TimedMidiEvent>) {
        out.clear();
        let start = self.position;
        let end = start + num_samples as u64;

        for cue in &self.cues {
            if cue.at >= start && cue.at < end.min(self.length) {
                out.push(TimedMidiEvent::new((cue.at - start) as usize, cue.event));
            }
        }
        if end > self.length {
            let wrapped = end - self.length;
            for cue in self.cues.iter().take_while(|c| c.at < wrapped) {
                let offset = cue.at + self.length - start;
                out.push(TimedMidiEvent::new(offset as usize, cue.event));
            }
        }

        self.position = end % self.length;
    }
}

fn note_on(key: u8) -> MidiEvent {
    MidiEvent::NoteOn {
        channel: 0,
        key,
        velocity: 100,
    }
}

fn note_off(key: u8) -> MidiEvent {
    MidiEvent::NoteOff {
        channel: 0,
        key,
        velocity: 0,
    }
}
