//! Human-readable chord names for displays. Allocates; not for the audio thread.

use crate::chord::modifier::{Extension, ModifierState, Triad};

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pitch-class name of a MIDI note ("C", "F#", ...).
pub fn note_name(note: u8) -> &'static str {
    NOTE_NAMES[(note % 12) as usize]
}

/// Note name with octave, middle C = "C4".
pub fn note_label(note: u8) -> String {
    let octave = note as i32 / 12 - 1;
    format!("{}{}", note_name(note), octave)
}

/// Name the chord a trigger key would sound with the given modifiers,
/// e.g. "Dm7", "F#sus2", "Cdim6". A bare root is just its name.
pub fn chord_name(root: u8, modifiers: ModifierState) -> String {
    let mut name = String::from(note_name(root));

    match modifiers.triad() {
        Some(Triad::Diminished) => name.push_str("dim"),
        Some(Triad::Minor) => name.push('m'),
        Some(Triad::Sus2) => name.push_str("sus2"),
        Some(Triad::Major) | None => {}
    }

    match modifiers.extension() {
        Some(Extension::Six) => name.push('6'),
        Some(Extension::Minor7) => name.push('7'),
        Some(Extension::Major7) => name.push_str("Maj7"),
        Some(Extension::Ninth) => name.push('9'),
        None => {}
    }

    name
}
