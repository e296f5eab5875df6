//! Chord voicing: spread every chord tone across every octave of the range.

use crate::chord::{
    modifier::Intervals,
    note_set::NoteSet,
    range::{fit_note_to_range, RangeBounds},
};
use crate::io::midi::MAX_NOTE;

/// Voice a chord.
///
/// For the root's pitch class and each `(root + interval) mod 12`, every note
/// in `[low, high]` sharing that pitch class is included. With no intervals
/// the result is every octave of the root in range.
///
/// A degenerate range cannot be filled; each chord tone is then passed
/// through unfitted (root + interval), dropping anything above 127.
pub fn voice(root: u8, intervals: &[u8], range: RangeBounds) -> NoteSet {
    if range.is_degenerate() {
        return voice_unfitted(root, intervals, range);
    }

    let mut out = fill_pitch_class(root % 12, range);
    for &interval in intervals {
        let pc = (root as u16 + interval as u16) % 12;
        out = out.union(fill_pitch_class(pc as u8, range));
    }
    out
}

/// Every note of pitch class `pc` in `[low, high]`.
pub fn fill_pitch_class(pc: u8, range: RangeBounds) -> NoteSet {
    let low = range.low() as i32;
    let high = range.high().min(MAX_NOTE) as i32;
    let mut set = NoteSet::EMPTY;

    let mut note = low + ((pc as i32 - low % 12) + 12) % 12;
    while note <= high {
        set.insert(note as u8);
        note += 12;
    }
    set
}

fn voice_unfitted(root: u8, intervals: &[u8], range: RangeBounds) -> NoteSet {
    let (low, high) = (range.low() as i32, range.high() as i32);
    let mut set = NoteSet::EMPTY;
    let tones = std::iter::once(0).chain(intervals.iter().copied());
    for interval in tones {
        let note = fit_note_to_range(root as i32 + interval as i32, low, high);
        if (0..=MAX_NOTE as i32).contains(&note) {
            set.insert(note as u8);
        }
    }
    set
}

/// Everything needed to voice a trigger key during one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChordShape {
    pub intervals: Intervals,
    pub range: RangeBounds,
}

impl ChordShape {
    pub fn new(intervals: Intervals, range: RangeBounds) -> Self {
        Self { intervals, range }
    }

    pub fn voice(&self, root: u8) -> NoteSet {
        voice(root, &self.intervals, self.range)
    }
}
