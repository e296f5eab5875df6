//! Playable note range with a minimum one-octave span.

use crate::io::midi::MAX_NOTE;

/// Minimum distance between the low and high bound, in semitones.
pub const MIN_SPAN: u8 = 12;

/// Highest value the low bound may take.
pub const MAX_LOW: u8 = MAX_NOTE - MIN_SPAN;

/// Lowest value the high bound may take.
pub const MIN_HIGH: u8 = MIN_SPAN;

/// Inclusive note range `[low, high]` with `high - low >= 12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeBounds {
    low: u8,
    high: u8,
}

impl RangeBounds {
    /// C3..C6.
    pub const DEFAULT: RangeBounds = RangeBounds { low: 48, high: 84 };

    /// Build a range, clamping both bounds. When they conflict the low bound
    /// wins and the high bound is pushed up.
    pub fn new(low: u8, high: u8) -> Self {
        let mut range = RangeBounds::DEFAULT;
        range.set_high(high);
        range.set_low(low);
        range
    }

    /// Raw bounds, no clamping. Only used to describe ranges arriving from
    /// outside the manager (e.g. a host that bypasses it).
    pub const fn unchecked(low: u8, high: u8) -> Self {
        RangeBounds { low, high }
    }

    pub fn low(&self) -> u8 {
        self.low
    }

    pub fn high(&self) -> u8 {
        self.high
    }

    /// Move the low bound, pushing the high bound up if the span would shrink
    /// below an octave.
    pub fn set_low(&mut self, note: u8) {
        self.low = note.min(MAX_LOW);
        if self.high < self.low + MIN_SPAN {
            self.high = (self.low + MIN_SPAN).min(MAX_NOTE);
        }
    }

    /// Move the high bound, pushing the low bound down if the span would
    /// shrink below an octave.
    pub fn set_high(&mut self, note: u8) {
        self.high = note.clamp(MIN_HIGH, MAX_NOTE);
        if self.low + MIN_SPAN > self.high {
            self.low = self.high - MIN_SPAN;
        }
    }

    pub fn contains(&self, note: u8) -> bool {
        note >= self.low && note <= self.high
    }

    pub fn is_degenerate(&self) -> bool {
        self.low >= self.high
    }

    /// Pack into one word so both bounds can share a single atomic.
    pub(crate) const fn pack(self) -> u32 {
        ((self.low as u32) << 8) | self.high as u32
    }

    pub(crate) const fn unpack(bits: u32) -> Self {
        RangeBounds {
            low: (bits >> 8) as u8,
            high: bits as u8,
        }
    }
}

impl Default for RangeBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Shift `note` by octaves until it lies inside `[low, high]`.
///
/// A degenerate range (`low >= high`) leaves the note untouched.
pub fn fit_note_to_range(note: i32, low: i32, high: i32) -> i32 {
    if low >= high {
        return note;
    }

    let mut candidate = note;
    while candidate < low {
        candidate += 12;
    }
    while candidate > high {
        candidate -= 12;
    }
    candidate
}
