/// Arpeggiator step length as a note value, from a half note down to 1/64.
///
/// Index `i` selects a `1 / 2^(i+1)` note: 0 = 1/2, 1 = 1/4, ... 5 = 1/64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpRate {
    index: u8,
}

/// Tempo assumed when the host reports none.
pub const DEFAULT_BPM: f64 = 120.0;

impl ArpRate {
    pub const MAX_INDEX: u8 = 5;

    pub const HALF: ArpRate = ArpRate { index: 0 };
    pub const QUARTER: ArpRate = ArpRate { index: 1 };
    pub const EIGHTH: ArpRate = ArpRate { index: 2 };
    pub const SIXTEENTH: ArpRate = ArpRate { index: 3 };
    pub const THIRTY_SECOND: ArpRate = ArpRate { index: 4 };
    pub const SIXTY_FOURTH: ArpRate = ArpRate { index: 5 };

    /// Out-of-range indices clamp to the nearest rate.
    pub const fn from_index(index: i32) -> Self {
        let index = if index < 0 {
            0
        } else if index > Self::MAX_INDEX as i32 {
            Self::MAX_INDEX
        } else {
            index as u8
        };
        ArpRate { index }
    }

    pub const fn index(self) -> u8 {
        self.index
    }

    /// Note value denominator: 2, 4, 8, 16, 32 or 64.
    pub const fn denominator(self) -> u32 {
        2 << self.index
    }

    /// Step length in quarter-note beats (a whole note is 4 beats).
    pub fn beats(self) -> f64 {
        4.0 / self.denominator() as f64
    }

    /// Step length in samples.
    ///
    /// samples_per_beat = sample_rate / (bpm / 60); step = samples_per_beat * 4 / denominator
    pub fn samples_per_step(self, sample_rate: f64, bpm: f64) -> f64 {
        let beats_per_second = bpm / 60.0;
        let samples_per_beat = sample_rate / beats_per_second;
        samples_per_beat * self.beats()
    }

    pub const fn name(self) -> &'static str {
        match self.index {
            0 => "1/2",
            1 => "1/4",
            2 => "1/8",
            3 => "1/16",
            4 => "1/32",
            _ => "1/64",
        }
    }

    pub const fn faster(self) -> Self {
        Self::from_index(self.index as i32 + 1)
    }

    pub const fn slower(self) -> Self {
        Self::from_index(self.index as i32 - 1)
    }
}

impl Default for ArpRate {
    fn default() -> Self {
        Self::EIGHTH
    }
}
