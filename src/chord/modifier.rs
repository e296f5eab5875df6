//! Modifier zone decoding: held keys become chord quality and extension flags.

/// First note of the 12-note modifier zone (C4).
pub const MODIFIER_ZONE_START: u8 = 60;
/// Last note of the modifier zone (B4).
pub const MODIFIER_ZONE_END: u8 = 71;

/// Triad quality flags, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Triad {
    Diminished,
    Minor,
    Major,
    Sus2,
}

/// Extension flags, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    Six,
    Minor7,
    Major7,
    Ninth,
}

impl Triad {
    pub const PRIORITY: [Triad; 4] = [Triad::Diminished, Triad::Minor, Triad::Major, Triad::Sus2];

    const fn bit(self) -> u8 {
        match self {
            Triad::Diminished => 1 << 0,
            Triad::Minor => 1 << 1,
            Triad::Major => 1 << 2,
            Triad::Sus2 => 1 << 3,
        }
    }

    /// Intervals above the root, excluding the root itself.
    pub const fn intervals(self) -> &'static [u8] {
        match self {
            Triad::Diminished => &[3, 6],
            Triad::Minor => &[3, 7],
            Triad::Major => &[4, 7],
            Triad::Sus2 => &[2, 7],
        }
    }
}

impl Extension {
    pub const PRIORITY: [Extension; 4] = [
        Extension::Six,
        Extension::Minor7,
        Extension::Major7,
        Extension::Ninth,
    ];

    const fn bit(self) -> u8 {
        match self {
            Extension::Six => 1 << 4,
            Extension::Minor7 => 1 << 5,
            Extension::Major7 => 1 << 6,
            Extension::Ninth => 1 << 7,
        }
    }

    pub const fn intervals(self) -> &'static [u8] {
        match self {
            Extension::Six => &[9],
            Extension::Minor7 => &[10],
            Extension::Major7 => &[11],
            Extension::Ninth => &[10, 14],
        }
    }
}

/// What a modifier-zone key controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKey {
    Triad(Triad),
    Extension(Extension),
    Reserved,
}

impl ModifierKey {
    /// Decode a note in the modifier zone. `None` outside the zone.
    ///
    /// Black keys select the triad, white keys the extension:
    /// C 6, C# dim, D min7, D# min, F maj7, F# maj, G 9, G# sus2.
    pub fn from_note(note: u8) -> Option<Self> {
        if !is_modifier_note(note) {
            return None;
        }
        let key = match note - MODIFIER_ZONE_START {
            0 => ModifierKey::Extension(Extension::Six),
            1 => ModifierKey::Triad(Triad::Diminished),
            2 => ModifierKey::Extension(Extension::Minor7),
            3 => ModifierKey::Triad(Triad::Minor),
            5 => ModifierKey::Extension(Extension::Major7),
            6 => ModifierKey::Triad(Triad::Major),
            7 => ModifierKey::Extension(Extension::Ninth),
            8 => ModifierKey::Triad(Triad::Sus2),
            _ => ModifierKey::Reserved,
        };
        Some(key)
    }
}

pub fn is_modifier_note(note: u8) -> bool {
    (MODIFIER_ZONE_START..=MODIFIER_ZONE_END).contains(&note)
}

/// Interval list for one chord: at most a two-note triad plus a two-note
/// extension. Fixed capacity, no allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intervals {
    buf: [u8; 4],
    len: usize,
}

impl Intervals {
    pub fn from_slice(intervals: &[u8]) -> Self {
        let mut out = Intervals::default();
        for &i in intervals.iter().take(4) {
            out.buf[out.len] = i;
            out.len += 1;
        }
        out
    }

    fn extend(&mut self, intervals: &[u8]) {
        for &i in intervals {
            self.buf[self.len] = i;
            self.len += 1;
        }
    }
}

impl std::ops::Deref for Intervals {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// Literal key-down state of all eight modifier flags, packed in one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierState(u8);

impl ModifierState {
    pub const fn from_bits(bits: u8) -> Self {
        ModifierState(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Feed a modifier-zone note transition. Returns whether any flag changed.
    ///
    /// Notes outside the zone and reserved keys never change anything.
    pub fn apply(&mut self, note: u8, pressed: bool) -> bool {
        let bit = match ModifierKey::from_note(note) {
            Some(ModifierKey::Triad(t)) => t.bit(),
            Some(ModifierKey::Extension(e)) => e.bit(),
            Some(ModifierKey::Reserved) | None => return false,
        };
        let before = self.0;
        if pressed {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
        before != self.0
    }

    pub fn set_triad(&mut self, triad: Triad, held: bool) {
        self.set_bit(triad.bit(), held);
    }

    pub fn set_extension(&mut self, extension: Extension, held: bool) {
        self.set_bit(extension.bit(), held);
    }

    fn set_bit(&mut self, bit: u8, held: bool) {
        if held {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }

    pub fn is_held_triad(self, triad: Triad) -> bool {
        self.0 & triad.bit() != 0
    }

    pub fn is_held_extension(self, extension: Extension) -> bool {
        self.0 & extension.bit() != 0
    }

    /// Highest-priority held triad flag.
    pub fn triad(self) -> Option<Triad> {
        Triad::PRIORITY
            .into_iter()
            .find(|t| self.is_held_triad(*t))
    }

    /// Highest-priority held extension flag.
    pub fn extension(self) -> Option<Extension> {
        Extension::PRIORITY
            .into_iter()
            .find(|e| self.is_held_extension(*e))
    }

    /// Chord intervals above the root (root itself implicit).
    pub fn intervals(self) -> Intervals {
        let mut out = Intervals::default();
        if let Some(t) = self.triad() {
            out.extend(t.intervals());
        }
        if let Some(e) = self.extension() {
            out.extend(e.intervals());
        }
        out
    }
}
