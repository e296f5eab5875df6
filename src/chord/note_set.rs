use crate::io::midi::MAX_NOTE;

/// A set of MIDI note numbers, one bit per note.
///
/// Copy, allocation-free and always ordered, so chord voicings can be diffed
/// and iterated on the audio thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NoteSet(u128);

impl NoteSet {
    pub const EMPTY: NoteSet = NoteSet(0);

    pub const fn from_bits(bits: u128) -> Self {
        NoteSet(bits)
    }

    pub const fn bits(self) -> u128 {
        self.0
    }

    /// Insert a note. Notes above 127 are ignored and `false` is returned.
    #[inline]
    pub fn insert(&mut self, note: u8) -> bool {
        if note > MAX_NOTE {
            return false;
        }
        self.0 |= 1u128 << note;
        true
    }

    #[inline]
    pub fn remove(&mut self, note: u8) {
        if note <= MAX_NOTE {
            self.0 &= !(1u128 << note);
        }
    }

    #[inline]
    pub fn contains(self, note: u8) -> bool {
        note <= MAX_NOTE && self.0 & (1u128 << note) != 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn union(self, other: NoteSet) -> NoteSet {
        NoteSet(self.0 | other.0)
    }

    /// Notes in `self` that are not in `other`.
    #[inline]
    pub fn difference(self, other: NoteSet) -> NoteSet {
        NoteSet(self.0 & !other.0)
    }

    /// The `index`-th lowest note.
    pub fn nth(self, index: usize) -> Option<u8> {
        self.iter().nth(index)
    }

    pub fn lowest(self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as u8)
        }
    }

    /// Ascending iteration.
    pub fn iter(self) -> NoteSetIter {
        NoteSetIter(self.0)
    }
}

impl FromIterator<u8> for NoteSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = NoteSet::EMPTY;
        for note in iter {
            set.insert(note);
        }
        set
    }
}

impl IntoIterator for NoteSet {
    type Item = u8;
    type IntoIter = NoteSetIter;

    fn into_iter(self) -> NoteSetIter {
        self.iter()
    }
}

pub struct NoteSetIter(u128);

impl Iterator for NoteSetIter {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        if self.0 == 0 {
            return None;
        }
        let note = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(note)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for NoteSetIter {}
