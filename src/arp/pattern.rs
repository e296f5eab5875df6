//! Precomputed seeded step pattern.
//!
//! The pattern stores raw 32-bit values from a PCG32 stream; the sequencer
//! reduces each one modulo the pool size at play time. PCG32 output for a
//! given seed is fixed by the algorithm, so a seed reproduces the same
//! pattern on every platform and crate version.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Steps before the pattern repeats.
pub const PATTERN_LEN: usize = 256;

#[derive(Clone)]
pub struct ArpPattern {
    seed: u64,
    values: [u32; PATTERN_LEN],
}

impl ArpPattern {
    pub fn generate(seed: u64) -> Self {
        let mut pattern = Self {
            seed,
            values: [0; PATTERN_LEN],
        };
        pattern.fill(seed);
        pattern
    }

    /// Regenerate in place if the seed changed. No allocation.
    pub fn reseed(&mut self, seed: u64) -> bool {
        if seed == self.seed {
            return false;
        }
        self.fill(seed);
        true
    }

    fn fill(&mut self, seed: u64) {
        self.seed = seed;
        let mut rng = Pcg32::seed_from_u64(seed);
        for v in self.values.iter_mut() {
            *v = rng.next_u32();
        }
    }

    /// Raw value for `step`, wrapping around the pattern length.
    #[inline]
    pub fn value(&self, step: usize) -> u32 {
        self.values[step % PATTERN_LEN]
    }

    /// Pool index for `step` given a pool of `len` notes.
    #[inline]
    pub fn index(&self, step: usize, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.value(step) as usize % len
        }
    }
}

impl std::fmt::Debug for ArpPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArpPattern")
            .field("seed", &self.seed)
            .field("head", &&self.values[..4])
            .finish()
    }
}
