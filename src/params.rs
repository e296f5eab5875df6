//! Lock-free parameter and status exchange between the control thread and
//! the block thread.
//!
//! The control thread writes `EngineParams`; the engine reads one
//! `ParamSnapshot` at the top of every block. `EngineStatus` flows the other
//! way for displays.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicU8, Ordering};

use crate::{
    arp::rate::ArpRate,
    chord::{ledger::RetriggerMode, modifier::ModifierState, range::RangeBounds},
    config::EngineConfig,
};

/// Sentinel for "no note" in the status atomics.
const NO_NOTE: u8 = u8::MAX;

/// Parameter values as seen by one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    pub chord_mode: bool,
    pub retrigger: RetriggerMode,
    pub range: RangeBounds,
    pub arp_enabled: bool,
    pub arp_rate: ArpRate,
    pub arp_seed: u64,
}

#[derive(Debug)]
pub struct EngineParams {
    chord_mode: AtomicBool,
    retrigger: AtomicU8,
    /// Both bounds packed so a reader never sees half an update.
    range: AtomicU32,
    arp_enabled: AtomicBool,
    arp_rate: AtomicU8,
    arp_seed: AtomicU64,
}

impl EngineParams {
    pub fn from_config(config: &EngineConfig) -> Self {
        let range = RangeBounds::new(config.low_note, config.high_note);
        if range.low() != config.low_note || range.high() != config.high_note {
            log::warn!(
                "range {}..{} adjusted to {}..{}",
                config.low_note,
                config.high_note,
                range.low(),
                range.high()
            );
        }

        Self {
            chord_mode: AtomicBool::new(config.chord_mode),
            retrigger: AtomicU8::new(retrigger_to_u8(config.retrigger)),
            range: AtomicU32::new(range.pack()),
            arp_enabled: AtomicBool::new(config.arp_enabled),
            arp_rate: AtomicU8::new(ArpRate::from_index(config.arp_rate as i32).index()),
            arp_seed: AtomicU64::new(config.arp_seed),
        }
    }

    /// Read every parameter once. Called by the block thread.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            chord_mode: self.chord_mode(),
            retrigger: self.retrigger(),
            range: self.range(),
            arp_enabled: self.arp_enabled(),
            arp_rate: self.arp_rate(),
            arp_seed: self.arp_seed(),
        }
    }

    pub fn chord_mode(&self) -> bool {
        self.chord_mode.load(Ordering::Relaxed)
    }

    pub fn set_chord_mode(&self, on: bool) {
        log::debug!("chord mode -> {on}");
        self.chord_mode.store(on, Ordering::Relaxed);
    }

    pub fn retrigger(&self) -> RetriggerMode {
        retrigger_from_u8(self.retrigger.load(Ordering::Relaxed))
    }

    pub fn set_retrigger(&self, mode: RetriggerMode) {
        log::debug!("retrigger mode -> {}", mode.name());
        self.retrigger.store(retrigger_to_u8(mode), Ordering::Relaxed);
    }

    pub fn range(&self) -> RangeBounds {
        RangeBounds::unpack(self.range.load(Ordering::Acquire))
    }

    /// Move the low bound; the high bound follows if the span would drop
    /// under an octave.
    pub fn set_low_note(&self, note: u8) {
        self.update_range(|r| r.set_low(note));
    }

    /// Move the high bound; the low bound follows if the span would drop
    /// under an octave.
    pub fn set_high_note(&self, note: u8) {
        self.update_range(|r| r.set_high(note));
    }

    fn update_range(&self, f: impl Fn(&mut RangeBounds)) {
        let mut current = self.range.load(Ordering::Acquire);
        loop {
            let before = RangeBounds::unpack(current);
            let mut next = before;
            f(&mut next);
            match self.range.compare_exchange_weak(
                current,
                next.pack(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    if before.low() != next.low() && before.high() != next.high() {
                        log::debug!(
                            "range {}..{} -> {}..{} (bound pushed)",
                            before.low(),
                            before.high(),
                            next.low(),
                            next.high()
                        );
                    }
                    return;
                }
                Err(actual) => current = actual,
            }
        }
    }

    pub fn arp_enabled(&self) -> bool {
        self.arp_enabled.load(Ordering::Relaxed)
    }

    pub fn set_arp_enabled(&self, on: bool) {
        log::debug!("arpeggiator -> {on}");
        self.arp_enabled.store(on, Ordering::Relaxed);
    }

    pub fn arp_rate(&self) -> ArpRate {
        ArpRate::from_index(self.arp_rate.load(Ordering::Relaxed) as i32)
    }

    pub fn set_arp_rate(&self, rate: ArpRate) {
        log::debug!("arp rate -> {}", rate.name());
        self.arp_rate.store(rate.index(), Ordering::Relaxed);
    }

    pub fn arp_seed(&self) -> u64 {
        self.arp_seed.load(Ordering::Relaxed)
    }

    pub fn set_arp_seed(&self, seed: u64) {
        log::debug!("arp seed -> {seed}");
        self.arp_seed.store(seed, Ordering::Relaxed);
    }
}

impl Default for EngineParams {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

fn retrigger_to_u8(mode: RetriggerMode) -> u8 {
    match mode {
        RetriggerMode::Smart => 0,
        RetriggerMode::Full => 1,
    }
}

fn retrigger_from_u8(v: u8) -> RetriggerMode {
    match v {
        1 => RetriggerMode::Full,
        _ => RetriggerMode::Smart,
    }
}

/// What the engine is doing, published at the end of every block.
#[derive(Debug)]
pub struct EngineStatus {
    active_root: AtomicU8,
    modifiers: AtomicU8,
    arp_note: AtomicU8,
    dropped_events: AtomicU64,
}

impl EngineStatus {
    pub fn new() -> Self {
        Self {
            active_root: AtomicU8::new(NO_NOTE),
            modifiers: AtomicU8::new(0),
            arp_note: AtomicU8::new(NO_NOTE),
            dropped_events: AtomicU64::new(0),
        }
    }

    pub(crate) fn publish(
        &self,
        active_root: Option<u8>,
        modifiers: ModifierState,
        arp_note: Option<u8>,
        dropped_events: u64,
    ) {
        self.active_root
            .store(active_root.unwrap_or(NO_NOTE), Ordering::Relaxed);
        self.modifiers.store(modifiers.bits(), Ordering::Relaxed);
        self.arp_note
            .store(arp_note.unwrap_or(NO_NOTE), Ordering::Relaxed);
        self.dropped_events.store(dropped_events, Ordering::Relaxed);
    }

    /// Trigger key whose chord is active.
    pub fn active_root(&self) -> Option<u8> {
        note_from_u8(self.active_root.load(Ordering::Relaxed))
    }

    pub fn modifiers(&self) -> ModifierState {
        ModifierState::from_bits(self.modifiers.load(Ordering::Relaxed))
    }

    /// Note the arpeggiator is currently sounding.
    pub fn arp_note(&self) -> Option<u8> {
        note_from_u8(self.arp_note.load(Ordering::Relaxed))
    }

    /// Visualization events lost because the display fell behind.
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events.load(Ordering::Relaxed)
    }
}

impl Default for EngineStatus {
    fn default() -> Self {
        Self::new()
    }
}

fn note_from_u8(v: u8) -> Option<u8> {
    (v != NO_NOTE).then_some(v)
}
