//! Engine defaults, optionally loaded from TOML.
//!
//! ```toml
//! chord_mode = true
//! retrigger = "smart"   # or "full"
//! low_note = 48
//! high_note = 84
//! arp_enabled = false
//! arp_rate = 2          # 0 = 1/2 ... 5 = 1/64
//! arp_seed = 12345
//! ```
//!
//! Missing keys keep their defaults.

use crate::{
    arp::rate::ArpRate,
    chord::{ledger::RetriggerMode, range::RangeBounds},
    engine::max_output_events,
    error::ConfigError,
    MAX_BLOCK_SIZE,
};

/// Input events per block the default output capacity is sized for.
const DEFAULT_INPUT_EVENTS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct EngineConfig {
    pub chord_mode: bool,
    pub retrigger: RetriggerMode,
    pub low_note: u8,
    pub high_note: u8,
    pub arp_enabled: bool,
    /// Rate index, see `ArpRate`
    pub arp_rate: u8,
    pub arp_seed: u64,
    /// Visualization events buffered between display refreshes
    pub relay_capacity: usize,
    /// MIDI events reserved per output block. The default covers 16 input
    /// events in a `MAX_BLOCK_SIZE` block (see `max_output_events`); denser
    /// blocks grow the buffer on the block thread.
    pub output_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chord_mode: true,
            retrigger: RetriggerMode::Smart,
            low_note: RangeBounds::DEFAULT.low(),
            high_note: RangeBounds::DEFAULT.high(),
            arp_enabled: false,
            arp_rate: ArpRate::EIGHTH.index(),
            arp_seed: 12345,
            relay_capacity: 256,
            output_capacity: max_output_events(DEFAULT_INPUT_EVENTS, MAX_BLOCK_SIZE),
        }
    }
}

impl EngineConfig {
    /// Reject values that cannot be clamped into something usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.relay_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "relay_capacity",
                reason: "must be at least 1",
            });
        }
        if self.output_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "output_capacity",
                reason: "must be at least 1",
            });
        }
        if self.low_note > 127 || self.high_note > 127 {
            return Err(ConfigError::Invalid {
                field: "low_note/high_note",
                reason: "MIDI notes stop at 127",
            });
        }
        if self.arp_rate > ArpRate::MAX_INDEX {
            return Err(ConfigError::Invalid {
                field: "arp_rate",
                reason: "rate index must be 0..=5",
            });
        }
        Ok(())
    }

    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!(target: "config", "loaded engine config from {}", path.display());
        Ok(config)
    }
}
