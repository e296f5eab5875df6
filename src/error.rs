use std::path::PathBuf;

/// Errors raised while loading or validating an engine configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config text is not valid TOML for `EngineConfig`
    #[cfg(feature = "serde")]
    Parse(toml::de::Error),
    /// A value parsed but cannot be used
    Invalid { field: &'static str, reason: &'static str },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Could not read config {}: {}", path.display(), source)
            }
            #[cfg(feature = "serde")]
            ConfigError::Parse(err) => write!(f, "Malformed config: {}", err),
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid config value for `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            #[cfg(feature = "serde")]
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid { .. } => None,
        }
    }
}

#[cfg(feature = "serde")]
impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}
