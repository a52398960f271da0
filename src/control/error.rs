use std::path::PathBuf;

use thiserror::Error;

/// Result alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Failures while loading a [`ControlPanel`](crate::ControlPanel).
///
/// Out-of-range values are never errors; they are clamped on initialization.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "serde")]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
