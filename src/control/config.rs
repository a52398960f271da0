//! TOML configuration for the control panel.
//!
//! ```toml
//! enabled = true
//! mute = false
//! upmix = true
//! delay_enabled = true
//! switch_state = [1, 1, 0, 0, 3, 3]
//! ```
//!
//! Missing keys fall back to [`ControlPanel::default`].

use std::path::Path;

use log::{debug, warn};

use crate::{
    control::error::{ConfigError, Result},
    fx::panel::{ControlPanel, MAX_SWITCH_STATE},
};

impl ControlPanel {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let panel: ControlPanel = toml::from_str(source)?;

        for (ch, state) in panel.out_of_range_switches() {
            warn!(
                "switch {} on channel {} is out of range, will be clamped to {}",
                state, ch, MAX_SWITCH_STATE
            );
        }
        debug!("loaded control panel: {:?}", panel);

        Ok(panel)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
