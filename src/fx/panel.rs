use crate::MAX_CHANNELS;

/// Highest accepted per-channel switch position.
pub const MAX_SWITCH_STATE: u32 = 3;

/// Effect configuration, copied into the engine on every initialization.
///
/// `switch_state[c]` picks both delay lengths of output channel `c`; values
/// above [`MAX_SWITCH_STATE`] are clamped when the engine is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlPanel {
    /// Global effect on/off. Off leaves host buffers and delay state alone.
    pub enabled: bool,
    /// Zero the dry inputs before they reach any pipeline.
    pub mute: bool,
    /// Fan the two inputs out to six outputs instead of two.
    pub upmix: bool,
    /// Route around both delay lines of every pipeline (state is frozen).
    pub delay_enabled: bool,
    pub switch_state: [u32; MAX_CHANNELS],
}

impl ControlPanel {
    /// All flags off, every switch at 0. What an uninitialized engine holds.
    pub const fn bypassed() -> Self {
        Self {
            enabled: false,
            mute: false,
            upmix: false,
            delay_enabled: false,
            switch_state: [0; MAX_CHANNELS],
        }
    }

    /// Copy with every switch position limited to [`MAX_SWITCH_STATE`].
    pub fn clamped(mut self) -> Self {
        for state in &mut self.switch_state {
            *state = (*state).min(MAX_SWITCH_STATE);
        }
        self
    }

    /// Builder-style switch setter.
    pub fn with_switches(mut self, switch_state: [u32; MAX_CHANNELS]) -> Self {
        self.switch_state = switch_state;
        self
    }

    /// Channels whose switch position is out of range.
    pub fn out_of_range_switches(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.switch_state
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, state)| state > MAX_SWITCH_STATE)
    }
}

/// Factory preset: effect on, unmuted, upmix on, delay on, all switches 0.
impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            enabled: true,
            mute: false,
            upmix: true,
            delay_enabled: true,
            switch_state: [0; MAX_CHANNELS],
        }
    }
}
