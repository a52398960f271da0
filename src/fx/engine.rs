use crate::{
    control::message::{ControlMessage, ControlReceiver},
    fx::{panel::ControlPanel, pipeline::ChannelPipeline},
    io::{ChannelMask, ChannelTable},
    MAX_CHANNELS,
};

/// Input channel feeding each output pipeline in upmix mode.
const UPMIX_SOURCE: [usize; MAX_CHANNELS] = [0, 1, 0, 1, 0, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No `initialize` yet; blocks pass through untouched.
    Uninitialized,
    Configured,
}

/// Six-channel slapback processor.
///
/// Owns the active [`ControlPanel`] and one [`ChannelPipeline`] per output
/// channel. All delay memory is allocated in [`SlapbackEngine::new`];
/// initialization and block processing never allocate, lock or log.
pub struct SlapbackEngine {
    panel: ControlPanel,
    pipelines: [ChannelPipeline; MAX_CHANNELS],
    state: EngineState,
}

impl SlapbackEngine {
    pub fn new() -> Self {
        Self {
            panel: ControlPanel::bypassed(),
            pipelines: std::array::from_fn(|_| ChannelPipeline::new()),
            state: EngineState::Uninitialized,
        }
    }

    /// Shorthand for `new` followed by `initialize`.
    pub fn with_panel(panel: ControlPanel) -> Self {
        let mut engine = Self::new();
        engine.initialize(panel);
        engine
    }

    /// Store a clamped copy of `panel` and reset every pipeline to silence
    /// with the delay lengths its switch selects.
    pub fn initialize(&mut self, panel: ControlPanel) {
        self.panel = panel.clamped();
        for (pipeline, &switch_state) in self.pipelines.iter_mut().zip(&self.panel.switch_state) {
            pipeline.configure(switch_state);
        }
        self.state = EngineState::Configured;
    }

    /// Re-run initialization with the stored panel.
    pub fn reset(&mut self) {
        self.initialize(self.panel);
    }

    /// Process one block of `table` in place and report the valid channels.
    ///
    /// Disabled (or never initialized) engines return immediately without
    /// touching the table or any delay line. An output row shorter than the
    /// block limits how many samples are processed.
    pub fn process_block<T>(&mut self, table: &mut T) -> ChannelMask
    where
        T: ChannelTable + ?Sized,
    {
        if self.state == EngineState::Uninitialized || !self.panel.enabled {
            return self.valid_channels();
        }

        let ControlPanel {
            mute,
            upmix,
            delay_enabled,
            ..
        } = self.panel;
        let active = if upmix { MAX_CHANNELS } else { 2 };
        let frames = (0..active)
            .map(|ch| table.channel(ch).len())
            .fold(table.block_size(), usize::min);

        for i in 0..frames {
            let mut dry = [table.channel(0)[i], table.channel(1)[i]];
            if mute {
                dry = [0.0; 2];
            }

            for (ch, pipeline) in self.pipelines[..active].iter_mut().enumerate() {
                let x = dry[UPMIX_SOURCE[ch]];
                table.channel_mut(ch)[i] = pipeline.process(x, delay_enabled);
            }
        }

        self.valid_channels()
    }

    /// Channels 0-1 always, plus 2-5 when upmixing.
    pub fn valid_channels(&self) -> ChannelMask {
        ChannelMask::for_upmix(self.panel.upmix)
    }

    /// Flip the global enable without touching delay state.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.panel.enabled = enabled;
    }

    pub fn set_mute(&mut self, mute: bool) {
        self.panel.mute = mute;
    }

    /// Switch between stereo and six-channel routing.
    ///
    /// Pipelines 2-5 are not reset either way. While upmix is off they stand
    /// still, so turning it back on replays whatever they held before, until
    /// the next `initialize` or `reset`.
    pub fn set_upmix(&mut self, upmix: bool) {
        self.panel.upmix = upmix;
    }

    /// Bypass or resume every delay line. Bypassed lines keep their content.
    pub fn set_delay_enabled(&mut self, delay_enabled: bool) {
        self.panel.delay_enabled = delay_enabled;
    }

    /// Apply one control message. Only `Initialize` and `Reset` clear delays.
    pub fn apply(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::Initialize(panel) => self.initialize(panel),
            ControlMessage::Reset => self.reset(),
            ControlMessage::SetEnabled(on) => self.set_enabled(on),
            ControlMessage::SetMute(on) => self.set_mute(on),
            ControlMessage::SetUpmix(on) => self.set_upmix(on),
            ControlMessage::SetDelayEnabled(on) => self.set_delay_enabled(on),
        }
    }

    /// Drain pending control messages in arrival order. Call between blocks.
    pub fn poll_control<R>(&mut self, rx: &mut R) -> usize
    where
        R: ControlReceiver + ?Sized,
    {
        let mut applied = 0;
        while let Some(message) = rx.pop() {
            self.apply(message);
            applied += 1;
        }
        applied
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn pipeline(&self, ch: usize) -> &ChannelPipeline {
        &self.pipelines[ch]
    }
}

impl Default for SlapbackEngine {
    fn default() -> Self {
        Self::new()
    }
}
