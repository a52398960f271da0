//! The slapback effect built from the [`crate::dsp`] primitives.
//!
//! A [`ControlPanel`] describes the configuration, one [`ChannelPipeline`]
//! per output channel implements the cascaded echo, and [`SlapbackEngine`]
//! owns both and drives them over host sample blocks.

/// Block processor, routing policy and lifecycle.
pub mod engine;
/// Effect configuration and switch clamping.
pub mod panel;
/// Cascaded two-tap echo for a single channel.
pub mod pipeline;

pub use engine::{EngineState, SlapbackEngine};
pub use panel::{ControlPanel, MAX_SWITCH_STATE};
pub use pipeline::{delay_samples_a, delay_samples_b, ms_to_samples, ChannelPipeline};
