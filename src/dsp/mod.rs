//! Low-level DSP primitives used by the slapback effect.
//!
//! These components are allocation-free after construction and realtime-safe,
//! so they can live directly inside the per-channel pipelines. They stay
//! focused on the signal-processing math; routing and configuration live in
//! [`crate::fx`].

/// Circular sample delay with constant read/write distance.
pub mod delay;
/// Fixed attenuation constants and gain helpers.
pub mod gain;
/// Saturating two-operand summing.
pub mod mix;

pub use delay::DelayLine;
pub use mix::sum;
