//! How configuration reaches the engine.
//!
//! A [`ControlPanel`](crate::ControlPanel) can be loaded from TOML (feature
//! `serde`) and applied with `initialize`, or changed while audio is running
//! by sending [`ControlMessage`]s through a [`ControlReceiver`] that the audio
//! thread drains between blocks.

#[cfg(feature = "serde")]
pub mod config;
pub mod error;
pub mod message;

pub use error::ConfigError;
pub use message::{ControlMessage, ControlReceiver};
