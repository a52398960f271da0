pub mod control; // Configuration ingress and live control messages
pub mod dsp;
pub mod fx; // Slapback effect: panel, channel pipelines, engine
pub mod io;

pub use control::message::{ControlMessage, ControlReceiver};
pub use fx::{ChannelPipeline, ControlPanel, EngineState, SlapbackEngine};
pub use io::{ChannelMask, ChannelTable, SampleTable};

/// Fixed processing rate. Delay times in milliseconds are converted with it.
pub const SAMPLE_RATE: u32 = 48_000;
/// Output channels the engine can populate.
pub const MAX_CHANNELS: usize = 6;
/// Capacity of every delay line, in samples.
pub const DELAY_CAPACITY: usize = 2048;
