// Purpose - host-facing sample storage and output-channel signalling

pub mod mask;
pub mod table;

pub use mask::ChannelMask;
pub use table::{ChannelTable, SampleTable};
