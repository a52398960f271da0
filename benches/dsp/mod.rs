//! Benchmarks for low-level DSP primitives.

mod delay;
mod mix;
mod pipeline;

pub use delay::bench_delay;
pub use mix::bench_mix;
pub use pipeline::bench_pipeline;
