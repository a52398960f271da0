//! Real-world scenario benchmarks.
//!
//! These drive the engine the way a host does: one shared six-row table,
//! refilled and processed once per block.

mod engine;

pub use engine::bench_engine;
