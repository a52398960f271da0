//! Benchmarks for a single cascaded-tap channel.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use slapback::ChannelPipeline;

use crate::BLOCK_SIZES;

pub fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/pipeline");

    for &size in BLOCK_SIZES {
        let input: Vec<f64> = (0..size).map(|i| (i as f64 * 0.1).sin() * 0.5).collect();

        for delay_enabled in [true, false] {
            let mut pipeline = ChannelPipeline::new();
            pipeline.configure(3);
            let name = if delay_enabled { "delayed" } else { "delay_bypassed" };
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    let mut acc = 0.0f64;
                    for &x in &input {
                        acc += pipeline.process(black_box(x), delay_enabled);
                    }
                    acc
                })
            });
        }
    }

    group.finish();
}
