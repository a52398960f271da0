//! Benchmarks for delay line operations.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use slapback::dsp::delay::DelayLine;

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Every length the switch can select (in samples at 48kHz)
    let delay_times: &[usize] = &[
        144,  // 3ms, shortest fine tap
        480,  // 10ms
        1440, // 30ms, longest coarse tap
    ];

    for &size in BLOCK_SIZES {
        let input: Vec<f64> = (0..size).map(|i| (i as f64 * 0.1).sin()).collect();

        for &delay_samples in delay_times {
            let mut delay = DelayLine::new();
            delay.configure(delay_samples);
            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("render_{}", delay_samples), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.copy_from_slice(&input);
                        delay.render(black_box(&mut buffer));
                    })
                },
            );
        }

        // Bypassed: should cost no more than a copy
        let mut delay = DelayLine::new();
        delay.configure(480);
        group.bench_with_input(BenchmarkId::new("bypassed", size), &size, |b, _| {
            b.iter(|| {
                let mut acc = 0.0f64;
                for &sample in &input {
                    acc += delay.process(black_box(sample), black_box(false));
                }
                acc
            })
        });
    }

    group.finish();
}
