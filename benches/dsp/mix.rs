//! Benchmarks for saturating summing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use slapback::dsp::mix;

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        // Loud enough that roughly half the sums clip
        let signal_a: Vec<f64> = (0..size).map(|i| (i as f64 * 0.1).sin() * 0.8).collect();
        let signal_b: Vec<f64> = (0..size).map(|i| (i as f64 * 0.15).cos() * 0.8).collect();

        let mut buffer_a = signal_a.clone();
        group.bench_with_input(BenchmarkId::new("sum_in_place", size), &size, |b, _| {
            b.iter(|| {
                buffer_a.copy_from_slice(&signal_a);
                mix::sum_in_place(black_box(&mut buffer_a), black_box(&signal_b));
            })
        });
    }

    group.finish();
}
