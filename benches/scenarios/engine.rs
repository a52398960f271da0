//! Benchmarks for whole-engine block processing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use slapback::{ChannelTable, ControlPanel, SampleTable, SlapbackEngine};

use crate::BLOCK_SIZES;

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    for &size in BLOCK_SIZES {
        let left: Vec<f64> = (0..size).map(|i| (i as f64 * 0.05).sin() * 0.5).collect();
        let right: Vec<f64> = (0..size).map(|i| (i as f64 * 0.07).cos() * 0.5).collect();

        let scenes = [
            ("stereo", ControlPanel { upmix: false, ..ControlPanel::default() }),
            ("upmix", ControlPanel::default()),
            ("muted_upmix", ControlPanel { mute: true, ..ControlPanel::default() }),
        ];

        for (name, panel) in scenes {
            let mut engine = SlapbackEngine::with_panel(panel.with_switches([0, 1, 2, 3, 1, 2]));
            let mut table = SampleTable::new(size);

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    table.channel_mut(0).copy_from_slice(&left);
                    table.channel_mut(1).copy_from_slice(&right);
                    engine.process_block(black_box(&mut table))
                })
            });
        }
    }

    group.finish();
}
