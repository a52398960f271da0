//! Offline rendering: WAV in, processed WAV out.

use std::path::Path;

use color_eyre::eyre::{bail, Result as EyreResult, WrapErr};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{info, warn};
use slapback::{ChannelTable, ControlPanel, SampleTable, SlapbackEngine, SAMPLE_RATE};

use crate::BLOCK_SIZE;

pub fn run(input: &Path, output: &Path, panel: ControlPanel) -> EyreResult<()> {
    let mut reader = WavReader::open(input)
        .wrap_err_with(|| format!("failed to open {}", input.display()))?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        bail!("{} has no channels", input.display());
    }
    if spec.sample_rate != SAMPLE_RATE {
        warn!(
            "{} is {} Hz; delay times assume {} Hz",
            input.display(),
            spec.sample_rate,
            SAMPLE_RATE
        );
    }

    let samples = read_normalized(&mut reader)?;
    let frames = samples.len() / channels;
    info!(
        "rendering {} frames ({} ch, {} Hz) from {}",
        frames,
        channels,
        spec.sample_rate,
        input.display()
    );

    let mut engine = SlapbackEngine::with_panel(panel);
    let out_channels = engine.valid_channels().count();
    let out_spec = WavSpec {
        channels: out_channels as u16,
        sample_rate: spec.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(output, out_spec)
        .wrap_err_with(|| format!("failed to create {}", output.display()))?;

    let rendered = render_interleaved(&mut engine, &samples, channels);
    for &sample in &rendered {
        writer.write_sample(sample)?;
    }

    writer.finalize().wrap_err("failed to finalize output WAV")?;
    info!(
        "wrote {} ({} channels, {} frames including echo tail)",
        output.display(),
        out_channels,
        rendered.len() / out_channels
    );
    Ok(())
}

/// Run interleaved `samples` through `engine`, then keep feeding silence
/// until the longest echo has played out.
///
/// Returns interleaved frames carrying one sample per valid output channel.
fn render_interleaved(engine: &mut SlapbackEngine, samples: &[f64], channels: usize) -> Vec<f32> {
    let frames = samples.len() / channels;
    let total = frames + echo_tail(engine);
    let out_channels = engine.valid_channels().count();

    let mut rendered = Vec::with_capacity(total * out_channels);
    let mut table = SampleTable::new(BLOCK_SIZE);
    for start in (0..total).step_by(BLOCK_SIZE) {
        let len = BLOCK_SIZE.min(total - start);

        load_block(&mut table, samples.chunks_exact(channels).skip(start).take(len));
        engine.process_block(&mut table);

        for i in 0..len {
            for ch in 0..out_channels {
                rendered.push(table.channel(ch)[i] as f32);
            }
        }
    }
    rendered
}

/// Clear `table` and spread `frames` over its two input rows. Mono frames
/// feed both rows; extra channels beyond the second are ignored.
fn load_block<'a>(table: &mut SampleTable, frames: impl Iterator<Item = &'a [f64]>) {
    table.clear();
    for (i, frame) in frames.enumerate() {
        table.channel_mut(0)[i] = frame[0];
        table.channel_mut(1)[i] = frame[frame.len().min(2) - 1];
    }
}

/// Silence needed after the input for every valid channel to ring out.
fn echo_tail(engine: &SlapbackEngine) -> usize {
    let panel = engine.panel();
    if !panel.enabled || !panel.delay_enabled {
        return 0;
    }
    engine
        .valid_channels()
        .channels()
        .map(|ch| engine.pipeline(ch).echo_tail())
        .max()
        .unwrap_or(0)
}

/// Read every sample as f64 in [-1.0, 1.0].
fn read_normalized<R: std::io::Read>(reader: &mut WavReader<R>) -> EyreResult<Vec<f64>> {
    let spec = reader.spec();
    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = 1.0 / (1_i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 * scale))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}
