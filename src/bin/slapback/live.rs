//! Live passthrough: default input → engine → default output.
//!
//! Input frames cross to the output callback through a lock-free ring, and
//! stdin commands reach the engine as control messages on a second ring.

use std::io::BufRead;

use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use log::{error, info, warn};
use rtrb::{Consumer, RingBuffer};
use slapback::{
    ChannelMask, ChannelTable, ControlMessage, ControlPanel, SampleTable, SlapbackEngine,
    MAX_CHANNELS, SAMPLE_RATE,
};

use crate::BLOCK_SIZE;

/// Stereo samples buffered between the two callbacks.
const INPUT_RING_SIZE: usize = BLOCK_SIZE * 16;
const CONTROL_RING_SIZE: usize = 64;

pub fn run(panel: ControlPanel) -> EyreResult<()> {
    let host = cpal::default_host();
    let input_device = host
        .default_input_device()
        .ok_or_else(|| eyre!("no default input device available"))?;
    let output_device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let in_config = input_device
        .default_input_config()
        .wrap_err("failed to fetch default input config")?;
    let out_config = output_device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    if in_config.sample_format() != SampleFormat::F32
        || out_config.sample_format() != SampleFormat::F32
    {
        bail!("only f32 devices are supported");
    }

    let in_channels = in_config.channels() as usize;
    let out_channels = out_config.channels() as usize;
    let sample_rate = out_config.sample_rate().0;
    if sample_rate != SAMPLE_RATE {
        warn!("device runs at {} Hz; delay times assume {} Hz", sample_rate, SAMPLE_RATE);
    }
    info!(
        "input: {} ch, output: {} ch @ {} Hz, block {}",
        in_channels, out_channels, sample_rate, BLOCK_SIZE
    );

    let (mut input_tx, input_rx) = RingBuffer::<f32>::new(INPUT_RING_SIZE);
    let (mut control_tx, control_rx) = RingBuffer::<ControlMessage>::new(CONTROL_RING_SIZE);
    let mut processor = LiveProcessor::new(SlapbackEngine::with_panel(panel), input_rx, control_rx);

    let input_stream = input_device.build_input_stream(
        &in_config.into(),
        move |data: &[f32], _| {
            for frame in data.chunks(in_channels) {
                let left = frame[0];
                let right = frame[in_channels.min(2) - 1];
                // Drop frames when the output side falls behind
                if input_tx.slots() >= 2 {
                    let _ = input_tx.push(left);
                    let _ = input_tx.push(right);
                }
            }
        },
        |err| error!("input stream error: {}", err),
        None,
    )?;

    let output_stream = output_device.build_output_stream(
        &out_config.into(),
        move |data: &mut [f32], _| processor.fill(data, out_channels),
        |err| error!("output stream error: {}", err),
        None,
    )?;

    input_stream.play()?;
    output_stream.play()?;

    println!("commands: on|off, mute on|off, upmix on|off, delay on|off,");
    println!("          switch <ch> <0-3>, reset, quit");

    let mut current = panel;
    for line in std::io::stdin().lock().lines() {
        let line = line.wrap_err("failed to read stdin")?;
        match parse_command(&line, &mut current) {
            Ok(Some(message)) => {
                info!("-> {:?}", message);
                if control_tx.push(message).is_err() {
                    warn!("control queue full, dropped {:?}", message);
                }
            }
            Ok(None) => break,
            Err(msg) => println!("{msg}"),
        }
    }

    info!("stopping");
    Ok(())
}

/// Output-callback side: pulls input, runs the engine one block at a time.
struct LiveProcessor {
    engine: SlapbackEngine,
    table: SampleTable,
    mask: ChannelMask,
    cursor: usize,
    input: Consumer<f32>,
    control: Consumer<ControlMessage>,
}

impl LiveProcessor {
    fn new(
        engine: SlapbackEngine,
        input: Consumer<f32>,
        control: Consumer<ControlMessage>,
    ) -> Self {
        let mask = engine.valid_channels();
        Self {
            engine,
            table: SampleTable::new(BLOCK_SIZE),
            mask,
            cursor: BLOCK_SIZE,
            input,
            control,
        }
    }

    fn fill(&mut self, data: &mut [f32], channels: usize) {
        for frame in data.chunks_mut(channels) {
            if self.cursor == BLOCK_SIZE {
                self.next_block();
            }
            for (ch, out) in frame.iter_mut().enumerate() {
                *out = if ch < MAX_CHANNELS && self.mask.contains(ch) {
                    self.table.channel(ch)[self.cursor] as f32
                } else {
                    0.0
                };
            }
            self.cursor += 1;
        }
    }

    fn next_block(&mut self) {
        self.engine.poll_control(&mut self.control);

        self.table.clear();
        for i in 0..BLOCK_SIZE {
            // Underruns become silence
            if self.input.slots() < 2 {
                break;
            }
            let left = self.input.pop().unwrap_or(0.0);
            let right = self.input.pop().unwrap_or(0.0);
            self.table.channel_mut(0)[i] = left as f64;
            self.table.channel_mut(1)[i] = right as f64;
        }

        self.mask = self.engine.process_block(&mut self.table);
        self.cursor = 0;
    }
}

/// Parse one stdin line. `Ok(None)` means quit.
fn parse_command(line: &str, panel: &mut ControlPanel) -> Result<Option<ControlMessage>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let flag = |word: &str| match word {
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(format!("expected on/off, got '{other}'")),
    };

    let message = match words.as_slice() {
        ["quit"] | ["q"] => return Ok(None),
        ["on"] => ControlMessage::SetEnabled(true),
        ["off"] => ControlMessage::SetEnabled(false),
        ["mute", v] => ControlMessage::SetMute(flag(*v)?),
        ["upmix", v] => ControlMessage::SetUpmix(flag(*v)?),
        ["delay", v] => ControlMessage::SetDelayEnabled(flag(*v)?),
        ["reset"] => ControlMessage::Reset,
        ["switch", ch, n] => {
            let ch: usize = ch.parse().map_err(|_| format!("bad channel '{ch}'"))?;
            let n: u32 = n.parse().map_err(|_| format!("bad switch position '{n}'"))?;
            if ch >= MAX_CHANNELS {
                return Err(format!("channel must be 0-{}", MAX_CHANNELS - 1));
            }
            panel.switch_state[ch] = n;
            ControlMessage::Initialize(*panel)
        }
        _ => return Err(format!("unknown command '{}'", line.trim())),
    };

    // Keep the local copy in sync so a later `switch` doesn't undo toggles
    match message {
        ControlMessage::SetEnabled(v) => panel.enabled = v,
        ControlMessage::SetMute(v) => panel.mute = v,
        ControlMessage::SetUpmix(v) => panel.upmix = v,
        ControlMessage::SetDelayEnabled(v) => panel.delay_enabled = v,
        ControlMessage::Initialize(_) | ControlMessage::Reset => {}
    }

    Ok(Some(message))
}
