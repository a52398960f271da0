//! slapback - run the six-channel slapback effect on files or live audio
//!
//! Usage:
//!   slapback render <in.wav> <out.wav> [--config <panel.toml>]
//!   slapback live [--config <panel.toml>]

mod live;
mod render;

use std::path::PathBuf;

use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};
use log::info;
use slapback::{fx::pipeline, ControlPanel, MAX_CHANNELS};

const USAGE: &str = "usage:
  slapback render <in.wav> <out.wav> [--config <panel.toml>]
  slapback live [--config <panel.toml>]";

/// Samples per processing block for both commands.
pub const BLOCK_SIZE: usize = 256;

enum Command {
    Render { input: PathBuf, output: PathBuf },
    Live,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let mut positional = Vec::new();
    let mut config_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().ok_or_else(|| eyre!("--config needs a path\n{USAGE}"))?;
                config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ => positional.push(arg),
        }
    }

    let command = match positional.as_slice() {
        [cmd, input, output] if cmd == "render" => Command::Render {
            input: input.into(),
            output: output.into(),
        },
        [cmd] if cmd == "live" => Command::Live,
        _ => bail!("{USAGE}"),
    };

    let panel = match &config_path {
        Some(path) => ControlPanel::load(path)
            .wrap_err_with(|| format!("failed to load {}", path.display()))?,
        None => ControlPanel::default(),
    };
    log_panel(&panel);

    match command {
        Command::Render { input, output } => render::run(&input, &output, panel),
        Command::Live => live::run(panel),
    }
}

fn log_panel(panel: &ControlPanel) {
    let panel = panel.clamped();
    info!(
        "enabled={} mute={} upmix={} delay={}",
        panel.enabled, panel.mute, panel.upmix, panel.delay_enabled
    );
    for ch in 0..MAX_CHANNELS {
        let n = panel.switch_state[ch];
        info!(
            "  ch{}: switch {} -> tap A {} samples, tap B {} samples",
            ch,
            n,
            pipeline::delay_samples_a(n),
            pipeline::delay_samples_b(n)
        );
    }
}
