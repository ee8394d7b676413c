//! timberfall - first-person tree felling simulation
//!
//! Main executable: runs a session headlessly, optionally driven by a
//! scripted input file, and reports what happened.

mod config;
mod headless;
mod scripted_input;

use anyhow::Result;
use config::GameConfig;
use headless::HeadlessConfig;
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting timberfall v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    if cli.help {
        print_help();
        return Ok(());
    }

    let mut config = match cli.config.as_deref() {
        Some(path) => GameConfig::load_from_path(path),
        None => GameConfig::load(),
    };
    if let Some(seed) = cli.world_seed {
        config.world_seed = Some(seed);
    }
    if let Some(path) = cli.save_config.as_deref() {
        config.save_to_path(path)?;
        info!(path = %path.display(), "wrote config");
    }
    let settings = config.session_settings()?;

    let metrics = headless::run(HeadlessConfig {
        settings,
        scripted_input: cli.scripted_input,
        max_ticks: cli.max_ticks.unwrap_or(headless::DEFAULT_MAX_TICKS),
        exit_when_script_finished: cli.exit_when_script_finished,
        event_log: cli.event_log,
        metrics_out: cli.metrics_out,
        width: cli.resolution.0,
        height: cli.resolution.1,
    })?;

    println!(
        "seed {}: {} frames, {} strikes ({} hits), {} trees felled, {} resources, {}/{} trees left",
        metrics.world_seed,
        metrics.frames,
        metrics.strikes,
        metrics.hits,
        metrics.felled,
        metrics.resources,
        metrics.trees_remaining,
        metrics.trees_placed,
    );
    Ok(())
}

fn print_help() {
    println!(
        "\
usage: timberfall [options]

  --config <path>              TOML config (default {})
  --save-config <path>         write the resolved config and continue
  --world-seed <u64>           override the world seed
  --max-ticks <n>              frames to run (default {})
  --scripted-input <path>      JSON input script
  --exit-when-script-finished  stop once the script's last step has run
  --event-log <path>           JSONL event log
  --metrics-out <path>         JSON run summary
  --resolution <w>x<h>         viewport size (default 1280x720)",
        config::DEFAULT_CONFIG_PATH,
        headless::DEFAULT_MAX_TICKS,
    );
}

#[derive(Debug, Default)]
struct CliOptions {
    help: bool,
    config: Option<PathBuf>,
    save_config: Option<PathBuf>,
    world_seed: Option<u64>,
    max_ticks: Option<u64>,
    scripted_input: Option<PathBuf>,
    exit_when_script_finished: bool,
    event_log: Option<PathBuf>,
    metrics_out: Option<PathBuf>,
    resolution: (u32, u32),
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            resolution: (1280, 720),
            ..CliOptions::default()
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => opts.help = true,
                "--config" => opts.config = path_arg(&mut args, "--config"),
                "--save-config" => opts.save_config = path_arg(&mut args, "--save-config"),
                "--world-seed" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.world_seed = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--world-seed must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--world-seed requires an integer");
                    }
                }
                "--max-ticks" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.max_ticks = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--max-ticks must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--max-ticks requires an integer");
                    }
                }
                "--scripted-input" => {
                    opts.scripted_input = path_arg(&mut args, "--scripted-input")
                }
                "--exit-when-script-finished" => opts.exit_when_script_finished = true,
                "--event-log" => opts.event_log = path_arg(&mut args, "--event-log"),
                "--metrics-out" => opts.metrics_out = path_arg(&mut args, "--metrics-out"),
                "--resolution" => {
                    if let Some(raw) = args.next() {
                        match parse_resolution(&raw) {
                            Some(res) => opts.resolution = res,
                            None => {
                                tracing::error!(value = %raw, "--resolution expects WIDTHxHEIGHT")
                            }
                        }
                    } else {
                        tracing::error!("--resolution requires WIDTHxHEIGHT");
                    }
                }
                other => tracing::warn!(arg = %other, "Ignoring unknown argument"),
            }
        }

        opts
    }
}

fn path_arg<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Option<PathBuf> {
    let path = args.next().map(PathBuf::from);
    if path.is_none() {
        tracing::error!("{flag} requires a path");
    }
    path
}

fn parse_resolution(raw: &str) -> Option<(u32, u32)> {
    let (w, h) = raw.split_once(['x', 'X'])?;
    let width = w.trim().parse::<u32>().ok()?;
    let height = h.trim().parse::<u32>().ok()?;
    (width > 0 && height > 0).then_some((width, height))
}
