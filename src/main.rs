mod config;
mod script;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{BoardConfig, ConfigError};
use crate::script::{Replay, ReplayError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid script: {0}")]
    Script(#[source] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("failed to encode layout: {0}")]
    Output(#[source] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "widgetboard", about = "Replay pointer scripts against a widget dashboard")]
struct Cli {
    /// JSON array of steps to replay.
    script: PathBuf,

    /// Container width in pixels.
    #[arg(long, env = "WIDGETBOARD_WIDTH", default_value_t = config::DEFAULT_CONTAINER_WIDTH_PX)]
    width: f64,

    /// Container height in pixels.
    #[arg(long, env = "WIDGETBOARD_HEIGHT", default_value_t = config::DEFAULT_CONTAINER_HEIGHT_PX)]
    height: f64,

    /// Minimum widget width and height, percent of the container.
    #[arg(long, env = "WIDGETBOARD_MIN_BOX_SIZE", default_value_t = dashboard::consts::MIN_BOX_SIZE_PCT)]
    min_box_size: f64,

    /// Distance from a container edge that snaps a resize to it, percent.
    #[arg(long, env = "WIDGETBOARD_SNAP_TO_END", default_value_t = dashboard::consts::SNAP_TO_END_PCT)]
    snap_to_end: f64,

    /// Include the widget catalog with placement flags.
    #[arg(long)]
    catalog: bool,

    #[arg(long)]
    pretty: bool,

    /// Log per-move updates.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "replay failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = BoardConfig::new(cli.width, cli.height, cli.min_box_size, cli.snap_to_end)?;
    let text = std::fs::read_to_string(&cli.script).map_err(|source| CliError::Io { path: cli.script.clone(), source })?;
    let steps = script::parse(&text).map_err(CliError::Script)?;
    tracing::info!(steps = steps.len(), path = %cli.script.display(), "replaying script");

    let mut replay = Replay::new(config);
    replay.run(&steps)?;

    tracing::info!(widgets = replay.core().widgets().len(), "replay finished");

    let report = replay.report(cli.catalog);
    let encoded = if cli.pretty { serde_json::to_string_pretty(&report) } else { serde_json::to_string(&report) };
    let json = encoded.map_err(CliError::Output)?;
    println!("{json}");
    Ok(())
}
