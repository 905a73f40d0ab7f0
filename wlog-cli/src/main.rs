mod cli;
mod cli_modes;
mod render;

use anyhow::Result;
use cli::Cli;
use cli_modes::{CliModeResult, export_mode, load_import, path_mode, read_mode};
use render::{RenderOptions, Renderer};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wlog_core::Wlog;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("wlog: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::new();
    setup_logging(&cli.log_level);

    let wlog = Wlog::new()?;
    let renderer = Renderer::new(Some(RenderOptions {
        use_color: cli.color.use_color(),
        style: cli.style,
    }));

    if let CliModeResult::Finish = path_mode(&cli, &renderer, &wlog)? {
        return Ok(());
    }

    let import = load_import(&cli, &wlog)?;
    read_mode(&cli, &renderer, &wlog, &import)?;
    export_mode(&cli, &renderer, &wlog, &import)?;
    Ok(())
}

/// Diagnostics go to stderr so they never mix with the printed records.
fn setup_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
