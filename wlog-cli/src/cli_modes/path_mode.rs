use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use wlog_core::{Config, Wlog};

pub fn path_mode(cli: &Cli, renderer: &Renderer, wlog: &Wlog) -> Result<CliModeResult> {
    if !cli.path {
        return Ok(CliModeResult::NothingToDo);
    }
    renderer.print_paths("Config file candidates:", &Config::config_file_paths());
    renderer.print_paths("Export directory:", &[wlog.config.export_dir.clone()]);
    Ok(CliModeResult::Finish)
}
