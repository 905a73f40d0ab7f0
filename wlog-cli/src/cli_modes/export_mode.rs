use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use wlog_core::{Import, Wlog};

pub fn export_mode(
    cli: &Cli,
    renderer: &Renderer,
    wlog: &Wlog,
    import: &Import,
) -> Result<CliModeResult> {
    if !cli.export {
        return Ok(CliModeResult::NothingToDo);
    }
    if import.is_empty() {
        renderer.print_info("No records to export.");
        return Ok(CliModeResult::Finish);
    }
    let paths = wlog.export(import, cli.out_dir.as_deref(), cli.export_format())?;
    renderer.print_paths("Exported:", &paths);
    Ok(CliModeResult::Finish)
}
