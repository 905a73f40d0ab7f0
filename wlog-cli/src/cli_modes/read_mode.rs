use crate::{Cli, render::Renderer};
use anyhow::{Context, Result};
use tracing::debug;
use wlog_core::{
    DateFilter, Import, Wlog,
    records::{ENTRIES_SHEET, SUMMARY_SHEET},
};

/// Reads and parses the file named on the command line, applying any date filter.
pub fn load_import(cli: &Cli, wlog: &Wlog) -> Result<Import> {
    let path = cli.file.as_deref().context("No file selected.")?;
    let request = wlog.resolve_request(cli.client.as_deref(), cli.project.as_deref());
    debug!(client = %request.client, project = %request.project, "resolved request");
    let mut import = wlog.import_file(path, &request)?;

    if let Some(from) = cli.from.as_deref() {
        let filter = DateFilter::parse(from, cli.to.as_deref())?;
        let before = import.entries.len();
        import.filter_dates(filter);
        debug!(?filter, kept = import.entries.len(), before, "filtered by date");
    }
    Ok(import)
}

pub fn read_mode(cli: &Cli, renderer: &Renderer, wlog: &Wlog, import: &Import) -> Result<()> {
    if import.is_empty() {
        let source = import.source_name.as_deref().unwrap_or("the file");
        renderer.print_info(&format!("No compatible records found in {source}."));
        return Ok(());
    }

    renderer.print_info(&format!("{} records imported.", import.entries.len()));
    let book = import.workbook(wlog.config.min_column_width);
    let entries = book.sheet(ENTRIES_SHEET).context("entries sheet missing")?;
    renderer.print_entries(&import.entries, entries);
    if cli.summary {
        let summary = book.sheet(SUMMARY_SHEET).context("summary sheet missing")?;
        renderer.print_sheet(summary);
    }
    renderer.print_total(import.total_hours());
    Ok(())
}
