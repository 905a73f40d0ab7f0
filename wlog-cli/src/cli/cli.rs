use clap::Parser;
use std::path::PathBuf;
use wlog_core::ExportFormat;

use super::Style;
use crate::render::ColorMode;

/// wlog — Time records out of ticketing system exports
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Prints where the config file is looked for and the export directory.
    #[arg(long, conflicts_with_all = ["file", "export"])]
    pub path: bool,

    /// Text export to read (e.g. `wlog -c ACME -p Portal week.txt`).
    #[arg(required_unless_present = "path")]
    pub file: Option<PathBuf>,
    /// Client stamped on every record. Falls back to `client` in the config file.
    #[arg(long, short, env = "WLOG_CLIENT")]
    pub client: Option<String>,
    /// Project stamped on every record. Falls back to `project` in the config file.
    #[arg(long, short, env = "WLOG_PROJECT")]
    pub project: Option<String>,

    /// Only keep records logged on, or after, this date (`YYYY-MM-DD`).
    #[arg(long)]
    pub from: Option<String>,
    /// Only keep records logged on, or before, this date (`YYYY-MM-DD`).
    #[arg(long, requires = "from")]
    pub to: Option<String>,
    /// Also prints the hours per person and day.
    #[arg(long)]
    pub summary: bool,
    /// Output style: "long" or "short". Short style prints one line per record.
    #[arg(long, short, value_enum, env = "WLOG_STYLE", default_value_t = Style::Long)]
    pub style: Style,

    /// Writes the records and the summary to `parsed_<file>.xlsx`.
    #[arg(long, short)]
    pub export: bool,
    /// Exports one CSV file per sheet instead of a single workbook.
    #[arg(long, requires = "export")]
    pub csv: bool,
    /// Directory for exported files. Overrides `export_dir` from the config file.
    #[arg(long, short, requires = "export")]
    pub out_dir: Option<PathBuf>,

    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// Log filter for diagnostics printed to stderr (e.g. `debug`, `wlog_core=trace`).
    #[arg(long, env = "WLOG_LOG", default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }

    pub fn export_format(&self) -> ExportFormat {
        if self.csv {
            ExportFormat::Csv
        } else {
            ExportFormat::Xlsx
        }
    }
}
