use crate::{
    Config,
    dates::DateFilter,
    entry::{Entry, SummaryRow},
    export::ExportFormat,
    parse_entries::parse_text,
    records::Workbook,
    summary::{summarize, total_hours},
};
use anyhow::{Context, Result, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// Client and project stamped on every entry of one import.
///
/// Values are copied onto entries exactly as given, surrounding whitespace
/// included. Only [`ParseRequest::validate`] looks at them trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseRequest {
    pub client: String,
    pub project: String,
}

impl ParseRequest {
    /// Both values must be present before anything is parsed.
    pub fn validate(&self) -> Result<()> {
        if self.client.trim().is_empty() || self.project.trim().is_empty() {
            bail!("Please fill in both client and project before importing a file.");
        }
        Ok(())
    }
}

/// Entries read from one source, plus where they came from.
#[derive(Debug, Clone)]
pub struct Import {
    /// File name the text came from, if any. Used to name exports.
    pub source_name: Option<String>,
    pub entries: Vec<Entry>,
}

impl Import {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> Vec<SummaryRow> {
        summarize(&self.entries)
    }

    pub fn total_hours(&self) -> f64 {
        total_hours(&self.entries)
    }

    /// Keeps only entries whose date falls in `filter`. Undated entries are dropped.
    pub fn filter_dates(&mut self, filter: DateFilter) {
        self.entries
            .retain(|e| e.naive_date().is_some_and(|d| filter.contains(d)));
    }

    pub fn workbook(&self, min_width: usize) -> Workbook {
        Workbook::from_entries(
            self.source_name.as_deref(),
            &self.entries,
            &self.summary(),
            min_width,
        )
    }
}

pub struct Wlog {
    pub config: Config,
}

impl Wlog {
    /// Creates a new `Wlog` instance, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::with_config(config))
    }

    /// Creates a new `Wlog` instance with a specific `Config`.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Fills in whatever the caller left out from the configured defaults.
    /// The result still has to pass [`ParseRequest::validate`].
    pub fn resolve_request(&self, client: Option<&str>, project: Option<&str>) -> ParseRequest {
        let pick = |given: Option<&str>, fallback: &Option<String>| {
            given
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
                .or_else(|| fallback.clone())
                .unwrap_or_default()
        };
        ParseRequest {
            client: pick(client, &self.config.client),
            project: pick(project, &self.config.project),
        }
    }

    /// Parses already loaded text.
    pub fn import_text(
        &self,
        text: &str,
        source_name: Option<&str>,
        request: &ParseRequest,
    ) -> Result<Import> {
        request.validate()?;
        let entries = parse_text(text, &request.client, &request.project);
        info!(
            source = source_name.unwrap_or("<text>"),
            entries = entries.len(),
            "imported"
        );
        Ok(Import {
            source_name: source_name.map(str::to_string),
            entries,
        })
    }

    /// Reads `path` as UTF-8 (invalid bytes are replaced) and parses it.
    pub fn import_file(&self, path: &Path, request: &ParseRequest) -> Result<Import> {
        request.validate()?;
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let text = String::from_utf8_lossy(&bytes);
        let source_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        self.import_text(&text, source_name.as_deref(), request)
    }

    /// Writes the import's entries and summary into `dir` or the configured
    /// export directory: a single `parsed_<stem>.xlsx`, or one CSV per sheet.
    pub fn export(
        &self,
        import: &Import,
        dir: Option<&Path>,
        format: ExportFormat,
    ) -> Result<Vec<PathBuf>> {
        if import.is_empty() {
            bail!("Nothing to export.");
        }
        let dir = dir.unwrap_or(self.config.export_dir.as_path());
        import
            .workbook(self.config.min_column_width)
            .write(dir, format)
    }
}
