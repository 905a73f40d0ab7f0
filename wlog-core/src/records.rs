//! Flat tabular views of entries and summaries, ready to be exported.

use crate::entry::{Entry, SummaryRow};

/// Sheet holding one row per parsed entry.
pub const ENTRIES_SHEET: &str = "Registros";
/// Sheet holding the per person, per day totals.
pub const SUMMARY_SHEET: &str = "Resumen";
/// Narrowest width hint handed out for a column.
pub const DEFAULT_MIN_COLUMN_WIDTH: usize = 15;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A value that maps 1:1 onto a row of named columns.
pub trait Record {
    /// Column headers, in output order.
    fn columns() -> &'static [&'static str];
    /// One cell per column, same order as [`Record::columns`].
    fn cells(&self) -> Vec<Cell>;
}

impl Record for Entry {
    fn columns() -> &'static [&'static str] {
        &[
            "Nombre",
            "Fecha",
            "Cliente",
            "Proyecto",
            "Tipo",
            "Codigo",
            "Actividad",
            "Total horas",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(&self.person),
            Cell::text(&self.date),
            Cell::text(&self.client),
            Cell::text(&self.project),
            Cell::text(self.kind.as_ref()),
            Cell::text(&self.code),
            Cell::text(&self.activity),
            Cell::Number(self.hours),
        ]
    }
}

impl Record for SummaryRow {
    fn columns() -> &'static [&'static str] {
        &["Nombre", "Dia", "Tiempo"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(&self.person),
            Cell::text(&self.date),
            Cell::Number(self.total_hours),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    /// Width hint, in characters.
    pub width: usize,
}

#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Builds a sheet from any [`Record`]s. Each column is at least
    /// `min_width` wide, or as wide as its header if that is longer.
    pub fn from_records<R: Record>(name: &str, records: &[R], min_width: usize) -> Self {
        let columns = R::columns()
            .iter()
            .map(|header| Column {
                header: header.to_string(),
                width: header.chars().count().max(min_width),
            })
            .collect();
        Self {
            name: name.to_string(),
            columns,
            rows: records.iter().map(R::cells).collect(),
        }
    }
}

/// A named set of sheets exported together.
#[derive(Debug, Clone)]
pub struct Workbook {
    pub file_stem: String,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// The usual export: entries first, then the summary.
    pub fn from_entries(
        source_name: Option<&str>,
        entries: &[Entry],
        summary: &[SummaryRow],
        min_width: usize,
    ) -> Self {
        Self {
            file_stem: export_file_stem(source_name),
            sheets: vec![
                Sheet::from_records(ENTRIES_SHEET, entries, min_width),
                Sheet::from_records(SUMMARY_SHEET, summary, min_width),
            ],
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// `parsed_<source stem>`, or `parsed_export` when the source has no usable name.
pub fn export_file_stem(source_name: Option<&str>) -> String {
    let stem = source_name
        .map(|name| {
            std::path::Path::new(name)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .filter(|stem| !stem.trim().is_empty())
        .unwrap_or_else(|| "export".to_string());
    format!("parsed_{stem}")
}
