//! Writes a [`Workbook`] to disk: one `.xlsx` file with a worksheet per
//! sheet, or one CSV file per sheet.

use crate::records::{Cell, Sheet, Workbook};
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// On-disk shape of an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// `<stem>.xlsx`, one worksheet per sheet.
    #[default]
    Xlsx,
    /// `<stem>_<sheet>.csv` per sheet.
    Csv,
}

impl Workbook {
    /// Writes the file(s) for `format` into `dir` and returns their paths.
    pub fn write(&self, dir: &Path, format: ExportFormat) -> Result<Vec<PathBuf>> {
        match format {
            ExportFormat::Xlsx => self.write_xlsx(dir).map(|path| vec![path]),
            ExportFormat::Csv => self.write_csv(dir),
        }
    }

    /// Writes `<dir>/<file_stem>.xlsx` with one worksheet per sheet, in
    /// sheet order. Column widths come from [`Column::width`](crate::Column).
    pub fn write_xlsx(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

        let mut book = XlsxWorkbook::new();
        let header = Format::new().set_bold();
        for sheet in &self.sheets {
            let worksheet = book.add_worksheet();
            fill_worksheet(worksheet, sheet, &header)
                .with_context(|| format!("building sheet {}", sheet.name))?;
        }

        let path = dir.join(format!("{}.xlsx", self.file_stem));
        book.save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), sheets = self.sheets.len(), "exported workbook");
        Ok(path)
    }

    /// Writes `<dir>/<file_stem>_<sheet>.csv` for every sheet and returns the
    /// paths written, in sheet order. `dir` is created if needed.
    pub fn write_csv(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

        let mut written = Vec::with_capacity(self.sheets.len());
        for sheet in &self.sheets {
            let path = dir.join(format!("{}_{}.csv", self.file_stem, sheet.name));
            fs::write(&path, render_csv(sheet))
                .with_context(|| format!("writing sheet {} to {}", sheet.name, path.display()))?;
            info!(path = %path.display(), rows = sheet.rows.len(), "exported sheet");
            written.push(path);
        }
        Ok(written)
    }
}

fn fill_worksheet(
    worksheet: &mut Worksheet,
    sheet: &Sheet,
    header: &Format,
) -> Result<(), rust_xlsxwriter::XlsxError> {
    worksheet.set_name(&sheet.name)?;
    for (col, column) in (0u16..).zip(&sheet.columns) {
        worksheet.write_string_with_format(0, col, &column.header, header)?;
        worksheet.set_column_width(col, column.width as f64)?;
    }
    for (row, cells) in (1u32..).zip(&sheet.rows) {
        for (col, cell) in (0u16..).zip(cells) {
            match cell {
                Cell::Text(s) => worksheet.write_string(row, col, s)?,
                Cell::Number(n) => worksheet.write_number(row, col, *n)?,
            };
        }
    }
    Ok(())
}

/// Renders a sheet as CSV: header row first, `\n` line endings.
pub fn render_csv(sheet: &Sheet) -> String {
    let mut out = String::new();
    let headers: Vec<String> = sheet.columns.iter().map(|c| quote(&c.header)).collect();
    out.push_str(&headers.join(","));
    out.push('\n');

    for row in &sheet.rows {
        let fields: Vec<String> = row.iter().map(csv_field).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

fn csv_field(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) if s.is_empty() => String::new(),
        Cell::Text(s) => quote(s),
        Cell::Number(n) => n.to_string(),
    }
}

/// Wraps in double quotes, doubling any quote inside.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
