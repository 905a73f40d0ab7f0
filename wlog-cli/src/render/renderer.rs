use super::theme::OneDark;
use crate::cli::Style;
use std::path::PathBuf;
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};
use wlog_core::{Entry, Sheet};

#[derive(Clone)]
pub struct RenderOptions {
    pub use_color: bool,
    pub style: Style,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::default_onedark_skin(),
            opts: config.unwrap_or(RenderOptions {
                use_color: true,
                style: Style::Long,
            }),
        }
    }

    pub fn print_md(&self, md: &str) {
        self.skin.print_text(md);
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {} |\n|-|\n", escape_cell(message));
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_entry_line(&self, entry: &Entry) {
        let mut date = if entry.date.is_empty() {
            "----------".to_string()
        } else {
            entry.date.clone()
        };
        let mut person = entry.person.clone();
        let mut code = entry.code.clone();
        let mut hours = format!("{}h", entry.hours);
        if self.opts.use_color {
            date = date.with(Color::Cyan).to_string();
            person = person.with(Color::Blue).to_string();
            code = code.with(Color::Yellow).to_string();
            hours = hours.with(Color::Green).to_string();
        }
        println!("{} {} - {}: {} ({})", date, person, code, entry.activity, hours);
    }

    /// Prints the entries sheet, as a table or one line per entry.
    pub fn print_entries(&self, entries: &[Entry], sheet: &Sheet) {
        match self.opts.style {
            Style::Short => entries.iter().for_each(|e| self.print_entry_line(e)),
            Style::Long => self.print_sheet(sheet),
        }
    }

    pub fn print_sheet(&self, sheet: &Sheet) {
        if self.opts.use_color {
            self.print_md(&format!("## {}", sheet.name));
            self.print_md(&markdown_table(sheet));
        } else {
            println!("{}", sheet.name);
            print!("{}", plain_table(sheet));
        }
    }

    pub fn print_total(&self, total_hours: f64) {
        if self.opts.use_color {
            self.print_md(&format!("**Total hours:** {total_hours}"));
        } else {
            println!("Total hours: {total_hours}");
        }
    }

    pub fn print_paths(&self, title: &str, paths: &[PathBuf]) {
        let mut md = format!("{title}\n");
        for path in paths {
            md.push_str(&format!("* `{}`\n", path.display()));
        }
        if self.opts.use_color {
            self.print_md(&md);
        } else {
            print!("{}", md.replace('`', ""));
        }
    }
}

/// termimad table: header row, then one row per record.
fn markdown_table(sheet: &Sheet) -> String {
    let aligns = vec![":-"; sheet.columns.len()].join("|");
    let headers: Vec<String> = sheet
        .columns
        .iter()
        .map(|c| format!("**{}**", escape_cell(&c.header)))
        .collect();
    let mut md = format!("|{aligns}|\n|{}|\n|-|\n", headers.join("|"));
    for row in &sheet.rows {
        let cells: Vec<String> = row.iter().map(|c| escape_cell(&c.to_string())).collect();
        md.push_str(&format!("|{}|\n", cells.join("|")));
    }
    md.push_str("|-|\n");
    md
}

/// Columns padded to their width hints, two spaces apart.
fn plain_table(sheet: &Sheet) -> String {
    let pad = |values: Vec<String>| {
        let line = values
            .iter()
            .zip(&sheet.columns)
            .map(|(value, column)| format!("{value:<width$}", width = column.width))
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\n", line.trim_end())
    };

    let mut out = pad(sheet.columns.iter().map(|c| c.header.clone()).collect());
    for row in &sheet.rows {
        out.push_str(&pad(row.iter().map(ToString::to_string).collect()));
    }
    out
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "/")
}
