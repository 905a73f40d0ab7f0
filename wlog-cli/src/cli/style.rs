use clap::ValueEnum;

/// How entries are printed.
#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
pub enum Style {
    /// A table with every column.
    Long,
    /// One line per entry.
    Short,
}
