pub mod config;
pub mod dates;
pub mod entry;
pub mod export;
pub mod parse_entries;
pub mod records;
pub mod summary;
pub mod wlog;

pub use config::Config;
pub use dates::DateFilter;
pub use entry::{Entry, EntryKind, SummaryRow};
pub use export::ExportFormat;
pub use parse_entries::parse_text;
pub use records::{Cell, Column, Record, Sheet, Workbook};
pub use summary::{summarize, total_hours};
pub use wlog::{Import, ParseRequest, Wlog};
