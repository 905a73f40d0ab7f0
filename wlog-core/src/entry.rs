use chrono::NaiveDate;
use strum_macros::{AsRefStr, Display, EnumString};

/// Person used when a block carries no readable reporter line.
pub const UNKNOWN_PERSON: &str = "Unknown";

/// Classification of a block, taken from its header token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum EntryKind {
    Task,
    Bug,
    Unknown,
}

impl EntryKind {
    /// Maps a header token (`Task`, `bug`, `TASK`...) to its kind.
    /// Anything else falls back to [`EntryKind::Unknown`].
    pub fn from_token(token: &str) -> Self {
        token.parse().unwrap_or(EntryKind::Unknown)
    }
}

/// One time record extracted from a task/bug block.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub person: String,
    /// `YYYY-MM-DD`, or empty when no date could be found.
    pub date: String,
    pub client: String,
    pub project: String,
    pub kind: EntryKind,
    /// Header reference as written, e.g. `Task #54056`.
    pub code: String,
    pub activity: String,
    pub hours: f64,
}

impl Entry {
    /// The entry date as a calendar date, if it has one and it is a real day.
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Hours logged by one person on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub person: String,
    pub date: String,
    pub total_hours: f64,
}
