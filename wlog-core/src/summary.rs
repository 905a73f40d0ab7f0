//! Per person, per day totals.

use crate::entry::{Entry, SummaryRow};
use std::collections::HashMap;

/// Groups entries by `(person, date)` and adds up their hours.
///
/// Rows come out in the order each pair first shows up in `entries`.
///
/// The key is the pair itself, not `person + date` glued into one string, so
/// `("ab", "c")` and `("a", "bc")` stay apart where a concatenated key would
/// merge them. With dates that are empty or `YYYY-MM-DD` the two keyings agree
/// on any realistic input.
pub fn summarize(entries: &[Entry]) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for entry in entries {
        let key = (entry.person.as_str(), entry.date.as_str());
        let row = *index.entry(key).or_insert_with(|| {
            rows.push(SummaryRow {
                person: entry.person.clone(),
                date: entry.date.clone(),
                total_hours: 0.0,
            });
            rows.len() - 1
        });
        rows[row].total_hours += countable_hours(entry.hours);
    }
    rows
}

/// Sum of every entry's hours.
pub fn total_hours(entries: &[Entry]) -> f64 {
    entries.iter().map(|e| countable_hours(e.hours)).sum()
}

fn countable_hours(hours: f64) -> f64 {
    if hours.is_finite() { hours } else { 0.0 }
}
