use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Which entry dates to keep: one day, everything from a day on, or an
/// inclusive range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DateFilter {
    Single(NaiveDate),
    From(NaiveDate),
    Range(NaiveDate, NaiveDate),
}

impl DateFilter {
    /// Builds a filter from `YYYY-MM-DD` strings.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chrono::NaiveDate;
    /// # use wlog_core::dates::DateFilter;
    /// let filter = DateFilter::parse("2025-08-15", Some("2025-08-17")).unwrap();
    ///
    /// assert!(filter.contains(NaiveDate::from_ymd_opt(2025, 8, 16).unwrap()));
    /// assert!(!filter.contains(NaiveDate::from_ymd_opt(2025, 8, 18).unwrap()));
    /// ```
    pub fn parse(from: &str, to: Option<&str>) -> Result<Self> {
        let start = parse_input_date(from)?;
        match to {
            None => Ok(DateFilter::From(start)),
            Some(to) => {
                let end = parse_input_date(to)?;
                if end < start {
                    bail!("'{to}' is before '{from}'");
                }
                if end == start {
                    Ok(DateFilter::Single(start))
                } else {
                    Ok(DateFilter::Range(start, end))
                }
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            DateFilter::Single(day) => date == day,
            DateFilter::From(start) => date >= start,
            DateFilter::Range(start, end) => start <= date && date <= end,
        }
    }
}

fn parse_input_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), INPUT_DATE_FORMAT)
        .with_context(|| format!("'{input}' is not a valid YYYY-MM-DD date"))
}
