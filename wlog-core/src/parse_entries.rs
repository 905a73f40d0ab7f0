//! Extracts time records out of text exported from the ticketing system.
//!
//! The export is noisy: besides the blocks we care about it carries comments,
//! state changes and whatever else the tool decided to print. A block looks like:
//!
//! ```text
//! Task #54056: Fix login redirect
//! hora registrada por Jane Doe el 2025-11-24 05:16 PM
//! Spent time: 1,5 horas
//! ```
//!
//! The reporter line may also be split in two (`hora registrada por` alone, then
//! `Jane Doe el 2025-11-24 05:16 PM`). Every sub-field is optional: a block with
//! nothing but a header still produces an [`Entry`].

use crate::entry::{Entry, EntryKind, UNKNOWN_PERSON};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

/// How many lines after a header may hold its `Spent time:` line.
const SPENT_TIME_WINDOW: usize = 4;

// Literals fold case in ASCII only and digits are ASCII only, so dates always
// read as `YYYY-MM-DD` in plain digits.
static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*((?i-u:task|bug))\s*#\s*([0-9]+)\s*:\s*(.+)$").unwrap()
});
static REPORTER_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i-u:hora registrada por)$").unwrap());
static REPORTER_DATA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s+el\s+([0-9]{4}-[0-9]{2}-[0-9]{2})").unwrap());
static REPORTER_INLINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i-u:hora registrada por)\s+(.+?)\s+(?i-u:el)\s+([0-9]{4}-[0-9]{2}-[0-9]{2})",
    )
    .unwrap()
});
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4}-[0-9]{2}-[0-9]{2})").unwrap());
static SPENT_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u:spent time):\s*([0-9.,]+)\s*(?i-u:horas|hora|h)?").unwrap()
});

/// Parsed header line: `Task #100: Fix bug`.
#[derive(Debug, PartialEq)]
pub struct Header<'a> {
    /// `Task`/`Bug` exactly as written in the source.
    pub token: &'a str,
    pub id: &'a str,
    pub activity: &'a str,
}

impl Header<'_> {
    pub fn kind(&self) -> EntryKind {
        EntryKind::from_token(self.token)
    }

    pub fn code(&self) -> String {
        format!("{} #{}", self.token, self.id)
    }
}

/// Who logged the time and when. `person` is `None` when only a date was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Reporter {
    pub person: Option<String>,
    pub date: String,
}

/// The two lines following a header. Missing lines are `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lookahead<'a> {
    pub first: Option<&'a str>,
    pub second: Option<&'a str>,
}

type ReporterStrategy = fn(&Lookahead) -> Option<Reporter>;

/// Tried in order; the first one returning a reporter wins.
const REPORTER_STRATEGIES: [ReporterStrategy; 3] =
    [two_line_reporter, inline_reporter, date_anywhere];

/// Parses the whole export into entries, in the order their headers appear.
///
/// `client` and `project` are copied verbatim into every entry; checking that
/// they are meaningful is up to the caller.
///
/// This never fails. Text without any header yields an empty `Vec`, and any
/// field that cannot be read falls back to `"Unknown"`, `""` or `0`.
pub fn parse_text(text: &str, client: &str, project: &str) -> Vec<Entry> {
    let lines = clean_lines(text);
    let mut entries = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let Some(header) = parse_header(lines[i]) else {
            i += 1;
            continue;
        };

        let lookahead = Lookahead {
            first: lines.get(i + 1).copied(),
            second: lines.get(i + 2).copied(),
        };
        let reporter = extract_reporter(&lookahead);
        let spent = find_spent_time(&lines, i);
        debug!(
            code = %header.code(),
            line = i,
            spent_line = ?spent.map(|(idx, _)| idx),
            "found block"
        );

        entries.push(Entry {
            person: reporter
                .as_ref()
                .and_then(|r| r.person.clone())
                .unwrap_or_else(|| UNKNOWN_PERSON.to_string()),
            date: reporter.map(|r| r.date).unwrap_or_default(),
            client: client.to_string(),
            project: project.to_string(),
            kind: header.kind(),
            code: header.code(),
            activity: header.activity.to_string(),
            hours: spent.map(|(_, hours)| hours).unwrap_or(0.0),
        });

        // Resume right after the consumed `Spent time:` line.
        if let Some((spent_idx, _)) = spent {
            i = spent_idx;
        }
        i += 1;
    }
    entries
}

/// Splits on any line ending, trims, and drops blank lines.
pub fn clean_lines(text: &str) -> Vec<&str> {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn parse_header(line: &str) -> Option<Header<'_>> {
    let caps = HEADER_RE.captures(line)?;
    Some(Header {
        token: caps.get(1)?.as_str(),
        id: caps.get(2)?.as_str(),
        activity: caps.get(3)?.as_str().trim(),
    })
}

/// Runs the reporter strategies in order and keeps the first hit.
pub fn extract_reporter(lookahead: &Lookahead) -> Option<Reporter> {
    REPORTER_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(lookahead))
}

/// `hora registrada por` on its own line, then `Jane Doe el 2024-01-05 ...`.
pub fn two_line_reporter(lookahead: &Lookahead) -> Option<Reporter> {
    if !REPORTER_MARKER_RE.is_match(lookahead.first?) {
        return None;
    }
    let caps = REPORTER_DATA_RE.captures(lookahead.second?)?;
    Some(Reporter {
        person: Some(caps[1].trim().to_string()),
        date: caps[2].to_string(),
    })
}

/// `hora registrada por Jane Doe el 2024-01-05 ...` on a single line.
pub fn inline_reporter(lookahead: &Lookahead) -> Option<Reporter> {
    let first = lookahead.first?;
    if REPORTER_MARKER_RE.is_match(first) {
        return None;
    }
    let caps = REPORTER_INLINE_RE.captures(first)?;
    Some(Reporter {
        person: Some(caps[1].trim().to_string()),
        date: caps[2].to_string(),
    })
}

/// Last resort: any `YYYY-MM-DD` in the two lines after the header.
pub fn date_anywhere(lookahead: &Lookahead) -> Option<Reporter> {
    let joined = format!(
        "{} {}",
        lookahead.first.unwrap_or_default(),
        lookahead.second.unwrap_or_default()
    );
    let caps = DATE_RE.captures(&joined)?;
    Some(Reporter {
        person: None,
        date: caps[1].to_string(),
    })
}

/// Looks for the block's `Spent time:` line in the lines after `header_idx`.
/// Returns its index and the hours it holds.
///
/// The window is fixed, so a header sitting close enough to the next block
/// will take that block's spent time.
pub fn find_spent_time(lines: &[&str], header_idx: usize) -> Option<(usize, f64)> {
    let last = lines.len().checked_sub(1)?;
    let end = (header_idx + SPENT_TIME_WINDOW).min(last);
    (header_idx + 1..=end).find_map(|idx| {
        let caps = SPENT_TIME_RE.captures(lines[idx])?;
        let hours = parse_hours(&caps[1]);
        trace!(line = idx, raw = &caps[1], hours, "spent time");
        Some((idx, hours))
    })
}

/// Reads a duration such as `1.5`, `0,5` or `2`.
///
/// The first decimal comma becomes a dot and the longest leading decimal is
/// used, so `1.5.3` reads as `1.5`. Anything unreadable is `0`.
pub fn parse_hours(raw: &str) -> f64 {
    let normalized = raw.replacen(',', ".", 1);
    let mut seen_dot = false;
    let prefix_len = normalized
        .char_indices()
        .find(|&(_, c)| match c {
            '0'..='9' => false,
            '.' if !seen_dot => {
                seen_dot = true;
                false
            }
            _ => true,
        })
        .map(|(idx, _)| idx)
        .unwrap_or(normalized.len());

    match normalized[..prefix_len].parse::<f64>() {
        Ok(hours) if hours.is_finite() && hours >= 0.0 => hours,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<Entry> {
        parse_text(text, "ACME", "Portal")
    }

    #[test]
    fn inline_reporter_block() {
        let text = "Task #100: Fix bug\nhora registrada por Jane Doe el 2024-01-05 02:00 PM\nSpent time: 1.5 horas";
        let entries = parse(text);

        assert_eq!(
            entries,
            vec![Entry {
                person: "Jane Doe".to_string(),
                date: "2024-01-05".to_string(),
                client: "ACME".to_string(),
                project: "Portal".to_string(),
                kind: EntryKind::Task,
                code: "Task #100".to_string(),
                activity: "Fix bug".to_string(),
                hours: 1.5,
            }]
        );
    }

    #[test]
    fn two_line_reporter_block() {
        let text = "Bug #7: Crash\nhora registrada por\nJohn Smith el 2024-02-01 09:00 AM\nSpent time: 0,5 h";
        let entries = parse(text);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].person, "John Smith");
        assert_eq!(entries[0].date, "2024-02-01");
        assert_eq!(entries[0].kind, EntryKind::Bug);
        assert_eq!(entries[0].code, "Bug #7");
        assert_eq!(entries[0].hours, 0.5);
    }

    #[test]
    fn missing_spent_time_still_emits_entry() {
        let text = "Task #5: Review\nhora registrada por Jane Doe el 2024-01-05\nsome comment\nanother comment\nmore noise\nSpent time: 3 horas";
        let entries = parse(text);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].person, "Jane Doe");
        assert_eq!(entries[0].hours, 0.0);
    }

    #[test]
    fn text_without_headers_is_empty() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \r\n").is_empty());
        assert!(parse("Spent time: 2 h\nhora registrada por Jane el 2024-01-05").is_empty());
        assert!(parse("Story #3: not a task").is_empty());
    }

    #[test]
    fn header_at_end_of_input() {
        let entries = parse("noise\nBug #42: Last line");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].person, UNKNOWN_PERSON);
        assert_eq!(entries[0].date, "");
        assert_eq!(entries[0].hours, 0.0);
        assert_eq!(entries[0].activity, "Last line");
    }

    #[test]
    fn code_keeps_token_as_written() {
        let entries = parse("TASK # 12 : Upper\ntask#13:lower\nbUg #14: mixed");

        let codes: Vec<_> = entries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["TASK #12", "task #13", "bUg #14"]);
        let kinds: Vec<_> = entries.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, [EntryKind::Task, EntryKind::Task, EntryKind::Bug]);
        assert_eq!(entries[1].activity, "lower");
    }

    #[test]
    fn header_needs_activity_text() {
        assert!(parse("Task #1:").is_empty());
        assert!(parse("Task #1:   ").is_empty());
        assert!(parse("Task 1: no hash").is_empty());
    }

    #[test]
    fn comma_and_dot_durations_match() {
        let comma = parse("Task #1: a\nSpent time: 2,5 horas");
        let dot = parse("Task #1: a\nSpent time: 2.5 horas");

        assert_eq!(comma[0].hours, 2.5);
        assert_eq!(comma[0].hours, dot[0].hours);
    }

    #[test]
    fn crlf_and_cr_line_endings() {
        let lf = parse("Task #1: a\nhora registrada por Jane el 2024-01-05\nSpent time: 1 h");
        let crlf = parse("Task #1: a\r\nhora registrada por Jane el 2024-01-05\r\nSpent time: 1 h");
        let cr = parse("Task #1: a\rhora registrada por Jane el 2024-01-05\rSpent time: 1 h");

        assert_eq!(lf, crlf);
        assert_eq!(lf, cr);
        assert_eq!(lf[0].person, "Jane");
    }

    #[test]
    fn date_fallback_without_person() {
        let text = "Task #9: Deploy\nlogged 2024-03-10 by someone\nSpent time: 1 h";
        let entries = parse(text);

        assert_eq!(entries[0].person, UNKNOWN_PERSON);
        assert_eq!(entries[0].date, "2024-03-10");
    }

    #[test]
    fn date_fallback_looks_at_second_line() {
        let text = "Task #9: Deploy\nhora registrada por\nsomebody on 2024-03-11\nSpent time: 1 h";
        let entries = parse(text);

        assert_eq!(entries[0].person, UNKNOWN_PERSON);
        assert_eq!(entries[0].date, "2024-03-11");
    }

    #[test]
    fn cursor_skips_consumed_block() {
        let text = "Task #1: first\nhora registrada por Jane el 2024-01-05\nSpent time: 1 h\nBug #2: second\nhora registrada por John el 2024-01-06\nSpent time: 2 h";
        let entries = parse(text);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].hours, 1.0);
        assert_eq!(entries[1].person, "John");
        assert_eq!(entries[1].hours, 2.0);
    }

    #[test]
    fn back_to_back_headers_without_spent_time() {
        let entries = parse("Task #1: a\nTask #2: b\nTask #3: c");

        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.hours == 0.0));
    }

    #[test]
    fn tightly_packed_header_takes_next_spent_time() {
        // `Task #1` has no spent time of its own, but `Task #2`'s line is within
        // its window. The first block takes it and the cursor jumps past the
        // second header, which is never seen.
        let text = "Task #1: no time\nTask #2: has time\nSpent time: 2 h";
        let entries = parse(text);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].code, "Task #1");
        assert_eq!(entries[0].hours, 2.0);
    }

    #[test]
    fn non_ascii_digits_are_not_dates_or_durations() {
        let text = "Task #12: x\nhora registrada por Jane el \u{662}\u{660}\u{662}\u{664}-\u{660}\u{661}-\u{660}\u{665}\nSpent time: \u{663} h\nSpent time: 2 h";
        let entries = parse(text);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].person, UNKNOWN_PERSON);
        assert_eq!(entries[0].date, "");
        assert_eq!(entries[0].hours, 2.0);

        assert!(parse("Task #\u{661}\u{662}: x").is_empty());
    }

    #[test]
    fn header_token_folds_ascii_case_only() {
        // U+212A KELVIN SIGN folds to `k` under Unicode rules.
        assert!(parse("Tas\u{212A} #1: kelvin").is_empty());
        assert_eq!(parse("TASK #1: upper")[0].kind, EntryKind::Task);
    }

    #[test]
    fn parse_is_repeatable() {
        let text = "Task #100: Fix bug\nhora registrada por Jane Doe el 2024-01-05\nSpent time: 1.5 horas\nBug #7: Crash";
        assert_eq!(parse(text), parse(text));
    }

    #[test]
    fn two_line_strategy_requires_bare_marker() {
        let la = Lookahead {
            first: Some("HORA REGISTRADA POR"),
            second: Some("Jane Doe el 2024-01-05 02:00 PM"),
        };
        assert_eq!(
            two_line_reporter(&la),
            Some(Reporter {
                person: Some("Jane Doe".to_string()),
                date: "2024-01-05".to_string(),
            })
        );

        let inline = Lookahead {
            first: Some("hora registrada por Jane el 2024-01-05"),
            second: None,
        };
        assert_eq!(two_line_reporter(&inline), None);
        assert!(inline_reporter(&inline).is_some());
    }

    #[test]
    fn inline_strategy_skips_bare_marker() {
        let la = Lookahead {
            first: Some("hora registrada por"),
            second: Some("garbage"),
        };
        assert_eq!(inline_reporter(&la), None);
        assert_eq!(extract_reporter(&la), None);
    }

    #[test]
    fn date_anywhere_with_missing_lines() {
        assert_eq!(date_anywhere(&Lookahead::default()), None);
        let la = Lookahead {
            first: None,
            second: None,
        };
        assert_eq!(extract_reporter(&la), None);
    }

    #[test]
    fn spent_time_window_is_four_lines() {
        let lines = ["Task #1: a", "x", "y", "z", "Spent time: 4 h", "Spent time: 5 h"];
        assert_eq!(find_spent_time(&lines, 0), Some((4, 4.0)));

        let lines = ["Task #1: a", "w", "x", "y", "z", "Spent time: 5 h"];
        assert_eq!(find_spent_time(&lines, 0), None);
    }

    #[test]
    fn spent_time_on_header_line_is_ignored() {
        let lines = ["Task #1: Spent time: 9 h"];
        assert_eq!(find_spent_time(&lines, 0), None);
        assert_eq!(find_spent_time(&[], 0), None);
    }

    #[test]
    fn spent_time_units_are_optional() {
        for line in ["Spent time: 2", "spent TIME: 2 HORAS", "Spent time:2hora", "Spent time: 2 h"] {
            let lines = ["Task #1: a", line];
            assert_eq!(find_spent_time(&lines, 0), Some((1, 2.0)), "{line}");
        }
    }

    #[test]
    fn parse_hours_is_lenient() {
        assert_eq!(parse_hours("1.5"), 1.5);
        assert_eq!(parse_hours("0,25"), 0.25);
        assert_eq!(parse_hours("1.5.3"), 1.5);
        assert_eq!(parse_hours("1,5,3"), 1.5);
        assert_eq!(parse_hours(".5"), 0.5);
        assert_eq!(parse_hours("3."), 3.0);
        assert_eq!(parse_hours("."), 0.0);
        assert_eq!(parse_hours(","), 0.0);
        assert_eq!(parse_hours(""), 0.0);
    }
}
