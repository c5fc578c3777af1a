//! Tier extraction for one CHAT record.
//!
//! The first line of a record is the main line: speaker label, utterance
//! text and an optional trailing time stamp (`start` or `start_end`, often
//! wrapped in marker bytes). Every following `%`-line is a dependent tier.
//! Main-line fields land in the [`Record`] under its reserved keys, so the
//! rest of the pipeline sees one uniform tier mapping per record.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::chat::lines::{lines, LineKind};
use crate::model::Record;

static MAIN_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*([A-Za-z0-9]{2,3}):\t(.*?)(\s*\D?(\d+)(_(\d+))?\D?$|$)").unwrap()
});

/// Parses one raw record string into a [`Record`].
///
/// Returns `None` when the text does not open with a well-formed main line;
/// the caller decides whether that skips the record. Dependent tier lines
/// that carry no `:\t` (or `: ` as a fallback) separator are dropped.
pub fn parse_record(text: &str, uid: usize) -> Option<Record> {
    let mut line_iter = lines(text);
    let main = line_iter.next()?;
    if main.kind != LineKind::Main {
        return None;
    }
    let caps = MAIN_LINE_REGEX.captures(main.text)?;

    let mut record = Record::new(uid);
    record.insert(Record::SPEAKER, &caps[1]);
    record.insert(Record::UTTERANCE, &caps[2]);
    record.insert(Record::START, caps.get(4).map_or("", |m| m.as_str()));
    record.insert(Record::END, caps.get(6).map_or("", |m| m.as_str()));

    for line in line_iter {
        if line.kind != LineKind::Dependent {
            continue;
        }
        let (name, content) = match line.text.split_once(":\t") {
            Some(pair) => pair,
            None => match line.text.split_once(": ") {
                Some(pair) => pair,
                None => {
                    tracing::debug!(line = line.text, "dependent tier without separator");
                    continue;
                }
            },
        };
        record.insert(name.trim_start_matches('%'), content);
    }
    Some(record)
}
