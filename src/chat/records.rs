//! Record splitting for CHAT transcripts.
//!
//! A record opens at a line matching `*LLL:\t` and runs to the next record
//! opener or the end of input; material after the last opener (including a
//! trailing `@End`) belongs to the last record and is ignored at tier
//! extraction. The iterator is lazy and non-restartable; a session with no
//! record opener yields nothing.

use once_cell::sync::Lazy;
use regex::Regex;

static RECORD_START_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\*[A-Za-z0-9]{2,3}:\t").unwrap());

/// Returns the header section: everything before the first record opener,
/// or the whole text when there is no record.
pub fn header_section(text: &str) -> &str {
    match RECORD_START_REGEX.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    }
}

/// Lazy iterator over raw record strings.
pub struct Records<'s> {
    text: &'s str,
    pos: Option<usize>,
}

impl<'s> Records<'s> {
    pub fn new(text: &'s str) -> Records<'s> {
        Records {
            text,
            pos: RECORD_START_REGEX.find(text).map(|m| m.start()),
        }
    }
}

impl<'s> Iterator for Records<'s> {
    type Item = &'s str;

    fn next(&mut self) -> Option<&'s str> {
        let start = self.pos?;
        let next = RECORD_START_REGEX
            .find_at(self.text, start + 1)
            .map(|m| m.start());
        let end = next.unwrap_or(self.text.len());
        self.pos = next;
        Some(self.text[start..end].trim_end_matches('\n'))
    }
}

/// Iterates the records of a session text.
pub fn records(text: &str) -> Records<'_> {
    Records::new(text)
}

/// Byte ranges of every record in a session text, for cursors that hold the
/// text and slice records out on demand.
pub fn record_spans(text: &str) -> Vec<std::ops::Range<usize>> {
    let mut spans = Vec::new();
    let mut pos = RECORD_START_REGEX.find(text).map(|m| m.start());
    while let Some(start) = pos {
        let next = RECORD_START_REGEX
            .find_at(text, start + 1)
            .map(|m| m.start());
        spans.push(start..next.unwrap_or(text.len()));
        pos = next;
    }
    spans
}
