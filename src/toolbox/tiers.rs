//! Tier extraction for one Toolbox record.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::cleaning::remove_redundant_whitespace;
use crate::model::Record;

static MARKER_SPLIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Parses one raw Toolbox record into a [`Record`].
///
/// Every line is `\marker content`: the marker (minus backslashes) keys the
/// tier, the content is whitespace-normalized, a marker without content maps
/// to `""`. Duplicate markers: the last one wins.
pub fn parse_record(text: &str, uid: usize) -> Record {
    let mut record = Record::new(uid);
    for line in text.split('\n') {
        if line.is_empty() {
            continue;
        }
        let mut tokens = MARKER_SPLIT_REGEX.splitn(line, 2);
        let marker = tokens.next().unwrap_or("").replace('\\', "");
        if marker.is_empty() {
            continue;
        }
        let content = tokens.next().unwrap_or("");
        record.insert(marker, remove_redundant_whitespace(content));
    }
    record
}

/// A record whose tier content starts with `@` is interspersed metadata,
/// not transcription.
pub fn is_record(record: &Record) -> bool {
    !record.tiers().any(|(_, content)| content.starts_with('@'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let record = parse_record(
            "\\ref session.001\n\\tx peiskasina okaoka\n\\mb peis -kasi -na\n\\ge pig -DIM -TOP\n",
            0,
        );
        assert_eq!(record.tier("ref"), "session.001");
        assert_eq!(record.tier("tx"), "peiskasina okaoka");
        assert_eq!(record.tier("mb"), "peis -kasi -na");
        assert_eq!(record.tier("ge"), "pig -DIM -TOP");
    }

    #[test]
    fn test_content_whitespace_is_normalized() {
        let record = parse_record("\\ref a.1\n\\tx  ha   le\tfa  \n", 0);
        assert_eq!(record.tier("tx"), "ha le fa");
    }

    #[test]
    fn test_marker_without_content() {
        let record = parse_record("\\ref a.1\n\\cmt\n", 0);
        assert!(record.has_tier("cmt"));
        assert_eq!(record.tier("cmt"), "");
    }

    #[test]
    fn test_tab_separated_marker() {
        let record = parse_record("\\ref\ta.1\n", 0);
        assert_eq!(record.tier("ref"), "a.1");
    }

    #[test]
    fn test_duplicate_marker_last_wins() {
        let record = parse_record("\\ref a.1\n\\tx first\n\\tx second\n", 0);
        assert_eq!(record.tier("tx"), "second");
    }

    #[test]
    fn test_metadata_record_detection() {
        let metadata = parse_record("\\ref a.0\n\\ELANParticipant @Unknown\n", 0);
        assert!(!is_record(&metadata));
        let genuine = parse_record("\\ref a.1\n\\tx ha\n", 1);
        assert!(is_record(&genuine));
    }
}
