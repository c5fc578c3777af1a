//! Splitting utterances and morphology tiers into words.
//!
//! Orthographic words are whitespace-separated. Morphology tiers are cut
//! into *morpheme-words* (the stretch of tier annotating one orthographic
//! word); what counts as a boundary there is corpus configuration, because
//! some corpora write clitics with `=` inside one word and Toolbox corpora
//! put spaces between the morphemes of a single word.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static CLITIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+|=").unwrap());

/// Morpheme-word boundary rule of a corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordBoundary {
    /// Whitespace only.
    #[default]
    Whitespace,
    /// Whitespace, with `=`-attached clitics promoted to their own
    /// morpheme-word.
    CliticPromotion,
    /// Whitespace not adjacent to a morpheme delimiter (`-` or `=`), the
    /// Toolbox convention where one word spans several `\marker` tokens.
    ToolboxDelimited,
}

fn split_whitespace_runs(text: &str) -> Vec<String> {
    WHITESPACE_REGEX
        .split(text)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}

/// Splits an utterance into orthographic words; an empty utterance has no
/// words.
pub fn utterance_words(utterance: &str) -> Vec<String> {
    split_whitespace_runs(utterance)
}

fn split_toolbox(tier: &str) -> Vec<String> {
    let delimiter_adjacent = |prev: Option<char>, next: Option<char>| {
        matches!(prev, Some('-') | Some('=')) || matches!(next, Some('-') | Some('='))
    };

    let mut words = Vec::new();
    let mut piece_start = 0;
    for run in WHITESPACE_REGEX.find_iter(tier) {
        let prev = tier[..run.start()].chars().next_back();
        let next = tier[run.end()..].chars().next();
        if delimiter_adjacent(prev, next) {
            continue;
        }
        words.push(tier[piece_start..run.start()].to_string());
        piece_start = run.end();
    }
    words.push(tier[piece_start..].to_string());
    // whitespace at either edge of the tier leaves an empty piece behind
    words.retain(|word| !word.is_empty());
    words
}

/// Splits a morphology tier into morpheme-words under the given boundary
/// rule; an empty tier has no morpheme-words.
pub fn morpheme_words(tier: &str, boundary: WordBoundary) -> Vec<String> {
    if tier.is_empty() {
        return Vec::new();
    }
    match boundary {
        WordBoundary::Whitespace => split_whitespace_runs(tier),
        WordBoundary::CliticPromotion => CLITIC_REGEX.split(tier).map(String::from).collect(),
        WordBoundary::ToolboxDelimited => split_toolbox(tier),
    }
}
