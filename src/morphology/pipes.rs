//! The `POS|segment^gloss` convention.
//!
//! Morphemes are `+`-joined; each carries its POS chain left of the last
//! `|`, its segment between `|` and `^`, and its gloss after the `^`. A
//! morpheme that does not fit the shape yields an all-empty triple rather
//! than being dropped, so positions stay countable.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Triple;

static MORPHEME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.*)\|(.*?)\^(.*)").unwrap());

/// Tokenizes one pipe-caret morpheme-word into its ordered triples.
pub fn morphemes(word: &str) -> Vec<Triple> {
    word.split('+')
        .map(|morpheme| match MORPHEME_REGEX.captures(morpheme) {
            Some(caps) => Triple::new(&caps[2], &caps[3], &caps[1]),
            None => Triple::default(),
        })
        .collect()
}
