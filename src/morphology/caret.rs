//! The caret-stem convention of combined gloss/POS tiers.
//!
//! Morphemes are `-`-separated. The stem is the morpheme carrying a caret,
//! `POS^gloss`; everything before it is a prefix, everything after it a
//! suffix, both written as bare glosses. A word without a stem marker
//! yields glosses only, with every POS left empty.
//!
//! Segments live on their own tier and split on plain dashes.

use once_cell::sync::Lazy;
use regex::Regex;

/// `POS^gloss` stem; the POS reaches up to the last caret.
static STEM_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.*)\^(.*)").unwrap());

/// Segment units of one morpheme-word of the segment tier.
pub fn segments(word: &str) -> Vec<String> {
    if word.is_empty() {
        return Vec::new();
    }
    word.split('-').map(String::from).collect()
}

/// `(gloss, pos)` units of one morpheme-word of the combined tier.
pub fn gloss_pos(word: &str) -> Vec<(String, String)> {
    if !word.contains('^') {
        return word
            .split('-')
            .map(|gloss| (gloss.to_string(), String::new()))
            .collect();
    }

    let mut out = Vec::new();
    let mut stem_passed = false;
    for morpheme in word.split('-') {
        if morpheme.contains('^') {
            if let Some(caps) = STEM_REGEX.captures(morpheme) {
                out.push((caps[2].to_string(), caps[1].to_string()));
            }
            stem_passed = true;
        } else if stem_passed {
            out.push((morpheme.to_string(), "sfx".to_string()));
        } else {
            out.push((morpheme.to_string(), "pfx".to_string()));
        }
    }
    out
}

pub fn glosses(word: &str) -> Vec<String> {
    gloss_pos(word).into_iter().map(|(gloss, _)| gloss).collect()
}

pub fn poses(word: &str) -> Vec<String> {
    gloss_pos(word).into_iter().map(|(_, pos)| pos).collect()
}
