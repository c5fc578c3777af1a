//! Actual and target forms of a CHAT utterance.
//!
//! CHAT marks the difference between what a speaker produced and what they
//! presumably meant inside the utterance itself: shortenings `w(or)d`,
//! fragments `&frag`, and replacements `word [: words]`. Resolving those
//! markers yields two readings of the same utterance, the *actual* form
//! (as pronounced) and the *target* form (as intended). The rules apply in
//! a fixed order; each rule sees the previous rule's output. Retracing
//! markers (`[/]`, `[//]`) and repetitions (`[x N]`) are left in place here
//! and handled by the cleaning pipeline.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SHORTENING_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\S+?\)").unwrap());
static FRAGMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|\s)&([^-=\s]\S*)").unwrap());
static REPLACEMENT_SCOPED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(.*?)> ?\[: .*?\]").unwrap());
static REPLACEMENT_WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\S+) ?\[: .*?\]").unwrap());
static REPLACEMENT_TARGET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:<.*?>|\S+) ?\[: (.*?)\]").unwrap());
static ALTERNATIVE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:<.*?>|\S+) \[=\? (.*?)\]").unwrap());
static ALTERNATIVE_SCOPED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(.*?)> \[=\? .*?\]").unwrap());
static ALTERNATIVE_WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\S+) \[=\? .*?\]").unwrap());

/// True when the span borders non-whitespace on either side, i.e. the
/// parentheses sit inside a word rather than standing alone.
fn word_attached(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start]
        .chars()
        .next_back()
        .map_or(false, |c| !c.is_whitespace());
    let after = text[end..]
        .chars()
        .next()
        .map_or(false, |c| !c.is_whitespace());
    before || after
}

/// Shortenings, actual form: `w(or)d` → `wd`.
pub fn shortening_actual(utterance: &str) -> String {
    let mut out = String::with_capacity(utterance.len());
    let mut last = 0;
    for m in SHORTENING_REGEX.find_iter(utterance) {
        if word_attached(utterance, m.start(), m.end()) {
            out.push_str(&utterance[last..m.start()]);
            last = m.end();
        }
    }
    out.push_str(&utterance[last..]);
    out
}

/// Shortenings, target form: `w(or)d` → `word`.
pub fn shortening_target(utterance: &str) -> String {
    let mut out = String::with_capacity(utterance.len());
    let mut last = 0;
    for m in SHORTENING_REGEX.find_iter(utterance) {
        if word_attached(utterance, m.start(), m.end()) {
            out.push_str(&utterance[last..m.start()]);
            out.push_str(&utterance[m.start() + 1..m.end() - 1]);
            last = m.end();
        }
    }
    out.push_str(&utterance[last..]);
    out
}

/// Fragments, actual form: `&frag` → `frag`. Event markers (`&=`) and
/// fillers (`&-`) are not fragments and stay untouched.
pub fn fragment_actual(utterance: &str) -> String {
    FRAGMENT_REGEX
        .replace_all(utterance, "${1}${2}")
        .into_owned()
}

/// Fragments, target form: `&frag` → `xxx` (untranscribed).
pub fn fragment_target(utterance: &str) -> String {
    FRAGMENT_REGEX
        .replace_all(utterance, "${1}xxx")
        .into_owned()
}

/// Replacements, actual form: the produced material is kept, the
/// `[: ...]` correction dropped.
pub fn replacement_actual(utterance: &str) -> String {
    let scoped = REPLACEMENT_SCOPED_REGEX.replace_all(utterance, "${1}");
    REPLACEMENT_WORD_REGEX
        .replace_all(&scoped, "${1}")
        .into_owned()
}

/// Replacements, target form: the correction is kept; multi-word
/// corrections collapse to one word joined by underscores.
pub fn replacement_target(utterance: &str) -> String {
    REPLACEMENT_TARGET_REGEX
        .replace_all(utterance, |caps: &Captures| caps[1].replace(' ', "_"))
        .into_owned()
}

/// Alternative transcriptions `word [=? words]`, actual form: the
/// alternative wins.
pub fn alternative_actual(utterance: &str) -> String {
    ALTERNATIVE_REGEX.replace_all(utterance, "${1}").into_owned()
}

/// Alternative transcriptions, target form: the original form wins.
pub fn alternative_target(utterance: &str) -> String {
    let scoped = ALTERNATIVE_SCOPED_REGEX.replace_all(utterance, "${1}");
    ALTERNATIVE_WORD_REGEX
        .replace_all(&scoped, "${1}")
        .into_owned()
}

/// Resolves the actual form of an utterance: shortenings, then fragments,
/// then replacements; alternatives last where the corpus uses them.
pub fn actual_form(utterance: &str, alternatives: bool) -> String {
    let resolved = replacement_actual(&fragment_actual(&shortening_actual(utterance)));
    if alternatives {
        alternative_actual(&resolved)
    } else {
        resolved
    }
}

/// Resolves the target form of an utterance, in the same rule order as
/// [`actual_form`].
pub fn target_form(utterance: &str, alternatives: bool) -> String {
    let resolved = replacement_target(&fragment_target(&shortening_target(utterance)));
    if alternatives {
        alternative_target(&resolved)
    } else {
        resolved
    }
}
