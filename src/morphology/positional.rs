//! The positional morpheme convention of CHILDES `%mor`-style tiers.
//!
//! A morpheme-word bundles every role into one string:
//!
//! ```text
//! prefix#POS|stem&fus-SFX~POS|clitic=stemgloss_SFXGLOSS
//! ```
//!
//! Prefixes run up to a `#`, the stem carries its POS left of a `|`,
//! suffixes follow `-`. Compound words are `+`-joined with the
//! whole-compound POS as the first group (`n|+n|apple+n|tree`); that head
//! is dropped, its attached prefixes are kept, and each part's segment
//! gains a leading `=`. Clitics are `~`-attached groups with their own
//! POS. A trailing `=gloss` names the stem gloss for every stem in the
//! word; a `_SUBGLOSS` tail glosses the first suffix that is written as a
//! bare segment. A suffix `GLOSS:seg` spells its own segment unless the
//! label is `contr`.
//!
//! Prefix and stem glosses mirror the segment when nothing names them; a
//! stem with no `|` separator cannot be trusted and degrades to the
//! unknown marker.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Triple;

/// Morphemes of one word group: a prefix runs to `#`, a suffix starts at
/// `-`, anything else is the stem.
static MORPHEME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^#]+#|[^\-]+|[\-][^\-]+").unwrap());

/// Word-final `=gloss` material.
static STEM_GLOSS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.+)=(\S+)$").unwrap());

/// Splits the stem gloss from a trailing `_SUBGLOSS`.
static SUBGLOSS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.*?)(_([A-Z_]+))?$").unwrap());

/// Suffix written `GLOSS:seg`.
static COLON_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^:]+)(:(.*))?").unwrap());

/// Prefix chain of a compound head (`pfx#n|`).
static HEAD_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^#]+)#").unwrap());

struct Group<'t> {
    text: &'t str,
    clitic: bool,
}

/// Tokenizes one positional morpheme-word into its ordered triples.
pub fn morphemes(word: &str) -> Vec<Triple> {
    let (word, stem_gloss, mut suffix_gloss) = split_stem_gloss(word);
    let groups = split_groups(&word);
    let compound = groups[0].text.ends_with('|');

    let mut out = Vec::new();
    for (at, group) in groups.iter().enumerate() {
        if compound && at == 0 {
            // the head carries the whole-compound POS, which is dropped,
            // plus any prefixes attached to the whole compound
            for caps in HEAD_PREFIX_REGEX.captures_iter(group.text) {
                out.push(prefix_triple(&caps[1]));
            }
            continue;
        }
        for m in MORPHEME_REGEX.find_iter(group.text) {
            let morpheme = m.as_str();
            if morpheme.ends_with('#') {
                out.push(prefix_triple(morpheme.trim_end_matches('#')));
            } else if let Some(sfx) = morpheme.strip_prefix('-') {
                out.push(suffix_triple(sfx, &mut suffix_gloss));
            } else {
                out.push(stem_triple(morpheme, &stem_gloss, compound, group.clitic));
            }
        }
    }
    out
}

/// Cuts the trailing `=gloss_SUBGLOSS` material off the word, returning the
/// remaining word, the stem gloss and the suffix subgloss.
fn split_stem_gloss(word: &str) -> (String, String, String) {
    let Some(caps) = STEM_GLOSS_REGEX.captures(word) else {
        return (word.to_string(), String::new(), String::new());
    };
    let rest = caps[1].to_string();
    let gloss_part = caps[2].to_string();
    if let Some(sub) = SUBGLOSS_REGEX.captures(&gloss_part) {
        let stem_gloss = sub[1].to_string();
        let suffix_gloss = sub.get(3).map(|m| m.as_str().to_string()).unwrap_or_default();
        (rest, stem_gloss, suffix_gloss)
    } else {
        (rest, gloss_part, String::new())
    }
}

/// Splits a word into its `+`/`~`-separated groups, remembering which
/// groups a `~` promoted.
fn split_groups(word: &str) -> Vec<Group<'_>> {
    let mut groups = Vec::new();
    let mut start = 0;
    let mut clitic = false;
    for (at, ch) in word.char_indices() {
        if ch == '+' || ch == '~' {
            groups.push(Group {
                text: &word[start..at],
                clitic,
            });
            clitic = ch == '~';
            start = at + ch.len_utf8();
        }
    }
    groups.push(Group {
        text: &word[start..],
        clitic,
    });
    groups
}

fn prefix_triple(pfx: &str) -> Triple {
    Triple::new(pfx, pfx, "pfx")
}

fn suffix_triple(sfx: &str, suffix_gloss: &mut String) -> Triple {
    if let Some(caps) = COLON_SUFFIX_REGEX.captures(sfx) {
        if let Some(seg) = caps.get(3) {
            if seg.as_str() != "contr" {
                return Triple::new(seg.as_str(), &caps[1], "sfx");
            }
        }
    }
    if is_bare_segment(sfx) {
        // an unlabelled suffix names its segment; the word-level subgloss
        // (if any) glosses the first one
        let gloss = std::mem::take(suffix_gloss);
        return Triple::new(sfx, gloss, "sfx");
    }
    Triple::new("", sfx, "sfx")
}

fn stem_triple(morpheme: &str, stem_gloss: &str, compound: bool, clitic: bool) -> Triple {
    let (pos, segment) = match morpheme.split_once('|') {
        Some((pos, segment)) => (pos.to_string(), segment.to_string()),
        None => ("???".to_string(), "???".to_string()),
    };
    let gloss = if stem_gloss.is_empty() {
        segment.clone()
    } else {
        stem_gloss.to_string()
    };
    let segment = if compound {
        format!("={}", segment)
    } else {
        segment
    };
    Triple {
        segment,
        gloss,
        pos,
        clitic,
    }
}

/// A suffix written entirely in lowercase is a segment, not a gloss label.
fn is_bare_segment(s: &str) -> bool {
    s.chars().any(char::is_lowercase) && !s.chars().any(char::is_uppercase)
}
