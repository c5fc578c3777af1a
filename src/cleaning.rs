//! Cleaning pipelines for utterances, words and dates.
//!
//! The transcript conventions leave markers in the text (terminators,
//! events, pauses, scoped `[...]` groups, ...) that must come out before
//! word splitting. Order is behavior here: every step sees the previous
//! step's output, and several steps rely on an earlier step having already
//! fired (repetition expansion must see the terminator removed, scoped-symbol
//! removal must run after repetition markers were consumed). The pipeline
//! never drops an utterance; the worst case is cleaning down to `""`.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static TERMINATOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[+/.!?"]*[!?.]( \[\+|$)"#).unwrap());
static UNTRANSCRIBED_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"xxx|yyy|www").unwrap());
static REPETITION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:<([^<]*?)>|(\S+))( \[.*?\])? ?\[x (\d+)\]").unwrap());
static EVENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"&=\S+").unwrap());
static OMISSION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"0\S+[^\]](\s|$)").unwrap());
static LINKER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^\+["^,+<]"#).unwrap());
static SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r" [,:;]( )").unwrap());
static CA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[↓↑‡„“”]").unwrap());
static PAUSE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\.{1,3}\)").unwrap());
static SCOPED_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<|>|\[.*?\]").unwrap());
static EVENT_ZERO_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b0\b").unwrap());
static WORD_PAUSE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\S+?)\^").unwrap());
static UNTRANSCRIBED_TIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\?|<?x{3,}>?)$").unwrap());
static UNKNOWN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"xxx?|www|\*{3}").unwrap());
static NON_WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"end\|end|cm\|cm|bq\|bq|eq\|eq").unwrap());
static PUNCTUATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[‘’'“”".!,:?+/]|&lt; "#).unwrap());
static FLOATING_DASH_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s-\s").unwrap());
static INSECURE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\s*=?.*?\]").unwrap());
static INSECURE_TARGET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[=\?\s+[^\]]+\]").unwrap());
static INSECURE_SYMBOL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"["\[\]?=]"#).unwrap());

/// Collapses whitespace runs to single spaces and strips the edges.
pub fn remove_redundant_whitespace(utterance: &str) -> String {
    WHITESPACE_REGEX
        .replace_all(utterance, " ")
        .trim_matches(' ')
        .to_string()
}

/// Removes the utterance terminator, tolerating a trailing `[+ ...]`
/// postcode after it.
pub fn remove_terminator(utterance: &str) -> String {
    remove_redundant_whitespace(&TERMINATOR_REGEX.replace_all(utterance, "${1}"))
}

/// Unifies untranscribed material (`xxx`, `yyy`, `www`) as `???`.
pub fn unify_untranscribed(utterance: &str) -> String {
    UNTRANSCRIBED_REGEX.replace_all(utterance, "???").into_owned()
}

/// Unifies the Toolbox unknown markers (`xx`, `xxx`, `www`, `***`) as `???`.
pub fn unify_unknown(text: &str) -> String {
    UNKNOWN_REGEX.replace_all(text, "???").into_owned()
}

/// Writes out `[x N]` repetitions: the scoped `<...>` group or preceding
/// word is repeated N times, keeping any scoped symbol attached to it.
pub fn handle_repetitions(utterance: &str) -> String {
    let mut clean = String::new();
    let mut last = 0;
    for caps in REPETITION_REGEX.captures_iter(utterance) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        clean.push_str(&utterance[last..whole.start()]);

        let mut words = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |m| m.as_str())
            .to_string();
        if let Some(scoped) = caps.get(3) {
            words.push_str(scoped.as_str());
        }
        let count: usize = caps[4].parse().unwrap_or(1);
        let repeated = vec![words; count].join(" ");
        clean.push_str(&repeated);

        last = whole.end();
    }
    clean.push_str(&utterance[last..]);
    if clean.is_empty() {
        utterance.to_string()
    } else {
        clean
    }
}

/// Removes event markers (`&=word`).
pub fn remove_events(utterance: &str) -> String {
    remove_redundant_whitespace(&EVENT_REGEX.replace_all(utterance, ""))
}

/// Removes omission markers (`0word`), except in null utterances that
/// start with `0[`.
pub fn remove_omissions(utterance: &str) -> String {
    if utterance.starts_with("0[") {
        return utterance.to_string();
    }
    remove_redundant_whitespace(&OMISSION_REGEX.replace_all(utterance, "${1}"))
}

/// Removes utterance-initial linkers (`+"`, `+^`, `+,`, `++`, `+<`).
pub fn remove_linkers(utterance: &str) -> String {
    LINKER_REGEX
        .replace(utterance, "")
        .trim_start_matches(' ')
        .to_string()
}

/// Removes separators: `,`, `:`, `;` surrounded by whitespace.
pub fn remove_separators(utterance: &str) -> String {
    SEPARATOR_REGEX.replace_all(utterance, "${1}").into_owned()
}

/// Removes conversation-analysis markers (`↓ ↑ ‡ „ “ ”`).
pub fn remove_ca(utterance: &str) -> String {
    remove_redundant_whitespace(&CA_REGEX.replace_all(utterance, ""))
}

/// Removes pauses between words: `(.)`, `(..)`, `(...)`.
pub fn remove_pauses_between_words(utterance: &str) -> String {
    remove_redundant_whitespace(&PAUSE_REGEX.replace_all(utterance, ""))
}

/// Removes scoped symbols: `<`, `>` and any bracketed `[...]` group.
pub fn remove_scoped_symbols(utterance: &str) -> String {
    remove_redundant_whitespace(&SCOPED_REGEX.replace_all(utterance, ""))
}

pub fn remove_commas(utterance: &str) -> String {
    utterance.replace(',', "")
}

/// Removes standalone `0` event codes; an utterance that was only an event
/// collapses to the empty string.
pub fn null_event_utterances(utterance: &str) -> String {
    remove_redundant_whitespace(&EVENT_ZERO_REGEX.replace_all(utterance, ""))
}

/// The full utterance-cleaning pipeline, in its fixed order.
pub fn clean_utterance(utterance: &str) -> String {
    let cleaners: [fn(&str) -> String; 12] = [
        remove_terminator,
        unify_untranscribed,
        handle_repetitions,
        remove_events,
        remove_omissions,
        remove_linkers,
        remove_separators,
        remove_ca,
        remove_pauses_between_words,
        remove_scoped_symbols,
        remove_commas,
        null_event_utterances,
    ];
    let mut clean = utterance.to_string();
    for cleaner in cleaners {
        clean = cleaner(&clean);
    }
    clean
}

/// Nulls a morphology tier consisting only of untranscribed material
/// (`?`, `xxx...`, `<xxx>`).
pub fn null_untranscribed_tier(tier: &str) -> String {
    if UNTRANSCRIBED_TIER_REGEX.is_match(tier) {
        String::new()
    } else {
        tier.to_string()
    }
}

/// Removes all parentheses, keeping their content.
pub fn remove_parentheses(tier: &str) -> String {
    tier.replace(['(', ')'], "")
}

/// Removes non-word markers (`end|end`, `cm|cm`, `bq|bq`, `eq|eq`).
pub fn remove_non_words(tier: &str) -> String {
    remove_redundant_whitespace(&NON_WORD_REGEX.replace_all(tier, ""))
}

/// Removes punctuation characters and the stray `&lt; ` artifact.
pub fn remove_punctuation(text: &str) -> String {
    remove_redundant_whitespace(&PUNCTUATION_REGEX.replace_all(text, ""))
}

/// Removes all dashes, word-internal ones included.
pub fn remove_dashes(text: &str) -> String {
    remove_redundant_whitespace(&text.replace('-', ""))
}

/// Removes dashes floating between words, leaving word-internal ones.
pub fn remove_floating_dashes(utterance: &str) -> String {
    remove_redundant_whitespace(&FLOATING_DASH_REGEX.replace_all(utterance, " "))
}

/// Removes insecure-transcription markers (`[?]`, `[=? word]`, `[xxx]`).
pub fn remove_insecure_markers(utterance: &str) -> String {
    remove_redundant_whitespace(&INSECURE_REGEX.replace_all(utterance, ""))
}

/// Intended forms carried by `[=? ...]` insecure-transcription markers.
pub fn insecure_targets(utterance: &str) -> Vec<String> {
    INSECURE_TARGET_REGEX
        .find_iter(utterance)
        .map(|marker| {
            INSECURE_SYMBOL_REGEX
                .replace_all(marker.as_str(), "")
                .trim()
                .to_string()
        })
        .collect()
}

/// Removes equal signs.
pub fn remove_equal_signs(utterance: &str) -> String {
    remove_redundant_whitespace(&utterance.replace('=', ""))
}

/// Removes the `PUNCT` and `ANNOT` placeholder tags and the stray
/// `<NA: lt;>` artifact.
pub fn remove_annotation_tags(tier: &str) -> String {
    remove_redundant_whitespace(
        &tier.replace("PUNCT", "").replace("ANNOT", "").replace("<NA: lt;> ", ""),
    )
}

/// Removes form markers: everything from `@` to the end of the word.
pub fn remove_form_markers(word: &str) -> String {
    match word.find('@') {
        Some(at) => word[..at].to_string(),
        None => word.to_string(),
    }
}

/// Removes drawl markers (`:` within or after the word).
pub fn remove_drawls(word: &str) -> String {
    word.replace(':', "")
}

/// Removes pauses within the word (`^`).
pub fn remove_pauses_within_words(word: &str) -> String {
    WORD_PAUSE_REGEX.replace_all(word, "${1}").into_owned()
}

/// Removes blocking markers (`^` or `≠` at the start of the word).
pub fn remove_blocking(word: &str) -> String {
    word.trim_start_matches('^').trim_start_matches('≠').to_string()
}

/// Removes filler markers: `&-` is dropped, `&word` keeps the word.
/// Event markers (`&=`) are left alone.
pub fn remove_filler(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut i = 0;
    while i < word.len() {
        let rest = &word[i..];
        if rest.starts_with("&-") {
            i += 2;
            continue;
        }
        if let Some(tail) = rest.strip_prefix('&') {
            if !tail.starts_with('=') {
                let run: usize = tail
                    .chars()
                    .take_while(|c| !c.is_whitespace())
                    .map(|c| c.len_utf8())
                    .sum();
                if run > 0 {
                    out.push_str(&tail[..run]);
                    i += 1 + run;
                    continue;
                }
            }
        }
        match rest.chars().next() {
            Some(c) => {
                out.push(c);
                i += c.len_utf8();
            }
            None => break,
        }
    }
    out
}

/// The full word-cleaning pipeline, in its fixed order.
pub fn clean_word(word: &str) -> String {
    let cleaners: [fn(&str) -> String; 5] = [
        remove_form_markers,
        remove_drawls,
        remove_pauses_within_words,
        remove_blocking,
        remove_filler,
    ];
    let mut clean = word.to_string();
    for cleaner in cleaners {
        clean = cleaner(&clean);
    }
    clean
}

/// Normalizes a `DD-MMM-YYYY` header date to `YYYY-MM-DD`; anything not in
/// that shape is returned unchanged.
pub fn clean_date(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    let [day, month, year] = parts.as_slice() else {
        return date.to_string();
    };
    let month_clean = match *month {
        "JAN" => "01",
        "FEB" => "02",
        "MAR" => "03",
        "APR" => "04",
        "MAY" => "05",
        "JUN" => "06",
        "JUL" => "07",
        "AUG" => "08",
        "SEP" => "09",
        "OCT" => "10",
        "NOV" => "11",
        "DEC" => "12",
        _ => return date.to_string(),
    };
    format!("{}-{}-{}", year, month_clean, day)
}
