//! Utterance terminators and sentence types.
//!
//! CHAT ends every utterance with a terminator drawn from a closed set of
//! punctuation sequences; the terminator encodes the sentence type (plain
//! statement, question, trail off, interruption, ...). The mapping below is
//! fixed and reproduced verbatim; unknown terminators map to the empty
//! string rather than an error.

use once_cell::sync::Lazy;
use regex::Regex;

static TERMINATOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([+/.!?"]*[!?.])(\s*\[\+|\s*$)"#).unwrap());

/// Extracts the terminator of an utterance, or `""` if there is none.
///
/// The terminator is the final punctuation sequence, tolerating a trailing
/// `[+ ...]` postcode after it.
pub fn utterance_terminator(utterance: &str) -> &str {
    TERMINATOR_REGEX
        .captures(utterance)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str())
}

/// Maps a terminator to its sentence type, `""` for unknown terminators.
pub fn terminator_type(terminator: &str) -> &'static str {
    match terminator {
        "." => "default",
        "?" => "question",
        "!" => "exclamation",
        "+." => "transcription break",
        "+..." => "trail off",
        "+..?" => "trail off of question",
        "+!?" => "question with exclamation",
        "+/." => "interruption",
        "+/?" => "interruption of a question",
        "+//." => "self-interruption",
        "+//?" => "self-interrupted question",
        "+\"/." => "quotation follows",
        "+\"." => "quotation precedes",
        _ => "",
    }
}

/// Infers the sentence type of an utterance from its terminator.
pub fn sentence_type(utterance: &str) -> &'static str {
    terminator_type(utterance_terminator(utterance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminator_extraction() {
        assert_eq!(utterance_terminator("ke eng ?"), "?");
        assert_eq!(utterance_terminator("ke ntencha ncha ."), ".");
        assert_eq!(utterance_terminator("I'm done +..."), "+...");
        assert_eq!(utterance_terminator("no terminator here"), "");
        assert_eq!(utterance_terminator(""), "");
    }

    #[test]
    fn test_terminator_before_postcode() {
        assert_eq!(utterance_terminator("ba . [+ IMIT]"), ".");
        assert_eq!(utterance_terminator("oh no ! [+ EXCL]"), "!");
    }

    #[test]
    fn test_mid_utterance_punctuation_is_not_a_terminator() {
        // only the final punctuation counts
        assert_eq!(utterance_terminator("Mr. Smith came ?"), "?");
    }

    #[test]
    fn test_terminator_table() {
        assert_eq!(terminator_type("."), "default");
        assert_eq!(terminator_type("?"), "question");
        assert_eq!(terminator_type("!"), "exclamation");
        assert_eq!(terminator_type("+."), "transcription break");
        assert_eq!(terminator_type("+..."), "trail off");
        assert_eq!(terminator_type("+..?"), "trail off of question");
        assert_eq!(terminator_type("+!?"), "question with exclamation");
        assert_eq!(terminator_type("+/."), "interruption");
        assert_eq!(terminator_type("+/?"), "interruption of a question");
        assert_eq!(terminator_type("+//."), "self-interruption");
        assert_eq!(terminator_type("+//?"), "self-interrupted question");
        assert_eq!(terminator_type("+\"/."), "quotation follows");
        assert_eq!(terminator_type("+\"."), "quotation precedes");
        assert_eq!(terminator_type("++."), "");
        assert_eq!(terminator_type(""), "");
    }

    #[test]
    fn test_sentence_type_of_utterance() {
        assert_eq!(sentence_type("this is a test +..?"), "trail off of question");
        assert_eq!(sentence_type("ke eng ?"), "question");
        assert_eq!(sentence_type("sm(ik)wane ."), "default");
        assert_eq!(sentence_type("unterminated"), "");
    }
}
