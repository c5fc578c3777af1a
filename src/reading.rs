//! Uniform access to one record's annotations.
//!
//! A [`FormatReader`] answers the questions session assembly asks of a
//! record: the utterance and its disfluency-resolved forms, the speaker,
//! timestamps, translation, comments and the morphology tiers. Which tier
//! answers which question is corpus data (the [`CorpusProfile`]'s tier
//! table), so the trait carries the shared accessors as default methods and
//! the two wire formats implement only what genuinely differs: how the
//! actual and target utterance forms come about. CHAT encodes both in one
//! main line through disfluency markup; Toolbox transcribes the actual form
//! and occasionally carries a separate target tier.
//!
//! Accessors answer from the raw record. Cleaning is the caller's concern;
//! a role the corpus does not annotate reads as `""`, never an error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::chat::{disfluencies, terminators};
use crate::corpora::{CorpusProfile, SentenceTypeRule, Timestamps};
use crate::model::Record;

static RANGE_START_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d:]+").unwrap());
static RANGE_END_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"-([\d:]+)").unwrap());

/// First listed tier with non-empty content.
fn resolve<'a>(record: &'a Record, names: &[String]) -> &'a str {
    for name in names {
        let content = record.tier(name);
        if !content.is_empty() {
            return content;
        }
    }
    ""
}

/// All listed tiers with non-empty content, joined.
fn resolve_joined(record: &Record, names: &[String], separator: &str) -> String {
    names
        .iter()
        .map(|name| record.tier(name))
        .filter(|content| !content.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn trailing_punctuation_type(text: &str) -> &'static str {
    match text.chars().next_back() {
        Some('.') => "default",
        Some('?') => "question",
        Some('!') => "exclamation",
        _ => "",
    }
}

fn nepali_danda_type(record: &Record, profile: &CorpusProfile) -> &'static str {
    let nepali = record.tier("nep");
    if !nepali.is_empty() {
        return match nepali.chars().next_back() {
            Some('।') => "default",
            Some('?') => "question",
            Some('!') => "exclamation",
            _ => "",
        };
    }
    // the English translation only ever codes questions and exclamations
    match resolve(record, &profile.tiers.translation)
        .chars()
        .next_back()
    {
        Some('?') => "question",
        Some('!') => "exclamation",
        _ => "",
    }
}

/// Uniform accessor contract over one parsed [`Record`].
pub trait FormatReader {
    /// The record being read.
    fn record(&self) -> &Record;

    /// The corpus profile in effect.
    fn profile(&self) -> &CorpusProfile;

    /// The utterance as the speaker produced it.
    fn actual_utterance(&self) -> String;

    /// The utterance as the speaker presumably intended it.
    fn target_utterance(&self) -> String;

    /// The raw utterance text.
    fn utterance(&self) -> String {
        resolve(self.record(), &self.profile().tiers.utterance).to_string()
    }

    /// Sentence type per the profile's rule; `""` when underivable.
    fn sentence_type(&self) -> &'static str {
        match self.profile().sentence_rule {
            SentenceTypeRule::Terminator => terminators::sentence_type(&self.utterance()),
            SentenceTypeRule::TrailingPunctuation => {
                trailing_punctuation_type(&self.utterance())
            }
            SentenceTypeRule::NepaliDanda => nepali_danda_type(self.record(), self.profile()),
        }
    }

    fn speaker_label(&self) -> String {
        resolve(self.record(), &self.profile().tiers.speaker).to_string()
    }

    fn addressee(&self) -> String {
        resolve(self.record(), &self.profile().tiers.addressee).to_string()
    }

    fn start_time(&self) -> String {
        let value = resolve(self.record(), &self.profile().tiers.start);
        match self.profile().timestamps {
            Timestamps::Plain => value.to_string(),
            Timestamps::Range => RANGE_START_REGEX
                .find(value)
                .map_or_else(String::new, |m| m.as_str().to_string()),
        }
    }

    fn end_time(&self) -> String {
        let value = resolve(self.record(), &self.profile().tiers.end);
        match self.profile().timestamps {
            Timestamps::Plain => value.to_string(),
            Timestamps::Range => RANGE_END_REGEX
                .captures(value)
                .and_then(|caps| caps.get(1))
                .map_or_else(String::new, |m| m.as_str().to_string()),
        }
    }

    fn translation(&self) -> String {
        resolve(self.record(), &self.profile().tiers.translation).to_string()
    }

    /// All comment tiers, joined by `"; "`.
    fn comment(&self) -> String {
        resolve_joined(self.record(), &self.profile().tiers.comment, "; ")
    }

    fn seg_tier(&self) -> String {
        resolve(self.record(), &self.profile().tiers.segment).to_string()
    }

    fn gloss_tier(&self) -> String {
        resolve(self.record(), &self.profile().tiers.gloss).to_string()
    }

    fn pos_tier(&self) -> String {
        resolve(self.record(), &self.profile().tiers.pos).to_string()
    }

    fn lang_tier(&self) -> String {
        resolve(self.record(), &self.profile().tiers.language).to_string()
    }

    fn id_tier(&self) -> String {
        resolve(self.record(), &self.profile().tiers.lemma_id).to_string()
    }

    /// Record-level source id (Toolbox `\ref` content); `""` for CHAT,
    /// whose ids derive from the file name instead.
    fn source_id(&self) -> String {
        resolve(self.record(), &self.profile().tiers.source_id).to_string()
    }
}

/// Reader over a CHAT record.
pub struct ChatAnnotations<'a> {
    record: &'a Record,
    profile: &'a CorpusProfile,
}

impl<'a> ChatAnnotations<'a> {
    pub fn new(record: &'a Record, profile: &'a CorpusProfile) -> ChatAnnotations<'a> {
        ChatAnnotations { record, profile }
    }
}

impl FormatReader for ChatAnnotations<'_> {
    fn record(&self) -> &Record {
        self.record
    }

    fn profile(&self) -> &CorpusProfile {
        self.profile
    }

    fn actual_utterance(&self) -> String {
        disfluencies::actual_form(&self.utterance(), self.profile.alternatives)
    }

    fn target_utterance(&self) -> String {
        disfluencies::target_form(&self.utterance(), self.profile.alternatives)
    }
}

/// Reader over a Toolbox record.
pub struct ToolboxAnnotations<'a> {
    record: &'a Record,
    profile: &'a CorpusProfile,
}

impl<'a> ToolboxAnnotations<'a> {
    pub fn new(record: &'a Record, profile: &'a CorpusProfile) -> ToolboxAnnotations<'a> {
        ToolboxAnnotations { record, profile }
    }
}

impl FormatReader for ToolboxAnnotations<'_> {
    fn record(&self) -> &Record {
        self.record
    }

    fn profile(&self) -> &CorpusProfile {
        self.profile
    }

    fn actual_utterance(&self) -> String {
        self.utterance()
    }

    fn target_utterance(&self) -> String {
        resolve(self.record, &self.profile.tiers.target).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpora::profiles;

    #[test]
    fn test_chat_reader_resolves_tiers() {
        let profile = profiles::english();
        let mut record = Record::new(0);
        record.insert(Record::SPEAKER, "CHI");
        record.insert(Record::UTTERANCE, "mama go(es) .");
        record.insert("mor", "n|mama v|go-3S .");
        record.insert("add", "MOT");
        record.insert("com", "first comment");
        record.insert("sit", "on the floor");
        let reader = ChatAnnotations::new(&record, &profile);

        assert_eq!(reader.utterance(), "mama go(es) .");
        assert_eq!(reader.speaker_label(), "CHI");
        assert_eq!(reader.addressee(), "MOT");
        assert_eq!(reader.seg_tier(), "n|mama v|go-3S .");
        assert_eq!(reader.gloss_tier(), "n|mama v|go-3S .");
        assert_eq!(reader.comment(), "first comment; on the floor");
        assert_eq!(reader.sentence_type(), "default");
        // English convention: the translation is the utterance itself
        assert_eq!(reader.translation(), "mama go(es) .");
    }

    #[test]
    fn test_chat_actual_and_target_forms() {
        let profile = profiles::english();
        let mut record = Record::new(0);
        record.insert(Record::UTTERANCE, "mama go(es) .");
        let reader = ChatAnnotations::new(&record, &profile);

        assert_eq!(reader.actual_utterance(), "mama go .");
        assert_eq!(reader.target_utterance(), "mama goes .");
    }

    #[test]
    fn test_chat_missing_tiers_read_empty() {
        let profile = profiles::english();
        let record = Record::new(0);
        let reader = ChatAnnotations::new(&record, &profile);

        assert_eq!(reader.utterance(), "");
        assert_eq!(reader.speaker_label(), "");
        assert_eq!(reader.start_time(), "");
        assert_eq!(reader.comment(), "");
        assert_eq!(reader.sentence_type(), "");
        assert_eq!(reader.id_tier(), "");
    }

    #[test]
    fn test_turkish_time_range() {
        let profile = profiles::turkish();
        let mut record = Record::new(3);
        record.insert(Record::UTTERANCE, "topu at .");
        record.insert("tim", "19:38-19:41");
        let reader = ChatAnnotations::new(&record, &profile);

        assert_eq!(reader.start_time(), "19:38");
        assert_eq!(reader.end_time(), "19:41");
    }

    #[test]
    fn test_turkish_time_without_end() {
        let profile = profiles::turkish();
        let mut record = Record::new(3);
        record.insert("tim", "19:38");
        let reader = ChatAnnotations::new(&record, &profile);

        assert_eq!(reader.start_time(), "19:38");
        assert_eq!(reader.end_time(), "");
    }

    #[test]
    fn test_inuktitut_raw_tim_and_alternatives() {
        let profile = profiles::inuktitut();
        let mut record = Record::new(1);
        record.insert(Record::UTTERANCE, "unatartualuk [=? unatartualuit] .");
        record.insert("tim", "00:01:32");
        let reader = ChatAnnotations::new(&record, &profile);

        assert_eq!(reader.start_time(), "00:01:32");
        assert_eq!(reader.end_time(), "");
        assert_eq!(reader.actual_utterance(), "unatartualuit .");
    }

    #[test]
    fn test_toolbox_reader_resolves_tiers() {
        let profile = profiles::toolbox();
        let mut record = Record::new(0);
        record.insert("ref", "session.001");
        record.insert("tx", "peiskasina okaoka ?");
        record.insert("ELANParticipant", "MOT");
        record.insert("ELANBegin", "00:00:21.600");
        record.insert("ELANEnd", "00:00:23.400");
        record.insert("eng", "shall we peel it");
        record.insert("mb", "peis -kasi -na okaoka");
        record.insert("ge", "peel -prog -3sg talk");
        let reader = ToolboxAnnotations::new(&record, &profile);

        assert_eq!(reader.utterance(), "peiskasina okaoka ?");
        assert_eq!(reader.actual_utterance(), "peiskasina okaoka ?");
        assert_eq!(reader.target_utterance(), "");
        assert_eq!(reader.source_id(), "session.001");
        assert_eq!(reader.speaker_label(), "MOT");
        assert_eq!(reader.start_time(), "00:00:21.600");
        assert_eq!(reader.end_time(), "00:00:23.400");
        assert_eq!(reader.translation(), "shall we peel it");
        assert_eq!(reader.seg_tier(), "peis -kasi -na okaoka");
        assert_eq!(reader.sentence_type(), "question");
    }

    #[test]
    fn test_toolbox_sentence_type_trailing_only() {
        let profile = profiles::toolbox();
        let mut record = Record::new(0);
        record.insert("tx", "ke eng");
        let reader = ToolboxAnnotations::new(&record, &profile);
        assert_eq!(reader.sentence_type(), "");

        let mut record = Record::new(1);
        record.insert("tx", "a ni hana.");
        let reader = ToolboxAnnotations::new(&record, &profile);
        assert_eq!(reader.sentence_type(), "default");
    }

    #[test]
    fn test_chintang_sentence_type_from_nepali() {
        let profile = profiles::chintang();

        let mut record = Record::new(0);
        record.insert("gw", "khel");
        record.insert("nep", "खेल्नुहोस् ।");
        let reader = ToolboxAnnotations::new(&record, &profile);
        assert_eq!(reader.sentence_type(), "default");

        let mut record = Record::new(1);
        record.insert("gw", "khel");
        record.insert("nep", "के ?");
        let reader = ToolboxAnnotations::new(&record, &profile);
        assert_eq!(reader.sentence_type(), "question");

        // no nep tier: the English translation codes only ? and !
        let mut record = Record::new(2);
        record.insert("gw", "khel");
        record.insert("eng", "play!");
        let reader = ToolboxAnnotations::new(&record, &profile);
        assert_eq!(reader.sentence_type(), "exclamation");

        let mut record = Record::new(3);
        record.insert("gw", "khel");
        record.insert("eng", "he plays.");
        let reader = ToolboxAnnotations::new(&record, &profile);
        assert_eq!(reader.sentence_type(), "");
    }

    #[test]
    fn test_russian_word_level_tiers() {
        let profile = profiles::russian();
        let mut record = Record::new(0);
        record.insert("EUDICOp", "MOT");
        record.insert("text", "где кот ?");
        record.insert("lem", "где кот");
        record.insert("mor", "ADV PRO-DEM-NOUN:NOM:SG");
        let reader = ToolboxAnnotations::new(&record, &profile);

        assert_eq!(reader.speaker_label(), "MOT");
        assert_eq!(reader.utterance(), "где кот ?");
        assert_eq!(reader.gloss_tier(), "ADV PRO-DEM-NOUN:NOM:SG");
        assert_eq!(reader.lang_tier(), "ADV PRO-DEM-NOUN:NOM:SG");
        assert_eq!(reader.sentence_type(), "question");
    }
}
