//! Built-in corpus profiles.
//!
//! One constructor per corpus the system was developed against. The CHAT
//! profiles share a base (reserved record keys plus the conventional
//! `add`/`eng`/`com`-family annotation tiers); the Toolbox profiles share
//! the ELAN-exported tier names. Everything a profile sets here is corpus
//! convention, not parser behavior.

use crate::model::Record;
use crate::morphology::MorphemeStyle;
use crate::segmenting::WordBoundary;

use super::{
    CorpusProfile, MorphemeLanguage, SentenceTypeRule, TierCleanStep, TierTable, Timestamps,
    TranscriptFormat, WordLanguages,
};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| name.to_string()).collect()
}

fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

fn chat_base(name: &str) -> CorpusProfile {
    let mut profile = CorpusProfile::new(name, TranscriptFormat::Chat);
    profile.tiers = TierTable {
        utterance: names(&[Record::UTTERANCE]),
        speaker: names(&[Record::SPEAKER]),
        start: names(&[Record::START]),
        end: names(&[Record::END]),
        addressee: names(&["add"]),
        translation: names(&["eng"]),
        comment: names(&["com", "sit", "act", "exp"]),
        ..TierTable::default()
    };
    profile
}

fn toolbox_base(name: &str) -> CorpusProfile {
    let mut profile = CorpusProfile::new(name, TranscriptFormat::Toolbox);
    profile.tiers = TierTable {
        utterance: names(&["tx"]),
        target: names(&["target"]),
        segment: names(&["mb"]),
        gloss: names(&["ge"]),
        pos: names(&["ps"]),
        language: names(&["lg"]),
        lemma_id: names(&["lemma_id"]),
        translation: names(&["eng"]),
        comment: names(&["comment"]),
        addressee: names(&["add"]),
        speaker: names(&["ELANParticipant"]),
        start: names(&["ELANBegin"]),
        end: names(&["ELANEnd"]),
        source_id: names(&["ref"]),
    };
    profile.style = MorphemeStyle::Spaces;
    profile.boundary = WordBoundary::ToolboxDelimited;
    profile.sentence_rule = SentenceTypeRule::TrailingPunctuation;
    profile.utterance_cleaning = vec![TierCleanStep::UnifyUnknown];
    profile
}

/// English Manchester corpus: all three morphology roles packed into `%mor`,
/// the translation mirroring the utterance itself, second-language material
/// tagged `L2`.
pub fn english() -> CorpusProfile {
    let mut profile = chat_base("english");
    profile.tiers.segment = names(&["mor"]);
    profile.tiers.gloss = names(&["mor"]);
    profile.tiers.pos = names(&["mor"]);
    profile.tiers.translation = names(&[Record::UTTERANCE]);
    profile.word_languages = WordLanguages {
        default: "English".to_string(),
        suffixes: pairs(&[("@s:fra", "French"), ("@s:ita", "Italian")]),
    };
    profile.morpheme_language = MorphemeLanguage::PosExact {
        pos: "L2".to_string(),
        language: "FOREIGN".to_string(),
        default: "English".to_string(),
    };
    profile.tier_cleaning = vec![
        TierCleanStep::RemoveTerminator,
        TierCleanStep::RemoveNonWords,
        TierCleanStep::RemoveOmissions,
    ];
    profile
}

/// Turkish: `%xmor` morphology, timestamps as a `start-end` range on `%tim`.
pub fn turkish() -> CorpusProfile {
    let mut profile = chat_base("turkish");
    profile.tiers.segment = names(&["xmor"]);
    profile.tiers.gloss = names(&["xmor"]);
    profile.tiers.pos = names(&["xmor"]);
    profile.tiers.start = names(&["tim"]);
    profile.tiers.end = names(&["tim"]);
    profile.timestamps = Timestamps::Range;
    profile.word_languages = WordLanguages {
        default: "Turkish".to_string(),
        suffixes: pairs(&[
            ("@s:eng", "English"),
            ("@s:deu", "German"),
            ("@s:rus", "Russian"),
        ]),
    };
    profile.tier_cleaning = vec![TierCleanStep::RemoveTerminator];
    profile
}

/// Japanese Miyata: `%xmor` morphology in the positional convention.
pub fn japanese_miyata() -> CorpusProfile {
    let mut profile = chat_base("japanese_miyata");
    profile.tiers.segment = names(&["xmor"]);
    profile.tiers.gloss = names(&["xmor"]);
    profile.tiers.pos = names(&["xmor"]);
    profile.word_languages = WordLanguages {
        default: "Japanese".to_string(),
        suffixes: pairs(&[("@s:eng", "English"), ("@s:deu", "German")]),
    };
    profile.tier_cleaning = vec![TierCleanStep::RemoveTerminator];
    profile
}

/// Inuktitut: `%xmor` written as `POS|segment^gloss` morphemes joined `+`,
/// alternative transcriptions honored, raw `%tim` start times, English
/// material marked by `@e` on the segment.
pub fn inuktitut() -> CorpusProfile {
    let mut profile = chat_base("inuktitut");
    profile.tiers.segment = names(&["xmor"]);
    profile.tiers.gloss = names(&["xmor"]);
    profile.tiers.pos = names(&["xmor"]);
    profile.tiers.start = names(&["tim"]);
    profile.tiers.end = Vec::new();
    profile.style = MorphemeStyle::PipeCaret;
    profile.alternatives = true;
    profile.morpheme_language = MorphemeLanguage::SegmentSuffix {
        suffix: "@e".to_string(),
        language: "English".to_string(),
        default: "Inuktitut".to_string(),
    };
    profile.tier_cleaning = vec![
        TierCleanStep::RemoveTerminator,
        TierCleanStep::NullEvents,
        TierCleanStep::UnifyUntranscribed,
        TierCleanStep::RemoveSeparators,
        TierCleanStep::RemoveScopedSymbols,
    ];
    profile
}

/// Nungon: segments on `%xgls` (falling back to `%gls`), gloss and POS
/// combined on `%xcod` in the caret convention, `=`-clitics promoted to
/// their own morpheme-words, language coded as a POS prefix.
pub fn nungon() -> CorpusProfile {
    let mut profile = chat_base("nungon");
    profile.tiers.segment = names(&["xgls", "gls"]);
    profile.tiers.gloss = names(&["xcod"]);
    profile.tiers.pos = names(&["xcod"]);
    profile.style = MorphemeStyle::CaretStem;
    profile.boundary = WordBoundary::CliticPromotion;
    profile.morpheme_language = MorphemeLanguage::PosPrefix {
        prefixes: pairs(&[("eng", "English"), ("tp", "Tok Pisin")]),
        default: "Nungon".to_string(),
    };
    profile.tier_cleaning = vec![
        TierCleanStep::RemoveScopedSymbols,
        TierCleanStep::RemoveEvents,
        TierCleanStep::RemoveTerminator,
        TierCleanStep::NullUntranscribed,
    ];
    profile.seg_tier_cleaning = vec![TierCleanStep::RemoveParentheses];
    profile
}

/// Generic Toolbox corpus with the stock `mb`/`ge`/`ps`/`lg` tier names.
pub fn toolbox() -> CorpusProfile {
    toolbox_base("toolbox")
}

/// Chintang: Toolbox with its own tier names (`gw` utterance, `mph`
/// segments) and the sentence type read off the Nepali translation tier.
pub fn chintang() -> CorpusProfile {
    let mut profile = toolbox_base("chintang");
    profile.tiers.utterance = names(&["gw"]);
    profile.tiers.segment = names(&["mph"]);
    profile.tiers.gloss = names(&["mgl"]);
    profile.tiers.pos = names(&["ps"]);
    profile.tiers.language = names(&["lg"]);
    profile.tiers.lemma_id = names(&["id"]);
    profile.sentence_rule = SentenceTypeRule::NepaliDanda;
    profile.seg_tier_cleaning = vec![
        TierCleanStep::RemovePunctuation,
        TierCleanStep::UnifyUnknown,
    ];
    profile
}

/// Russian: Toolbox where `mor` carries gloss and POS at the word level and
/// the morpheme language derives from the same tier. Punctuation tokens come
/// out of the utterance and of every tier, which keeps the word counts in
/// step.
pub fn russian() -> CorpusProfile {
    let mut profile = toolbox_base("russian");
    profile.tiers.utterance = names(&["text"]);
    profile.tiers.speaker = names(&["EUDICOp"]);
    profile.tiers.segment = names(&["lem"]);
    profile.tiers.gloss = names(&["mor"]);
    profile.tiers.pos = names(&["mor"]);
    profile.tiers.language = names(&["mor"]);
    profile.tiers.lemma_id = Vec::new();
    profile.style = MorphemeStyle::GlossPos;
    profile.boundary = WordBoundary::Whitespace;
    profile.tier_cleaning = vec![TierCleanStep::RemoveAnnotationTags];
    profile.seg_tier_cleaning = vec![
        TierCleanStep::RemovePunctuation,
        TierCleanStep::RemoveDashes,
        TierCleanStep::UnifyUnknown,
    ];
    profile.utterance_cleaning = vec![
        TierCleanStep::RemovePunctuation,
        TierCleanStep::UnifyUnknown,
        TierCleanStep::RemoveFloatingDashes,
        TierCleanStep::RemoveInsecureMarkers,
        TierCleanStep::RemoveEqualSigns,
    ];
    profile
}
