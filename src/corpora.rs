//! Corpus configuration as data.
//!
//! Every corpus writes the same information into different tier names and
//! delimiter conventions. A [`CorpusProfile`] captures one corpus's
//! conventions as plain data: which tier carries each annotation role, which
//! tokenizer family cuts its morpheme-words, how word and morpheme languages
//! are coded, and which cleaning steps its morphology tiers need. The parser
//! has no per-corpus code paths; readers and the session cursor consult the
//! profile they were handed.
//!
//! Profiles live in a [`CorpusRegistry`] built once at startup and passed by
//! reference; [`CorpusRegistry::builtin`] ships the corpora the system was
//! developed against (see [`profiles`]).

pub mod profiles;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cleaning;
use crate::morphology::MorphemeStyle;
use crate::segmenting::WordBoundary;
use crate::warning::MorphTier;

/// Wire format of a corpus's transcript files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptFormat {
    Chat,
    Toolbox,
}

/// Which resolved utterance form fills `Word::word`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardForm {
    #[default]
    Actual,
    Target,
}

/// How the start/end tier values are to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timestamps {
    /// Tier values are the timestamps, verbatim.
    #[default]
    Plain,
    /// The start tier holds a `start-end` range; the start time is the first
    /// `[\d:]+` run, the end time the run after the dash.
    Range,
}

/// How the sentence type of a record is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceTypeRule {
    /// CHAT terminator grammar against the fixed terminator table.
    #[default]
    Terminator,
    /// Trailing `.`, `?` or `!` on the utterance, through the same table.
    TrailingPunctuation,
    /// Trailing punctuation of the `nep` translation tier, where the
    /// Devanagari danda stands for the default terminator; records without a
    /// `nep` tier fall back to `?`/`!` on the English translation.
    NepaliDanda,
}

/// Tier names serving each annotation role.
///
/// Each role lists the names to try in order; the first tier present with
/// non-empty content wins. An empty list means the corpus does not annotate
/// the role. The comment role is the one exception: all listed tiers
/// contribute, joined by `"; "`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTable {
    pub utterance: Vec<String>,
    /// Target-form utterance tier; Toolbox only. CHAT derives the target
    /// form from disfluency markup instead.
    pub target: Vec<String>,
    pub segment: Vec<String>,
    pub gloss: Vec<String>,
    pub pos: Vec<String>,
    pub language: Vec<String>,
    pub lemma_id: Vec<String>,
    pub translation: Vec<String>,
    pub comment: Vec<String>,
    pub addressee: Vec<String>,
    pub speaker: Vec<String>,
    pub start: Vec<String>,
    pub end: Vec<String>,
    pub source_id: Vec<String>,
}

/// Word-level language assignment from markers on the raw word.
///
/// CHAT codes switched words with `@s:` suffixes (`mange@s:fra`); the pairs
/// are checked in order against the raw, uncleaned word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordLanguages {
    /// Language of unmarked words; empty when the corpus does not code word
    /// languages.
    pub default: String,
    /// `(suffix, language)` pairs, e.g. `("@s:fra", "French")`.
    pub suffixes: Vec<(String, String)>,
}

impl WordLanguages {
    /// Language of one raw word.
    pub fn of_word(&self, word: &str) -> String {
        for (suffix, language) in &self.suffixes {
            if word.ends_with(suffix.as_str()) {
                return language.clone();
            }
        }
        self.default.clone()
    }
}

/// Morpheme-level language assignment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphemeLanguage {
    /// From the corpus's language tier, verbatim.
    #[default]
    Tier,
    /// One exact POS tag marks foreign material.
    PosExact {
        pos: String,
        language: String,
        default: String,
    },
    /// The POS tag's prefix codes the language.
    PosPrefix {
        prefixes: Vec<(String, String)>,
        default: String,
    },
    /// A suffix on the segment marks foreign material.
    SegmentSuffix {
        suffix: String,
        language: String,
        default: String,
    },
}

impl MorphemeLanguage {
    /// Language of one morpheme, given its segment, its POS tag and the
    /// aligned value of the language tier (empty when there is none).
    pub fn infer(&self, segment: &str, pos: &str, from_tier: &str) -> String {
        match self {
            MorphemeLanguage::Tier => from_tier.to_string(),
            MorphemeLanguage::PosExact {
                pos: tag,
                language,
                default,
            } => {
                if pos == tag {
                    language.clone()
                } else {
                    default.clone()
                }
            }
            MorphemeLanguage::PosPrefix { prefixes, default } => prefixes
                .iter()
                .find(|(prefix, _)| pos.starts_with(prefix.as_str()))
                .map(|(_, language)| language.clone())
                .unwrap_or_else(|| default.clone()),
            MorphemeLanguage::SegmentSuffix {
                suffix,
                language,
                default,
            } => {
                if segment.ends_with(suffix.as_str()) {
                    language.clone()
                } else {
                    default.clone()
                }
            }
        }
    }
}

/// One cleaning step over a morphology tier or a Toolbox utterance form.
/// Profiles list their steps in order; the default is no cleaning at all.
/// Order is behavior: punctuation removal eats `?`, so it must run before
/// any step that writes `???`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierCleanStep {
    RemoveTerminator,
    RemoveScopedSymbols,
    RemoveEvents,
    /// Tiers consisting only of untranscribed material (`?`, `xxx`, `<xxx>`)
    /// collapse to the empty string.
    NullUntranscribed,
    RemoveParentheses,
    RemoveNonWords,
    RemoveOmissions,
    /// Standalone `0` event codes come out.
    NullEvents,
    /// `xxx`, `yyy`, `www` become `???`.
    UnifyUntranscribed,
    /// The Toolbox unknown markers (`xx`, `xxx`, `www`, `***`) become `???`.
    UnifyUnknown,
    RemoveSeparators,
    RemovePunctuation,
    RemoveDashes,
    RemoveFloatingDashes,
    RemoveInsecureMarkers,
    RemoveEqualSigns,
    RemoveAnnotationTags,
}

impl TierCleanStep {
    pub fn apply(&self, tier: &str) -> String {
        match self {
            TierCleanStep::RemoveTerminator => cleaning::remove_terminator(tier),
            TierCleanStep::RemoveScopedSymbols => cleaning::remove_scoped_symbols(tier),
            TierCleanStep::RemoveEvents => cleaning::remove_events(tier),
            TierCleanStep::NullUntranscribed => cleaning::null_untranscribed_tier(tier),
            TierCleanStep::RemoveParentheses => cleaning::remove_parentheses(tier),
            TierCleanStep::RemoveNonWords => cleaning::remove_non_words(tier),
            TierCleanStep::RemoveOmissions => cleaning::remove_omissions(tier),
            TierCleanStep::NullEvents => cleaning::null_event_utterances(tier),
            TierCleanStep::UnifyUntranscribed => cleaning::unify_untranscribed(tier),
            TierCleanStep::UnifyUnknown => cleaning::unify_unknown(tier),
            TierCleanStep::RemoveSeparators => cleaning::remove_separators(tier),
            TierCleanStep::RemovePunctuation => cleaning::remove_punctuation(tier),
            TierCleanStep::RemoveDashes => cleaning::remove_dashes(tier),
            TierCleanStep::RemoveFloatingDashes => cleaning::remove_floating_dashes(tier),
            TierCleanStep::RemoveInsecureMarkers => cleaning::remove_insecure_markers(tier),
            TierCleanStep::RemoveEqualSigns => cleaning::remove_equal_signs(tier),
            TierCleanStep::RemoveAnnotationTags => cleaning::remove_annotation_tags(tier),
        }
    }
}

/// Runs a cleaning step list over a tier, in order.
pub fn clean_tier(tier: &str, steps: &[TierCleanStep]) -> String {
    let mut tier = tier.to_string();
    for step in steps {
        tier = step.apply(&tier);
    }
    tier
}

/// Complete parsing configuration of one corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusProfile {
    /// Registry key, e.g. `"turkish"`.
    pub name: String,
    pub format: TranscriptFormat,
    /// Toolbox record-boundary marker; ignored for CHAT corpora.
    pub record_marker: String,
    pub tiers: TierTable,
    /// Tokenizer family for this corpus's morpheme-words.
    pub style: MorphemeStyle,
    /// Tier whose unit counts win when the sub-lists of a morpheme-word
    /// disagree.
    pub main_tier: MorphTier,
    /// Morpheme-word boundary rule of the morphology tiers.
    pub boundary: WordBoundary,
    pub standard_form: StandardForm,
    /// Whether `[=? ...]` alternative transcriptions replace the preceding
    /// material in the actual and target forms.
    pub alternatives: bool,
    pub timestamps: Timestamps,
    pub sentence_rule: SentenceTypeRule,
    pub word_languages: WordLanguages,
    pub morpheme_language: MorphemeLanguage,
    /// Cleaning applied to every morphology tier before word splitting.
    pub tier_cleaning: Vec<TierCleanStep>,
    /// Extra cleaning applied to the segment tier, before `tier_cleaning`.
    pub seg_tier_cleaning: Vec<TierCleanStep>,
    /// Cleaning applied to the actual and target utterance forms of Toolbox
    /// corpora. CHAT corpora run the fixed utterance pipeline instead.
    pub utterance_cleaning: Vec<TierCleanStep>,
}

impl CorpusProfile {
    /// A profile with neutral defaults: whitespace boundaries, gloss as the
    /// main tier, no languages coded, no tier cleaning.
    pub fn new(name: &str, format: TranscriptFormat) -> CorpusProfile {
        CorpusProfile {
            name: name.to_string(),
            format,
            record_marker: "ref".to_string(),
            tiers: TierTable::default(),
            style: MorphemeStyle::Positional,
            main_tier: MorphTier::Glosses,
            boundary: WordBoundary::Whitespace,
            standard_form: StandardForm::default(),
            alternatives: false,
            timestamps: Timestamps::default(),
            sentence_rule: SentenceTypeRule::default(),
            word_languages: WordLanguages::default(),
            morpheme_language: MorphemeLanguage::default(),
            tier_cleaning: Vec::new(),
            seg_tier_cleaning: Vec::new(),
            utterance_cleaning: Vec::new(),
        }
    }

    /// Cleans the segment tier: the segment-specific steps first, then the
    /// common morphology-tier steps.
    pub fn clean_seg_tier(&self, tier: &str) -> String {
        let tier = clean_tier(tier, &self.seg_tier_cleaning);
        clean_tier(&tier, &self.tier_cleaning)
    }

    /// Cleans a non-segment morphology tier.
    pub fn clean_morph_tier(&self, tier: &str) -> String {
        clean_tier(tier, &self.tier_cleaning)
    }

    /// Cleans a resolved Toolbox utterance form.
    pub fn clean_utterance(&self, utterance: &str) -> String {
        clean_tier(utterance, &self.utterance_cleaning)
    }
}

/// Configuration error, raised before any record parses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// Corpus name not present in the registry.
    UnknownCorpus(String),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::UnknownCorpus(name) => write!(f, "unknown corpus '{name}'"),
        }
    }
}

impl std::error::Error for ProfileError {}

/// Registry of corpus profiles, keyed by corpus name.
pub struct CorpusRegistry {
    profiles: HashMap<String, CorpusProfile>,
}

impl CorpusRegistry {
    /// Create a new empty registry.
    pub fn new() -> CorpusRegistry {
        CorpusRegistry {
            profiles: HashMap::new(),
        }
    }

    /// Registry with every built-in profile registered.
    pub fn builtin() -> CorpusRegistry {
        let mut registry = Self::new();

        registry.register(profiles::english());
        registry.register(profiles::turkish());
        registry.register(profiles::japanese_miyata());
        registry.register(profiles::inuktitut());
        registry.register(profiles::nungon());
        registry.register(profiles::toolbox());
        registry.register(profiles::chintang());
        registry.register(profiles::russian());

        registry
    }

    /// Register a profile.
    ///
    /// A profile with the same name replaces the previous one.
    pub fn register(&mut self, profile: CorpusProfile) {
        self.profiles.insert(profile.name.clone(), profile);
    }

    /// Get a profile by corpus name.
    pub fn get(&self, name: &str) -> Result<&CorpusProfile, ProfileError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ProfileError::UnknownCorpus(name.to_string()))
    }

    /// Check if a corpus is registered.
    pub fn has(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// List all registered corpus names (sorted).
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for CorpusRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = CorpusRegistry::new();
        assert!(registry.names().is_empty());
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = CorpusRegistry::new();
        registry.register(CorpusProfile::new("dene", TranscriptFormat::Toolbox));

        assert!(registry.has("dene"));
        let profile = registry.get("dene").unwrap();
        assert_eq!(profile.name, "dene");
        assert_eq!(profile.format, TranscriptFormat::Toolbox);
    }

    #[test]
    fn test_registry_get_unknown() {
        let registry = CorpusRegistry::new();
        let err = registry.get("klingon").unwrap_err();
        assert_eq!(err, ProfileError::UnknownCorpus("klingon".to_string()));
        assert_eq!(format!("{err}"), "unknown corpus 'klingon'");
    }

    #[test]
    fn test_registry_replace_profile() {
        let mut registry = CorpusRegistry::new();
        registry.register(CorpusProfile::new("dene", TranscriptFormat::Toolbox));
        registry.register(CorpusProfile::new("dene", TranscriptFormat::Chat));

        assert_eq!(registry.names().len(), 1);
        assert_eq!(
            registry.get("dene").unwrap().format,
            TranscriptFormat::Chat
        );
    }

    #[test]
    fn test_registry_builtin() {
        let registry = CorpusRegistry::builtin();
        assert_eq!(
            registry.names(),
            vec![
                "chintang",
                "english",
                "inuktitut",
                "japanese_miyata",
                "nungon",
                "russian",
                "toolbox",
                "turkish"
            ]
        );
    }

    #[test]
    fn test_registry_default_trait() {
        let registry = CorpusRegistry::default();
        assert!(registry.has("english"));
        assert!(registry.has("toolbox"));
    }

    #[test]
    fn test_word_languages() {
        let languages = WordLanguages {
            default: "Turkish".to_string(),
            suffixes: vec![
                ("@s:eng".to_string(), "English".to_string()),
                ("@s:deu".to_string(), "German".to_string()),
            ],
        };
        assert_eq!(languages.of_word("okay@s:eng"), "English");
        assert_eq!(languages.of_word("kitap"), "Turkish");
    }

    #[test]
    fn test_word_languages_uncoded() {
        let languages = WordLanguages::default();
        assert_eq!(languages.of_word("anything"), "");
    }

    #[test]
    fn test_morpheme_language_from_tier() {
        let rule = MorphemeLanguage::Tier;
        assert_eq!(rule.infer("seg", "pos", "Chintang"), "Chintang");
        assert_eq!(rule.infer("seg", "pos", ""), "");
    }

    #[test]
    fn test_morpheme_language_pos_exact() {
        let rule = MorphemeLanguage::PosExact {
            pos: "L2".to_string(),
            language: "FOREIGN".to_string(),
            default: "English".to_string(),
        };
        assert_eq!(rule.infer("oui", "L2", ""), "FOREIGN");
        assert_eq!(rule.infer("go", "v", ""), "English");
    }

    #[test]
    fn test_morpheme_language_pos_prefix() {
        let rule = MorphemeLanguage::PosPrefix {
            prefixes: vec![
                ("eng".to_string(), "English".to_string()),
                ("tp".to_string(), "Tok Pisin".to_string()),
            ],
            default: "Nungon".to_string(),
        };
        assert_eq!(rule.infer("", "engn", ""), "English");
        assert_eq!(rule.infer("", "tpv", ""), "Tok Pisin");
        assert_eq!(rule.infer("", "n", ""), "Nungon");
    }

    #[test]
    fn test_morpheme_language_segment_suffix() {
        let rule = MorphemeLanguage::SegmentSuffix {
            suffix: "@e".to_string(),
            language: "English".to_string(),
            default: "Inuktitut".to_string(),
        };
        assert_eq!(rule.infer("ball@e", "", ""), "English");
        assert_eq!(rule.infer("paaq", "VN", ""), "Inuktitut");
    }

    #[test]
    fn test_clean_tier_runs_steps_in_order() {
        let steps = [
            TierCleanStep::RemoveScopedSymbols,
            TierCleanStep::RemoveTerminator,
        ];
        assert_eq!(clean_tier("n^ke v^go .", &steps), "n^ke v^go");
        assert_eq!(clean_tier("anything", &[]), "anything");
    }

    #[test]
    fn test_profile_seg_cleaning_runs_before_common() {
        let mut profile = CorpusProfile::new("nungon", TranscriptFormat::Chat);
        profile.tier_cleaning = vec![TierCleanStep::RemoveTerminator];
        profile.seg_tier_cleaning = vec![TierCleanStep::RemoveParentheses];

        assert_eq!(profile.clean_seg_tier("to(ng) ."), "tong");
        assert_eq!(profile.clean_morph_tier("to(ng) ."), "to(ng)");
    }

    #[test]
    fn test_profile_utterance_cleaning() {
        let mut profile = CorpusProfile::new("russian", TranscriptFormat::Toolbox);
        profile.utterance_cleaning = vec![
            TierCleanStep::RemovePunctuation,
            TierCleanStep::UnifyUnknown,
            TierCleanStep::RemoveEqualSigns,
        ];

        assert_eq!(profile.clean_utterance("xxx кот = спит !"), "??? кот спит");
    }

    #[test]
    fn test_punctuation_before_unknown_markers() {
        // the ??? written by UnifyUnknown must survive the cleaning chain
        let steps = [TierCleanStep::RemovePunctuation, TierCleanStep::UnifyUnknown];
        assert_eq!(clean_tier("а xxx !", &steps), "а ???");
    }
}
