//! Structured alignment warnings.
//!
//! Misaligned annotation tiers are an everyday fact of hand-transcribed
//! corpora, so they are never fatal: the parser repairs what it can and
//! records what it repaired. Warnings are attached to the utterance or word
//! they describe and render to stable strings, so downstream consumers can
//! either match on the variant or grep the rendered text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The morphology tiers that participate in cross-tier alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphTier {
    Segments,
    Glosses,
    Poses,
    Languages,
    LemmaIds,
}

impl MorphTier {
    pub fn name(&self) -> &'static str {
        match self {
            MorphTier::Segments => "segments",
            MorphTier::Glosses => "glosses",
            MorphTier::Poses => "poses",
            MorphTier::Languages => "languages",
            MorphTier::LemmaIds => "lemma_ids",
        }
    }
}

impl fmt::Display for MorphTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A non-fatal defect found while aligning annotation tiers or reading a
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// The number of words in the utterance differs from the number of
    /// morpheme-word groups on the main morphology tier, so words and
    /// morphemes could not be linked.
    BrokenWordAlignment { tier: MorphTier },
    /// Two morphology tiers disagree about how many units they carry; the
    /// shorter one was replaced by placeholders sized to the main tier.
    BrokenTierAlignment { main: MorphTier, tier: MorphTier },
    /// The transcript marks the utterance as insecure with a `[=? ...]`
    /// group naming the form the speaker may have intended.
    InsecureTranscription { target: String },
}

impl Warning {
    pub fn word_alignment(tier: MorphTier) -> Warning {
        Warning::BrokenWordAlignment { tier }
    }

    pub fn tier_alignment(main: MorphTier, tier: MorphTier) -> Warning {
        Warning::BrokenTierAlignment { main, tier }
    }

    pub fn insecure_transcription(target: impl Into<String>) -> Warning {
        Warning::InsecureTranscription {
            target: target.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::BrokenWordAlignment { tier } => {
                write!(f, "broken alignment: full word : {}", tier)
            }
            Warning::BrokenTierAlignment { main, tier } => {
                write!(f, "broken alignment: {} : {}", main, tier)
            }
            Warning::InsecureTranscription { target } => {
                write!(
                    f,
                    "transcription insecure (intended form might have been \"{}\")",
                    target
                )
            }
        }
    }
}
