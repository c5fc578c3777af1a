//! Morpheme tokenizers.
//!
//! One morphology tier packs segments, glosses and POS tags into short
//! per-word strings whose delimiter conventions differ per corpus:
//! CHILDES `%mor`-style tiers interleave every role in a single string,
//! Toolbox corpora spread the roles over parallel tiers, and a few corpora
//! use conventions of their own. [`MorphemeStyle`] names each convention
//! and projects per-tier unit lists out of a morpheme-word; the alignment
//! arena consumes those lists positionally.
//!
//! Composite styles parse the same word string for every projection and
//! pick one column, mirroring how the source tiers repeat the composite
//! string under several roles. Parallel styles split each tier's word on
//! its plain delimiter.

pub mod caret;
pub mod glosspos;
pub mod pipes;
pub mod positional;

use serde::{Deserialize, Serialize};

use crate::model::MorphemeKind;
use crate::segmenting::{self, WordBoundary};

/// One `(segment, gloss, pos)` unit cut out of a composite morpheme-word.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Triple {
    pub segment: String,
    pub gloss: String,
    pub pos: String,
    /// Set when the unit came from a `~`-attached clitic group.
    pub clitic: bool,
}

impl Triple {
    pub fn new(
        segment: impl Into<String>,
        gloss: impl Into<String>,
        pos: impl Into<String>,
    ) -> Triple {
        Triple {
            segment: segment.into(),
            gloss: gloss.into(),
            pos: pos.into(),
            clitic: false,
        }
    }
}

/// Collapses the transcription conventions for unknown material (`***`,
/// `xxx`, `???`) into the canonical `???` marker. Idempotent.
pub fn normalize_unknown(token: &str) -> String {
    match token {
        "***" | "xxx" | "???" => "???".to_string(),
        _ => token.to_string(),
    }
}

/// Morpheme delimiter convention of a corpus. Selected per corpus in its
/// profile; the tokenizer itself has no per-corpus code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphemeStyle {
    /// `-`-separated units on parallel tiers.
    Dashes,
    /// Whitespace-separated units on parallel tiers.
    Spaces,
    /// `pfx#POS|stem-SFX` words carrying all three roles at once, with
    /// `+`-compounds, `~`-clitics and trailing `=gloss` material.
    Positional,
    /// `-`-separated glosses with one `POS^gloss` stem.
    CaretStem,
    /// `+`-joined `POS|segment^gloss` morphemes.
    PipeCaret,
    /// One word-level `POS:gloss` pair per word, whole words as units.
    GlossPos,
}

impl MorphemeStyle {
    /// Morpheme-words of the segment tier.
    pub fn seg_words(&self, tier: &str, boundary: WordBoundary) -> Vec<String> {
        segmenting::morpheme_words(tier, boundary)
    }

    /// Morpheme-words of the gloss tier. For [`MorphemeStyle::GlossPos`]
    /// the gloss words are derived from the combined gloss/POS tier and
    /// unparseable words are dropped.
    pub fn gloss_words(&self, tier: &str, boundary: WordBoundary) -> Vec<String> {
        match self {
            MorphemeStyle::GlossPos => glosspos::gloss_words(tier),
            _ => segmenting::morpheme_words(tier, boundary),
        }
    }

    /// Morpheme-words of the POS tier.
    pub fn pos_words(&self, tier: &str, boundary: WordBoundary) -> Vec<String> {
        match self {
            MorphemeStyle::GlossPos => glosspos::pos_words(tier),
            _ => segmenting::morpheme_words(tier, boundary),
        }
    }

    /// Morpheme-words of the morpheme-language tier.
    pub fn lang_words(&self, tier: &str, boundary: WordBoundary) -> Vec<String> {
        segmenting::morpheme_words(tier, boundary)
    }

    /// Morpheme-words of the lemma-id tier.
    pub fn id_words(&self, tier: &str, boundary: WordBoundary) -> Vec<String> {
        segmenting::morpheme_words(tier, boundary)
    }

    /// Segment units of one morpheme-word.
    pub fn segments(&self, word: &str) -> Vec<String> {
        let units = match self {
            MorphemeStyle::Dashes => dash_units(word),
            MorphemeStyle::Spaces => space_units(word),
            MorphemeStyle::Positional => {
                positional::morphemes(word).into_iter().map(|m| m.segment).collect()
            }
            MorphemeStyle::CaretStem => caret::segments(word),
            MorphemeStyle::PipeCaret => {
                pipes::morphemes(word).into_iter().map(|m| m.segment).collect()
            }
            MorphemeStyle::GlossPos => vec![word.to_string()],
        };
        normalized(units)
    }

    /// Gloss units of one morpheme-word.
    pub fn glosses(&self, word: &str) -> Vec<String> {
        let units = match self {
            MorphemeStyle::Dashes => dash_units(word),
            MorphemeStyle::Spaces => space_units(word),
            MorphemeStyle::Positional => {
                positional::morphemes(word).into_iter().map(|m| m.gloss).collect()
            }
            MorphemeStyle::CaretStem => caret::glosses(word),
            MorphemeStyle::PipeCaret => {
                pipes::morphemes(word).into_iter().map(|m| m.gloss).collect()
            }
            MorphemeStyle::GlossPos => vec![word.to_string()],
        };
        normalized(units)
    }

    /// POS units of one morpheme-word.
    pub fn poses(&self, word: &str) -> Vec<String> {
        let units = match self {
            MorphemeStyle::Dashes => dash_units(word),
            MorphemeStyle::Spaces => space_units(word),
            MorphemeStyle::Positional => {
                positional::morphemes(word).into_iter().map(|m| m.pos).collect()
            }
            MorphemeStyle::CaretStem => caret::poses(word),
            MorphemeStyle::PipeCaret => {
                pipes::morphemes(word).into_iter().map(|m| m.pos).collect()
            }
            MorphemeStyle::GlossPos => vec![word.to_string()],
        };
        normalized(units)
    }

    /// Language units of one morpheme-word from a dedicated language tier.
    pub fn langs(&self, word: &str) -> Vec<String> {
        match self {
            MorphemeStyle::GlossPos => glosspos::langs(word),
            MorphemeStyle::Spaces => space_units(word),
            _ => dash_units(word),
        }
    }

    /// Lemma-id units of one morpheme-word.
    pub fn ids(&self, word: &str) -> Vec<String> {
        match self {
            MorphemeStyle::Spaces => space_units(word),
            _ => dash_units(word),
        }
    }

    /// Structural kinds of the units of one POS morpheme-word, clitic-aware
    /// for the positional style.
    pub fn kinds(&self, pos_word: &str) -> Vec<MorphemeKind> {
        match self {
            MorphemeStyle::Positional => positional::morphemes(pos_word)
                .iter()
                .map(|m| {
                    let kind = MorphemeKind::from_pos(&m.pos);
                    if m.clitic && kind == MorphemeKind::Stem {
                        MorphemeKind::Clitic
                    } else {
                        kind
                    }
                })
                .collect(),
            _ => self
                .poses(pos_word)
                .iter()
                .map(|pos| MorphemeKind::from_pos(pos))
                .collect(),
        }
    }
}

fn dash_units(word: &str) -> Vec<String> {
    word.split('-').map(String::from).collect()
}

fn space_units(word: &str) -> Vec<String> {
    word.split_whitespace().map(String::from).collect()
}

fn normalized(units: Vec<String>) -> Vec<String> {
    units.iter().map(|unit| normalize_unknown(unit)).collect()
}
