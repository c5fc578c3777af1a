//! Utterance-level model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Morpheme, Word};
use crate::warning::Warning;

/// One utterance with its annotation tiers, words and morphemes.
///
/// The raw text is kept next to its cleaned forms: `utterance_raw` is the
/// transcript verbatim, `actual`/`target` are the two cleaned readings of it,
/// and `utterance` is the standard form rebuilt from the cleaned words.
/// `seg_tier`/`gloss_tier`/`pos_tier` keep the raw morphology tiers for
/// provenance. `morphemes` holds one group per morpheme-word; the groups are
/// parallel to `words` only when no [`Warning::BrokenWordAlignment`] was
/// recorded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Utterance {
    pub source_id: String,
    pub speaker_label: String,
    pub addressee: String,
    pub utterance_raw: String,
    pub utterance: String,
    pub actual: String,
    pub target: String,
    pub translation: String,
    pub comment: String,
    pub sentence_type: String,
    pub start: String,
    pub end: String,
    pub seg_tier: String,
    pub gloss_tier: String,
    pub pos_tier: String,
    pub words: Vec<Word>,
    pub morphemes: Vec<Vec<Morpheme>>,
    pub warnings: Vec<Warning>,
}

impl Utterance {
    /// True when words and morpheme groups were linked one-to-one.
    pub fn is_aligned(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::BrokenWordAlignment { .. }))
    }
}

impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.speaker_label, self.utterance)
    }
}
