//! Morpheme-level model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::warning::Warning;

/// Structural role of a morpheme within its word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphemeKind {
    Stem,
    Prefix,
    Suffix,
    Clitic,
    #[default]
    Unknown,
}

impl MorphemeKind {
    /// Derives the structural role from a part-of-speech tag, the way the
    /// morphology tiers encode it: `pfx`/`sfx` are reserved tags, anything
    /// else with content is a stem.
    pub fn from_pos(pos: &str) -> MorphemeKind {
        match pos {
            "pfx" => MorphemeKind::Prefix,
            "sfx" => MorphemeKind::Suffix,
            "" => MorphemeKind::Unknown,
            _ => MorphemeKind::Stem,
        }
    }
}

/// One morpheme with its cross-tier annotations.
///
/// The `*_raw` values are the normalized tier tokens: unknown markers are
/// unified, missing stem glosses and segments are mirrored from the tier
/// that has them. A field whose tier is absent or misaligned is empty.
/// `gloss`, `pos` and `pos_ud` are the canonicalized variants of the raw
/// tags; the per-corpus mapping tables that fill them live downstream, so
/// the parser leaves them empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Morpheme {
    pub segment: String,
    pub gloss_raw: String,
    pub gloss: String,
    pub pos_raw: String,
    pub pos: String,
    pub pos_ud: String,
    pub language: String,
    pub lemma_id: String,
    pub kind: MorphemeKind,
    /// Index of the owning word in `Utterance::words`; set only when words
    /// and morpheme groups aligned one-to-one.
    pub word_index: Option<usize>,
    pub warnings: Vec<Warning>,
}

impl fmt::Display for Morpheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.segment, self.gloss_raw, self.pos_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_pos() {
        assert_eq!(MorphemeKind::from_pos("pfx"), MorphemeKind::Prefix);
        assert_eq!(MorphemeKind::from_pos("sfx"), MorphemeKind::Suffix);
        assert_eq!(MorphemeKind::from_pos("v"), MorphemeKind::Stem);
        assert_eq!(MorphemeKind::from_pos("stem:POS"), MorphemeKind::Stem);
        assert_eq!(MorphemeKind::from_pos(""), MorphemeKind::Unknown);
    }

    #[test]
    fn test_display() {
        let morpheme = Morpheme {
            segment: "go".to_string(),
            gloss_raw: "go".to_string(),
            pos_raw: "v".to_string(),
            ..Default::default()
        };
        assert_eq!(morpheme.to_string(), "go/go/v");
    }
}
