//! Word-level model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::warning::Warning;

/// One word of an utterance.
///
/// `actual` is the form as pronounced, `target` the form the transcriber
/// judged was meant; `word` is whichever of the two the corpus treats as its
/// standard form, after word-level cleaning. `pos_raw` is projected from the
/// word's stem morpheme when alignment succeeds; `pos` and `pos_ud` are its
/// canonicalized variants, filled by the downstream mapping tables.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Word {
    pub word: String,
    pub actual: String,
    pub target: String,
    pub language: String,
    pub pos_raw: String,
    pub pos: String,
    pub pos_ud: String,
    pub warnings: Vec<Warning>,
}

impl Word {
    pub fn new(word: impl Into<String>) -> Word {
        Word {
            word: word.into(),
            ..Default::default()
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.word)
    }
}
