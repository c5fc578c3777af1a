//! Cross-tier reconciliation and word/morpheme linking.
//!
//! Interlinear tiers are transcribed by hand, so the number of units they
//! carry routinely disagrees, both across tier words and across the
//! morphemes inside one word. The reconciler never stretches or truncates a
//! tier to force agreement: the main tier decides the unit count,
//! disagreeing tiers are emptied out, and a [`Warning`] records the repair.
//! Reconciled units are then written into a [`MorphemeArena`] whose shape is
//! fixed up front, so a stray index is an error instead of silent growth.

use std::fmt;

use crate::model::{Morpheme, MorphemeKind, Utterance};
use crate::warning::{MorphTier, Warning};

/// One morphology tier's units, tagged with the tier they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct TierUnits {
    pub tier: MorphTier,
    pub units: Vec<String>,
}

impl TierUnits {
    pub fn new(tier: MorphTier, units: Vec<String>) -> TierUnits {
        TierUnits { tier, units }
    }
}

/// Reconciles parallel tier lists to a common unit count.
///
/// The count is taken from the first non-empty list, so callers list the
/// corpus's main tier first. Every list with a different count is replaced
/// by empty placeholders, and each replaced list other than the main tier
/// yields a warning naming the tier pair.
pub fn reconcile(lists: &mut [TierUnits], main: MorphTier) -> Vec<Warning> {
    let count = lists
        .iter()
        .find(|list| !list.units.is_empty())
        .map(|list| list.units.len())
        .unwrap_or(0);

    let mut warnings = Vec::new();
    for list in lists.iter_mut() {
        if list.units.len() != count {
            list.units = vec![String::new(); count];
            if list.tier != main {
                warnings.push(Warning::tier_alignment(main, list.tier));
            }
        }
    }
    warnings
}

/// Error for a write outside a [`MorphemeArena`]'s shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfShape {
    pub word_index: usize,
    pub morpheme_index: usize,
}

impl fmt::Display for OutOfShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no morpheme slot at word {}, morpheme {}",
            self.word_index, self.morpheme_index
        )
    }
}

impl std::error::Error for OutOfShape {}

/// Fixed-shape buffer for the morphemes of one utterance, indexed by
/// (word index, morpheme index).
///
/// Tier values arrive column by column, one tier at a time; the shape is
/// decided once from the reconciled unit counts and never grows afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MorphemeArena {
    groups: Vec<Vec<Morpheme>>,
}

impl MorphemeArena {
    /// Creates an arena with `shape[i]` morpheme slots for word `i`.
    pub fn new(shape: &[usize]) -> MorphemeArena {
        MorphemeArena {
            groups: shape
                .iter()
                .map(|&count| vec![Morpheme::default(); count])
                .collect(),
        }
    }

    pub fn word_count(&self) -> usize {
        self.groups.len()
    }

    /// Writes one tier's units into that tier's column of a word's slots.
    pub fn fill_tier(
        &mut self,
        word_index: usize,
        tier: MorphTier,
        units: &[String],
    ) -> Result<(), OutOfShape> {
        for (morpheme_index, unit) in units.iter().enumerate() {
            let slot = self.slot_mut(word_index, morpheme_index)?;
            match tier {
                MorphTier::Segments => slot.segment = unit.clone(),
                MorphTier::Glosses => slot.gloss_raw = unit.clone(),
                MorphTier::Poses => slot.pos_raw = unit.clone(),
                MorphTier::Languages => slot.language = unit.clone(),
                MorphTier::LemmaIds => slot.lemma_id = unit.clone(),
            }
        }
        Ok(())
    }

    /// Writes the structural roles of a word's morphemes.
    pub fn fill_kinds(
        &mut self,
        word_index: usize,
        kinds: &[MorphemeKind],
    ) -> Result<(), OutOfShape> {
        for (morpheme_index, &kind) in kinds.iter().enumerate() {
            self.slot_mut(word_index, morpheme_index)?.kind = kind;
        }
        Ok(())
    }

    /// Consumes the arena into per-word morpheme groups.
    pub fn into_groups(self) -> Vec<Vec<Morpheme>> {
        self.groups
    }

    fn slot_mut(
        &mut self,
        word_index: usize,
        morpheme_index: usize,
    ) -> Result<&mut Morpheme, OutOfShape> {
        self.groups
            .get_mut(word_index)
            .and_then(|group| group.get_mut(morpheme_index))
            .ok_or(OutOfShape {
                word_index,
                morpheme_index,
            })
    }
}

/// Fills in stem values that parallel tiers leave implicit.
///
/// A stem transcribed on only one tier gets the other side mirrored: a
/// missing segment is taken from the gloss for stems, a missing gloss from
/// the segment for stems and prefixes. Suffix segments are never fabricated.
pub fn mirror_stem_values(group: &mut [Morpheme]) {
    for morpheme in group.iter_mut() {
        if morpheme.segment.is_empty()
            && !morpheme.gloss_raw.is_empty()
            && morpheme.kind == MorphemeKind::Stem
        {
            morpheme.segment = morpheme.gloss_raw.clone();
        } else if morpheme.gloss_raw.is_empty()
            && !morpheme.segment.is_empty()
            && matches!(morpheme.kind, MorphemeKind::Stem | MorphemeKind::Prefix)
        {
            morpheme.gloss_raw = morpheme.segment.clone();
        }
    }
}

/// Links words to morpheme groups when their counts match.
///
/// On a match every morpheme records the index of its word, and the word
/// inherits the POS of its non-affix morphemes (`pfx`/`sfx` never
/// overwrite; the last other tag wins). On a mismatch nothing is linked and
/// the utterance records which tier's words failed to align.
pub fn link_words_morphemes(utterance: &mut Utterance, main: MorphTier) {
    if utterance.morphemes.len() != utterance.words.len() {
        utterance.warnings.push(Warning::word_alignment(main));
        return;
    }

    for (index, group) in utterance.morphemes.iter_mut().enumerate() {
        for morpheme in group.iter_mut() {
            morpheme.word_index = Some(index);
            if morpheme.pos_raw != "sfx" && morpheme.pos_raw != "pfx" {
                utterance.words[index].pos_raw = morpheme.pos_raw.clone();
            }
        }
    }
}
