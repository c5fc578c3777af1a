//! Word-level gloss/POS pairs on a shared morphology tier.
//!
//! Each whitespace-separated word of the tier carries both the POS and the
//! glosses of one orthographic word; there is no morpheme segmentation, so
//! every word projects exactly one unit. Three spellings occur:
//!
//! - no colon: gloss and POS are the same token (`PCL`),
//! - `V`/`ADJ` head: glosses start after the first dash
//!   (`V-PST:SG:F` has POS `V`, gloss `PST:SG:F`),
//! - anything else: glosses start after the first colon
//!   (`PRO-DEM-NOUN:NOM:SG` has POS `PRO-DEM-NOUN`, gloss `NOM:SG`).
//!
//! Words fitting none of the spellings are dropped from the derived lists;
//! the resulting length mismatch surfaces later as an alignment warning.

use once_cell::sync::Lazy;
use regex::Regex;

/// `V`/`ADJ` with dash-attached glosses.
static VERB_ADJ_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(V|ADJ)-(.*)$").unwrap());

/// Any other POS with colon-attached glosses.
static GLOSS_POS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^[^(V|ADJ)].*?):(.*)$").unwrap());

/// Derives the per-word `(gloss, pos)` pairs from the combined tier.
pub fn gloss_pos_words(tier: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for word in tier.split_whitespace() {
        if !word.contains(':') {
            out.push((word.to_string(), word.to_string()));
        } else if word.starts_with('V') || word.starts_with("ADJ") {
            if let Some(caps) = VERB_ADJ_REGEX.captures(word) {
                out.push((caps[2].to_string(), caps[1].to_string()));
            }
        } else if let Some(caps) = GLOSS_POS_REGEX.captures(word) {
            out.push((caps[2].to_string(), caps[1].to_string()));
        }
    }
    out
}

pub fn gloss_words(tier: &str) -> Vec<String> {
    gloss_pos_words(tier).into_iter().map(|(gloss, _)| gloss).collect()
}

pub fn pos_words(tier: &str) -> Vec<String> {
    gloss_pos_words(tier).into_iter().map(|(_, pos)| pos).collect()
}

/// Language units of one word of the language tier.
pub fn langs(word: &str) -> Vec<String> {
    if word.contains("FOREIGN") {
        vec!["FOREIGN".to_string()]
    } else {
        vec!["Russian".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_colon_mirrors_both() {
        assert_eq!(
            gloss_pos_words("PCL"),
            vec![("PCL".to_string(), "PCL".to_string())]
        );
    }

    #[test]
    fn test_verb_glosses_after_dash() {
        assert_eq!(
            gloss_pos_words("V-PST:SG:F:IRREFL:IPFV"),
            vec![("PST:SG:F:IRREFL:IPFV".to_string(), "V".to_string())]
        );
    }

    #[test]
    fn test_other_pos_glosses_after_colon() {
        assert_eq!(
            gloss_pos_words("PRO-DEM-NOUN:NOM:SG"),
            vec![("NOM:SG".to_string(), "PRO-DEM-NOUN".to_string())]
        );
    }

    #[test]
    fn test_unparseable_words_dropped() {
        // a V head without dash-attached glosses has no parse
        assert_eq!(gloss_pos_words("V:IMP"), Vec::new());
        // the tier keeps going after a dropped word
        assert_eq!(
            gloss_words("PCL V:IMP NOUN:NOM"),
            vec!["PCL", "NOM"]
        );
    }

    #[test]
    fn test_empty_tier() {
        assert_eq!(gloss_pos_words(""), Vec::new());
    }

    #[test]
    fn test_langs() {
        assert_eq!(langs("FOREIGN"), vec!["FOREIGN"]);
        assert_eq!(langs("NOUN:NOM:SG"), vec!["Russian"]);
    }
}
