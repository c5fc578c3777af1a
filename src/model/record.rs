//! Raw parsed records.

use serde::{Deserialize, Serialize};

/// One record as an ordered tier-name → tier-content mapping.
///
/// Both formats funnel into this shape before interpretation. Tier names are
/// stored without their format prefix (`%` or `\`). CHAT main-line fields are
/// stored under the reserved `*`-prefixed keys, which cannot collide with
/// dependent tier names because those never start with `*`.
///
/// Duplicate tier names keep their first position but the last content wins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Position of this record in the session, starting at 0.
    pub uid: usize,
    tiers: Vec<(String, String)>,
}

impl Record {
    /// Reserved key for the CHAT main-line speaker label.
    pub const SPEAKER: &'static str = "*speaker";
    /// Reserved key for the CHAT main-line utterance text.
    pub const UTTERANCE: &'static str = "*utterance";
    /// Reserved key for the CHAT main-line start time.
    pub const START: &'static str = "*start";
    /// Reserved key for the CHAT main-line end time.
    pub const END: &'static str = "*end";

    pub fn new(uid: usize) -> Record {
        Record {
            uid,
            tiers: Vec::new(),
        }
    }

    /// Sets a tier, overwriting the content of an existing tier of the same
    /// name while keeping its original position.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let name = name.into();
        let content = content.into();
        match self.tiers.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = content,
            None => self.tiers.push((name, content)),
        }
    }

    /// Returns the tier content, or `""` if the tier is absent.
    pub fn tier(&self, name: &str) -> &str {
        self.tiers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_str())
            .unwrap_or("")
    }

    pub fn has_tier(&self, name: &str) -> bool {
        self.tiers.iter().any(|(n, _)| n == name)
    }

    /// Returns the first non-empty tier among `names`, or `""`.
    ///
    /// Tier tables use this for fallback chains such as Nungon's
    /// `xgls` → `gls` segment tier.
    pub fn first_tier(&self, names: &[&str]) -> &str {
        for name in names {
            let content = self.tier(name);
            if !content.is_empty() {
                return content;
            }
        }
        ""
    }

    pub fn tiers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tiers.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
