//! Session-level model.

use serde::{Deserialize, Serialize};

use crate::model::{Speaker, Utterance};

/// One recording session: the root of the parsed hierarchy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    /// Identifier derived from the transcript file name.
    pub source_id: String,
    /// Recording date as transcribed, normalized to `YYYY-MM-DD` where the
    /// header used the `DD-MMM-YYYY` convention.
    pub date: String,
    pub media_filename: String,
    pub speakers: Vec<Speaker>,
    pub utterances: Vec<Utterance>,
}

impl Session {
    pub fn new(source_id: impl Into<String>) -> Session {
        Session {
            source_id: source_id.into(),
            ..Default::default()
        }
    }

    pub fn speaker(&self, code: &str) -> Option<&Speaker> {
        self.speakers.iter().find(|s| s.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_lookup() {
        let mut session = Session::new("deslas-MEM-2006-09-13");
        session.speakers.push(Speaker::new("MEM"));
        assert!(session.speaker("MEM").is_some());
        assert!(session.speaker("CHI").is_none());
    }
}
