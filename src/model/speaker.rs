//! Speaker-level model.

use serde::{Deserialize, Serialize};

/// One speaker of a session, as declared in the transcript header.
///
/// All values are kept as transcribed; role and gender normalization belong
/// to downstream corpus tooling, not the parser.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Speaker {
    /// Short speaker code, e.g. `CHI` or `MOT`.
    pub code: String,
    pub name: String,
    pub role: String,
    pub age: String,
    pub gender: String,
    pub languages: String,
    pub birth_date: String,
}

impl Speaker {
    pub fn new(code: impl Into<String>) -> Speaker {
        Speaker {
            code: code.into(),
            ..Default::default()
        }
    }
}
