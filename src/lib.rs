//! # igloss
//!
//! A parser for hand-transcribed child-language recordings in the two
//! transcript formats used by longitudinal acquisition corpora:
//!
//! - **CHAT**: line-oriented transcripts with `@`-header metadata, `*`-prefixed
//!   main lines and `%`-prefixed dependent tiers.
//! - **Toolbox**: field-marker databases where every line is a `\marker content`
//!   tier and records are separated by a `\ref` marker.
//!
//! Both formats are normalized into the same [`model::Session`] →
//! [`model::Utterance`] → [`model::Word`] → [`model::Morpheme`] hierarchy.
//! The interesting part is not the line splitting but the *cross-tier
//! alignment*: segment, gloss and part-of-speech annotations live on separate
//! tiers that frequently disagree in length, and [`aligning`] reconciles them
//! without ever dropping a record or fabricating a pairing silently.
//!
//! Entry point for most callers is [`sessions::SessionCursor`]:
//!
//! ```ignore
//! let registry = CorpusRegistry::builtin();
//! let profile = registry.get("english")?;
//! let session = SessionCursor::open("transcript.cha", profile)?.parse();
//! ```

pub mod aligning;
pub mod chat;
pub mod cleaning;
pub mod corpora;
pub mod model;
pub mod morphology;
pub mod reading;
pub mod segmenting;
pub mod sessions;
pub mod toolbox;
pub mod warning;

pub use corpora::{CorpusProfile, CorpusRegistry};
pub use model::{Morpheme, Record, Session, Speaker, Utterance, Word};
pub use sessions::{SessionCursor, SessionError};
pub use warning::Warning;
