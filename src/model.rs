//! Normalized transcript model.
//!
//! Whatever the source format, parsing produces the same hierarchy:
//! a [`Session`] owns [`Speaker`]s and [`Utterance`]s, an utterance owns
//! [`Word`]s and per-word groups of [`Morpheme`]s. All fields are plain
//! owned strings; empty string means "not annotated". The only cross-links
//! are by index ([`Morpheme::word_index`]), set exclusively when word and
//! morpheme counts agree.
//!
//! [`Record`] is the format-independent intermediate: one record of tier
//! names mapped to raw tier content, before any interpretation.

pub mod morpheme;
pub mod record;
pub mod session;
pub mod speaker;
pub mod utterance;
pub mod word;

pub use morpheme::{Morpheme, MorphemeKind};
pub use record::Record;
pub use session::Session;
pub use speaker::Speaker;
pub use utterance::Utterance;
pub use word::Word;
