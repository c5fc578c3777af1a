//! CHAT transcript parsing.
//!
//! CHAT files are line-oriented: `@`-prefixed header lines carry session
//! metadata, `*LLL:\t` main lines open one record each, `%lll:\t` dependent
//! tiers annotate the preceding main line, and a line starting with a tab
//! continues the previous logical line. Everything here works on raw text
//! and produces [`crate::model::Record`]s plus header metadata; the
//! interpretation of tier *content* lives in [`crate::reading`] and
//! [`crate::cleaning`].

pub mod disfluencies;
pub mod headers;
pub mod lines;
pub mod records;
pub mod terminators;
pub mod tiers;

pub use headers::{parse_headers, Participant, SessionMeta};
pub use lines::{join_continuations, LineKind, Lines};
pub use records::{header_section, record_spans, Records};
pub use terminators::sentence_type;
pub use tiers::parse_record;
