//! Toolbox database parsing.
//!
//! Toolbox files are flat field-marker databases: every line is
//! `\marker content`, and a configurable marker (conventionally `\ref`)
//! opens a new record. There is no header section; session metadata, where
//! it exists at all, is interspersed as records whose tier values start
//! with `@` and which are rejected as metadata. Files can be large, so
//! record iteration works over a memory map and decodes one record at a
//! time.

pub mod records;
pub mod tiers;

pub use records::{ToolboxError, ToolboxFile};
pub use tiers::{is_record, parse_record};
