//! Bible Crentech Core
//!
//! Pure, I/O-free building blocks shared by the Bible Crentech workspace:
//! the static book catalog, the structured `BibleReference`, and the parser
//! that recognises references in free text.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `reference` - `BibleReference` and its invariants
//! - `catalog` - Book catalog (`BookCatalog`, `BookCatalogEntry`)
//! - `parser` - Reference parser (`ReferenceParser`, `ReferenceForm`)
//!
//! Everything here is synchronous and free of shared mutable state; the
//! standard catalog is built once and only read afterwards.

pub mod catalog;
pub mod error;
pub mod parser;
pub mod reference;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Domain Types ───────────────────────────────────────────────────────
pub use catalog::{BookCatalog, BookCatalogEntry, MAX_SUGGESTIONS};
pub use reference::BibleReference;

// ── Parsing ────────────────────────────────────────────────────────────
pub use parser::{normalize_query, parse_reference, MatchOutcome, ReferenceForm, ReferenceParser};
