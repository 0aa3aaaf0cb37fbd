//! # Inline Kinds
//!
//! Inline types that own their syntax delimiters.
//!
//! ## Types
//!
//! - **`CodeSpan`**: `` ` `` raw zone, cross-references and monospace
//! - **`WikiLink`**: `[[`, `]]`, `|` alias, `!` embed
//! - **`Citation`**: `[[@key]]` tags and adjacent grouping
//! - **`Math`**: `$...$` passthrough
//! - **`Emphasis`**: quoted italics, italics, bold and highlight
//!
//! The scanner and normalizer use these constants; they never hardcode `[[` or `` ` ``.

pub mod citation;
pub mod code_span;
pub mod emphasis;
pub mod math;
pub mod wikilink;

pub use citation::Citation;
pub use code_span::CodeSpan;
pub use emphasis::Emphasis;
pub use math::Math;
pub use wikilink::WikiLink;
