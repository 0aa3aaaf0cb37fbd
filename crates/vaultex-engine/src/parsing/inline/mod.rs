//! # Inline Handling
//!
//! Two jobs share the inline delimiters:
//!
//! - **Scanning** (`parser`, `links`): a cursor-based scan with code spans as
//!   raw zones, used by the planner to find and strip note links.
//! - **Normalizing** (`normalize`): the line-by-line Markdown to LaTeX
//!   transform applied while rendering blocks.
//!
//! ## Modules
//!
//! - **`kinds`**: Inline constructs owning their delimiters and transforms
//!   (CodeSpan, WikiLink, Citation, Math, Emphasis)
//! - **`cursor`**: `Cursor` for byte-wise scanning
//! - **`parser`**: `scan_inline()` producing `InlineNode`s
//! - **`links`**: `extract_links()` for note traversal
//! - **`protect`**: sentinel protection of math, link and code spans
//! - **`escape`**: reserved-character escaping and bracket grouping
//! - **`normalize`**: the ordered normalizer pipeline

pub mod cursor;
pub mod escape;
pub mod kinds;
pub mod links;
pub mod normalize;
pub mod parser;
pub mod protect;
pub mod types;

pub use links::{NoteLink, extract_links};
pub use normalize::{normalize_line, normalize_lines};
pub use parser::scan_inline;
pub use types::InlineNode;
