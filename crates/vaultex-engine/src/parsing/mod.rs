//! Markdown parsing: inline normalization and link scanning in [`inline`],
//! block detection and rendering in [`blocks`].

pub mod blocks;
pub mod inline;
pub mod span;

pub use blocks::{Block, BlockKind, RenderContext, parse_text};
pub use inline::{NoteLink, extract_links, normalize_line, normalize_lines};
