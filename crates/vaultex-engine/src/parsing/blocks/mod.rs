//! # Block Parsing
//!
//! A note body is split into lines and walked with a cursor. At every
//! unclaimed line the detectors in [`DETECTORS`] are tried in order; the
//! first match claims a run of lines and moves the cursor past it. Lines
//! nobody claims become paragraphs, so no content is dropped.
//!
//! ## Modules
//!
//! - **`types`**: `Block`, the closed `BlockKind` set and `RenderContext`
//! - **`kinds`**: one type per block variant, each owning its delimiters,
//!   detection and rendering
//! - **`parse`**: the ordered detector list and `parse_text`
//!
//! ## Key Invariants
//!
//! - Fenced code and display math are raw zones: nothing inside is detected
//!   or normalized
//! - An unclosed fence or equation runs to the end of the buffer
//! - Markers, code and equations are emitted verbatim; every other variant
//!   routes its text through the inline normalizer

pub mod kinds;
pub mod parse;
pub mod types;

pub use parse::{DETECTORS, parse_text};
pub use types::{Block, BlockKind, Detector, RenderContext};
