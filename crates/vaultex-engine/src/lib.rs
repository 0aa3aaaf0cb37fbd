//! Converts a vault of linked Markdown notes into a single LaTeX document.
//!
//! [`ExecutionPlan`] walks the notes into an ordered job stream,
//! [`DocumentAssembler`] turns jobs into blocks and renders them, and
//! [`Converter`] ties both together.

pub mod assembler;
pub mod bibliography;
pub mod converter;
pub mod error;
pub mod io;
pub mod models;
pub mod parsing;
pub mod planner;
pub mod template;

#[cfg(test)]
pub mod tests;

pub use assembler::{AssemblySettings, DocumentAssembler};
pub use bibliography::BibliographyStore;
pub use converter::{ConvertSettings, Conversion, Converter, convert_path};
pub use error::{ConvertError, Result};
pub use io::IoError;
pub use models::{MetaValue, Metadata};
pub use planner::{ExecutionPlan, JobKind, OutlineEntry, PlanWarning, PlannedJob, PlannerSettings};
pub use template::TemplateEngine;
