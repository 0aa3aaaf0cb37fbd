use std::path::PathBuf;

use thiserror::Error;

use crate::io::IoError;

/// Everything that can abort a conversion run.
///
/// None of these are retried. Front-matter parse failures never surface here;
/// they are downgraded to [`crate::planner::PlanWarning`]s.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(
        "Citations are used but no bibliography source was found at {}",
        display_source(.0)
    )]
    MissingBibliographySource(Option<PathBuf>),

    #[error("Heading level {0} has no sectioning command mapped")]
    UnmappedHeadingLevel(i32),

    #[error("Malformed {kind} block: {reason}")]
    MalformedBlock { kind: &'static str, reason: String },

    #[error("Table format error: {0}")]
    Format(String),

    #[error("Note `{name}` is neither a directory nor a file in {}", .base.display())]
    MissingNode { name: String, base: PathBuf },

    #[error("Max depth of {max_depth} reached at `{name}`, please check for cycles in your links")]
    CycleSuspected { max_depth: usize, name: String },

    #[error("Citation keys missing from the bibliography: {}", .0.join(", "))]
    MissingCitationKeys(Vec<String>),

    #[error("Could not find image {}", .0.display())]
    MissingGraphic(PathBuf),

    #[error("Could not parse bibliography {}: {reason}", .path.display())]
    Bibliography { path: PathBuf, reason: String },

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error(transparent)]
    Io(#[from] IoError),
}

fn display_source(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "<unset>".to_string(),
    }
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
