use std::fmt;

use crate::{models::Metadata, parsing::blocks::kinds::Section};

use super::jobs::{JobKind, PlannedJob};

/// One line of the plan's table of contents.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    /// 1 for the shallowest structural header.
    pub depth: usize,
    pub title: String,
    /// Metadata of the header job; `None` for headings found in note bodies.
    pub metadata: Option<Metadata>,
}

impl fmt::Display for OutlineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = " ".repeat(self.depth.saturating_sub(1));
        write!(f, "{indent}| {}", self.title)
    }
}

/// Builds the table of contents from header jobs and the `#` headings inside
/// text jobs, which nest under the header before them.
pub fn outline(jobs: &[PlannedJob]) -> Vec<OutlineEntry> {
    let shallowest = jobs
        .iter()
        .filter_map(|job| match job.kind {
            JobKind::AddHeader { level, .. } => Some(level),
            _ => None,
        })
        .min()
        .unwrap_or(1);

    let mut entries = vec![];
    let mut parent_depth = 0usize;
    for job in jobs {
        match &job.kind {
            JobKind::AddHeader { title, level } => {
                let depth = usize::try_from(level - shallowest).unwrap_or(0) + 1;
                parent_depth = depth;
                entries.push(OutlineEntry {
                    depth,
                    title: title.clone(),
                    metadata: Some(job.metadata.clone()),
                });
            }
            JobKind::AddText { text } => {
                entries.extend(text.lines().filter_map(Section::parse_heading).map(
                    |(level, title)| OutlineEntry {
                        depth: parent_depth + usize::try_from(level).unwrap_or(0),
                        title: title.to_string(),
                        metadata: None,
                    },
                ));
            }
            JobKind::AddBibliography { .. } => {}
        }
    }
    entries
}
