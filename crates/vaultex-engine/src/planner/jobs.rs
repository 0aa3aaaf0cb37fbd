use std::{collections::BTreeSet, path::PathBuf};

use crate::models::{MetaValue, Metadata};

/// What a planned job asks the assembler to do.
#[derive(Debug, Clone, PartialEq)]
pub enum JobKind {
    /// A note body to split into blocks.
    AddText { text: String },
    /// A structural heading for a note.
    AddHeader { title: String, level: i32 },
    /// Filter the bibliography down to the cited keys.
    AddBibliography {
        citations: BTreeSet<String>,
        source: PathBuf,
    },
}

/// A unit of planned work with the note metadata it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedJob {
    pub kind: JobKind,
    pub metadata: Metadata,
    appendix: bool,
}

impl PlannedJob {
    /// Metadata key that places a note, and everything after it, in the appendix.
    pub const APPENDIX_KEY: &'static str = "appendix";

    pub fn new(kind: JobKind, metadata: Metadata) -> Self {
        let appendix = metadata
            .get(Self::APPENDIX_KEY)
            .and_then(MetaValue::as_bool)
            .unwrap_or(false);
        Self {
            kind,
            metadata,
            appendix,
        }
    }

    pub fn text(text: impl Into<String>, metadata: Metadata) -> Self {
        Self::new(JobKind::AddText { text: text.into() }, metadata)
    }

    pub fn header(title: impl Into<String>, level: i32, metadata: Metadata) -> Self {
        Self::new(
            JobKind::AddHeader {
                title: title.into(),
                level,
            },
            metadata,
        )
    }

    pub fn bibliography(citations: BTreeSet<String>, source: PathBuf) -> Self {
        Self::new(JobKind::AddBibliography { citations, source }, Metadata::new())
    }

    pub fn is_appendix(&self) -> bool {
        self.appendix
    }

    pub(crate) fn mark_as_appendix(&mut self) {
        self.appendix = true;
        self.metadata
            .insert(Self::APPENDIX_KEY.to_string(), MetaValue::Bool(true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appendix_flag_comes_from_metadata() {
        let meta = Metadata::from([(PlannedJob::APPENDIX_KEY.to_string(), true.into())]);
        assert!(PlannedJob::text("x", meta).is_appendix());
        assert!(!PlannedJob::text("x", Metadata::new()).is_appendix());

        let not_bool = Metadata::from([(PlannedJob::APPENDIX_KEY.to_string(), "yes".into())]);
        assert!(!PlannedJob::text("x", not_bool).is_appendix());
    }

    #[test]
    fn marking_updates_metadata() {
        let mut job = PlannedJob::header("A", 0, Metadata::new());
        job.mark_as_appendix();
        assert!(job.is_appendix());
        assert_eq!(job.metadata[PlannedJob::APPENDIX_KEY], MetaValue::Bool(true));
    }
}
