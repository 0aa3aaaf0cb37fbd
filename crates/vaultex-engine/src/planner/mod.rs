//! # Execution Planning
//!
//! Walks a vault from its index note and turns it into an ordered stream of
//! [`PlannedJob`]s. The walk is depth-first and pre-order: a note's header
//! and text come before the notes it links to, and linked notes are visited
//! in the order their links appear.
//!
//! The only runaway guard is [`PlannerSettings::max_depth`]. There is no
//! visited set, so a link cycle is followed until the depth bound trips.

pub mod frontmatter;
pub mod jobs;
pub mod outline;

use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
};

use relative_path::RelativePathBuf;

use crate::{
    error::{ConvertError, Result},
    io,
    models::{Metadata, NoteRef, parse_yaml_metadata},
    parsing::inline::{extract_links, kinds::Citation},
};

pub use frontmatter::split_front_matter;
pub use jobs::{JobKind, PlannedJob};
pub use outline::{OutlineEntry, outline};

/// Traversal and bibliography settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerSettings {
    /// Name of the note a directory walk starts from.
    pub index: String,
    /// Level of the top structural headers; the index sits one above.
    pub base_level: i32,
    pub max_depth: usize,
    /// Append a bibliography job when any note cites something.
    pub implicit_bibliography: bool,
    pub bibliography: Option<PathBuf>,
}

impl PlannerSettings {
    pub const DEFAULT_INDEX: &'static str = "Index";
    pub const DEFAULT_BASE_LEVEL: i32 = -2;
    pub const DEFAULT_MAX_DEPTH: usize = 10;
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            index: Self::DEFAULT_INDEX.to_string(),
            base_level: Self::DEFAULT_BASE_LEVEL,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            implicit_bibliography: true,
            bibliography: None,
        }
    }
}

/// A non-fatal problem met while planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanWarning {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Note bodies after front matter and links are stripped.
struct NoteContent {
    body: String,
    properties: Metadata,
}

/// The ordered job list plus everything collected while building it.
#[derive(Debug, Default)]
pub struct ExecutionPlan {
    settings: PlannerSettings,
    jobs: Vec<PlannedJob>,
    citations: BTreeSet<String>,
    files_read: usize,
    warnings: Vec<PlanWarning>,
}

impl ExecutionPlan {
    pub fn new(settings: PlannerSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Jobs in discovery order, before the appendix split.
    pub fn jobs(&self) -> &[PlannedJob] {
        &self.jobs
    }

    pub fn citations(&self) -> &BTreeSet<String> {
        &self.citations
    }

    pub fn files_read(&self) -> usize {
        self.files_read
    }

    pub fn header_count(&self) -> usize {
        self.jobs
            .iter()
            .filter(|job| matches!(job.kind, JobKind::AddHeader { .. }))
            .count()
    }

    pub fn warnings(&self) -> &[PlanWarning] {
        &self.warnings
    }

    fn read_note(&mut self, path: &Path, content: String) -> NoteContent {
        self.files_read += 1;

        let (source, body) = split_front_matter(&content);
        let properties = match source.map(parse_yaml_metadata) {
            None => Metadata::new(),
            Some(Ok(properties)) => properties,
            Some(Err(reason)) => {
                log::error!(
                    "Error parsing front matter from {}, ignoring: {reason}",
                    path.display()
                );
                self.warnings.push(PlanWarning {
                    path: path.to_path_buf(),
                    message: format!("front matter ignored: {reason}"),
                });
                Metadata::new()
            }
        };

        NoteContent {
            body: body.to_string(),
            properties,
        }
    }

    fn add_citations(&mut self, text: &str) {
        self.citations.extend(Citation::find_all(text));
    }

    /// Plans a single note as one text job. Links are left in the body and
    /// no header is synthesized.
    pub fn add_file(&mut self, path: &Path) -> Result<()> {
        let content = io::read_path(path)?;
        let note = self.read_note(path, content);

        self.add_citations(&note.body);
        if !note.body.is_empty() {
            self.jobs.push(PlannedJob::text(note.body, note.properties));
        }

        log::info!("Added {} jobs to the execution plan", self.jobs.len());
        Ok(())
    }

    /// Plans a vault directory by walking links depth-first from the index note.
    pub fn add_dir(&mut self, root: &Path) -> Result<()> {
        io::validate_vault_dir(root)?;

        let mut stack = vec![(
            NoteRef::root(self.settings.index.clone()),
            self.settings.base_level - 1,
            0usize,
        )];
        let mut global = Metadata::new();
        let mut is_index = true;

        while let Some((note, level, depth)) = stack.pop() {
            if depth >= self.settings.max_depth {
                return Err(ConvertError::CycleSuspected {
                    max_depth: self.settings.max_depth,
                    name: note.name().to_string(),
                });
            }

            let path = note.relative_path().to_path(root);
            log::debug!("Visiting {} at level {level}", path.display());
            let content = io::read_file(note.relative_path(), root)?;
            let NoteContent { body, properties } = self.read_note(&path, content);
            let (text, links) = extract_links(&body);

            let metadata = if is_index {
                global = properties.clone();
                properties
            } else {
                let mut merged = global.clone();
                merged.extend(properties);
                merged
            };

            if !is_index && level >= self.settings.base_level {
                self.jobs
                    .push(PlannedJob::header(note.name(), level, metadata.clone()));
            }

            if !text.is_empty() {
                self.add_citations(&text);
                self.jobs.push(PlannedJob::text(text, metadata));
            }

            for link in links.iter().rev() {
                let child = Self::resolve_link(root, &note, link.node_name())?;
                stack.push((child, level + 1, depth + 1));
            }

            is_index = false;
        }

        log::info!("Added {} jobs to the execution plan", self.jobs.len());
        Ok(())
    }

    /// A link names a sub-directory holding a note of the same name, or a
    /// sibling note.
    fn resolve_link(root: &Path, parent: &NoteRef, name: &str) -> Result<NoteRef> {
        let dir: RelativePathBuf = parent.base().join(name);
        if dir.to_path(root).is_dir() {
            return Ok(NoteRef::new(dir, name));
        }

        let sibling = NoteRef::new(parent.base().to_relative_path_buf(), name);
        if sibling.relative_path().to_path(root).is_file() {
            return Ok(sibling);
        }

        Err(ConvertError::MissingNode {
            name: name.to_string(),
            base: parent.base().to_path(root),
        })
    }

    fn bibliography_job(&self) -> Result<Option<PlannedJob>> {
        if !self.settings.implicit_bibliography || self.citations.is_empty() {
            return Ok(None);
        }
        match &self.settings.bibliography {
            Some(source) if source.is_file() => Ok(Some(PlannedJob::bibliography(
                self.citations.clone(),
                source.clone(),
            ))),
            other => Err(ConvertError::MissingBibliographySource(other.clone())),
        }
    }

    /// Yields the jobs in output order.
    ///
    /// Jobs before the first appendix job come first, then the bibliography
    /// job when one is due, then every remaining job flagged as appendix.
    /// A missing bibliography source surfaces as an error in the position the
    /// bibliography job would have taken.
    pub fn iter_jobs(&self) -> impl Iterator<Item = Result<PlannedJob>> + '_ {
        let split = self
            .jobs
            .iter()
            .position(PlannedJob::is_appendix)
            .unwrap_or(self.jobs.len());
        let (body, appendix) = self.jobs.split_at(split);

        body.iter()
            .cloned()
            .map(Ok)
            .chain(self.bibliography_job().transpose())
            .chain(appendix.iter().cloned().map(|mut job| {
                job.mark_as_appendix();
                Ok(job)
            }))
    }

    pub fn outline(&self) -> Vec<OutlineEntry> {
        outline(&self.jobs)
    }

    /// Logs the job list and the table of contents.
    pub fn log_outline(&self) {
        for (order, job) in self.jobs.iter().enumerate() {
            match &job.kind {
                JobKind::AddText { text } => {
                    let preview: String = text.chars().take(50).collect();
                    log::info!("{}. Adding text: {preview}...", order + 1);
                }
                JobKind::AddHeader { title, level } => {
                    log::info!("{}. Adding header: {title} with level {level}", order + 1);
                }
                JobKind::AddBibliography { citations, .. } => {
                    log::info!("{}. Adding bibliography with {} keys", order + 1, citations.len());
                }
            }
        }

        log::info!("Table of contents:");
        for entry in self.outline() {
            log::info!("{entry}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::MetaValue,
        tests::{create_test_note, create_test_vault},
    };
    use pretty_assertions::assert_eq;

    fn summary(jobs: &[PlannedJob]) -> Vec<String> {
        jobs.iter()
            .map(|job| match &job.kind {
                JobKind::AddText { text } => format!("text:{text}"),
                JobKind::AddHeader { title, level } => format!("header:{title}@{level}"),
                JobKind::AddBibliography { citations, .. } => {
                    format!("bib:{}", citations.iter().cloned().collect::<Vec<_>>().join(","))
                }
            })
            .collect()
    }

    fn collect(plan: &ExecutionPlan) -> Vec<PlannedJob> {
        plan.iter_jobs().collect::<Result<Vec<_>>>().unwrap()
    }

    #[test]
    fn index_props_are_global_and_local_wins() {
        let vault = create_test_vault();
        create_test_note(&vault, "Index.md", "---\nlang: en\nstyle: a\n---\n[[Chapter1]]");
        create_test_note(&vault, "Chapter1.md", "---\nstyle: b\n---\nBody text.");

        let mut plan = ExecutionPlan::default();
        plan.add_dir(vault.path()).unwrap();

        assert_eq!(summary(plan.jobs()), vec!["header:Chapter1@-2", "text:Body text."]);
        let meta = &plan.jobs()[0].metadata;
        assert_eq!(meta["lang"], MetaValue::from("en"));
        assert_eq!(meta["style"], MetaValue::from("b"));
        assert_eq!(plan.jobs()[1].metadata, *meta);
        assert_eq!(plan.files_read(), 2);
        assert_eq!(plan.header_count(), 1);
    }

    #[test]
    fn preorder_left_to_right() {
        let vault = create_test_vault();
        create_test_note(&vault, "Index.md", "[[A]]\n[[B]]");
        create_test_note(&vault, "A.md", "a text\n[[A1]]\n[[A2]]");
        create_test_note(&vault, "A1.md", "a1");
        create_test_note(&vault, "A2.md", "a2");
        create_test_note(&vault, "B.md", "b");

        let mut plan = ExecutionPlan::default();
        plan.add_dir(vault.path()).unwrap();

        assert_eq!(
            summary(plan.jobs()),
            vec![
                "header:A@-2",
                "text:a text",
                "header:A1@-1",
                "text:a1",
                "header:A2@-1",
                "text:a2",
                "header:B@-2",
                "text:b",
            ]
        );
    }

    #[test]
    fn stray_backtick_does_not_hide_links() {
        let vault = create_test_vault();
        create_test_note(&vault, "Index.md", "[[A]]");
        create_test_note(&vault, "A.md", "Press the ` key.\n[[Child]]\nThen run `make`.");
        create_test_note(&vault, "Child.md", "child");

        let mut plan = ExecutionPlan::default();
        plan.add_dir(vault.path()).unwrap();

        assert_eq!(
            summary(plan.jobs()),
            vec![
                "header:A@-2",
                "text:Press the ` key.\n\nThen run `make`.",
                "header:Child@-1",
                "text:child",
            ]
        );
    }

    #[test]
    fn directory_links_resolve_to_nested_index() {
        let vault = create_test_vault();
        create_test_note(&vault, "Index.md", "[[Part 1|Part 1]]");
        create_test_note(&vault, "Part 1/Part 1.md", "[[Methods]]");
        create_test_note(&vault, "Part 1/Methods.md", "How it was done.");

        let mut plan = ExecutionPlan::default();
        plan.add_dir(vault.path()).unwrap();

        assert_eq!(
            summary(plan.jobs()),
            vec!["header:Part 1@-2", "header:Methods@-1", "text:How it was done."]
        );
    }

    #[test]
    fn missing_note_is_an_error() {
        let vault = create_test_vault();
        create_test_note(&vault, "Index.md", "[[Ghost]]");

        let err = ExecutionPlan::default().add_dir(vault.path()).unwrap_err();
        assert!(matches!(err, ConvertError::MissingNode { name, .. } if name == "Ghost"));
    }

    #[test]
    fn cycles_trip_the_depth_bound() {
        let vault = create_test_vault();
        create_test_note(&vault, "Index.md", "[[A]]");
        create_test_note(&vault, "A.md", "[[B]]");
        create_test_note(&vault, "B.md", "[[A]]");

        let mut plan = ExecutionPlan::new(PlannerSettings {
            max_depth: 4,
            ..Default::default()
        });
        let err = plan.add_dir(vault.path()).unwrap_err();
        assert!(matches!(err, ConvertError::CycleSuspected { max_depth: 4, .. }));
    }

    #[test]
    fn broken_front_matter_is_a_warning() {
        let vault = create_test_vault();
        create_test_note(&vault, "Index.md", "---\nkey: [oops\n---\nStill here.");

        let mut plan = ExecutionPlan::default();
        plan.add_dir(vault.path()).unwrap();

        assert_eq!(summary(plan.jobs()), vec!["text:Still here."]);
        assert!(plan.jobs()[0].metadata.is_empty());
        assert_eq!(plan.warnings().len(), 1);
    }

    #[test]
    fn single_file_keeps_links_and_collects_citations() {
        let vault = create_test_vault();
        let path = create_test_note(
            &vault,
            "note.md",
            "---\ntitle: Solo\n---\nSee [[Other]] and [[@knuth1984]].",
        );

        let mut plan = ExecutionPlan::default();
        plan.add_file(&path).unwrap();

        assert_eq!(summary(plan.jobs()), vec!["text:See [[Other]] and [[@knuth1984]]."]);
        assert_eq!(plan.jobs()[0].metadata["title"], MetaValue::from("Solo"));
        assert!(plan.citations().contains("knuth1984"));
    }

    #[test]
    fn bibliography_goes_before_the_appendix() {
        let vault = create_test_vault();
        let bib = create_test_note(&vault, "refs.bib", "@misc{k, title={T}}");
        create_test_note(&vault, "Index.md", "[[Main]]\n[[Extra]]\n[[More]]");
        create_test_note(&vault, "Main.md", "Cites [[@k]].");
        create_test_note(&vault, "Extra.md", "---\nappendix: true\n---\nExtra.");
        create_test_note(&vault, "More.md", "More.");

        let mut plan = ExecutionPlan::new(PlannerSettings {
            bibliography: Some(bib),
            ..Default::default()
        });
        plan.add_dir(vault.path()).unwrap();

        let jobs = collect(&plan);
        assert_eq!(
            summary(&jobs),
            vec![
                "header:Main@-2",
                "text:Cites [[@k]].",
                "bib:k",
                "header:Extra@-2",
                "text:Extra.",
                "header:More@-2",
                "text:More.",
            ]
        );
        let flags: Vec<bool> = jobs.iter().map(PlannedJob::is_appendix).collect();
        assert_eq!(flags, vec![false, false, false, true, true, true, true]);
        assert_eq!(
            jobs[5].metadata[PlannedJob::APPENDIX_KEY],
            MetaValue::Bool(true)
        );
    }

    #[test]
    fn missing_bibliography_source_is_raised_lazily() {
        let vault = create_test_vault();
        create_test_note(&vault, "Index.md", "[[A]]");
        create_test_note(&vault, "A.md", "Cites [[@k]].");

        let mut plan = ExecutionPlan::default();
        plan.add_dir(vault.path()).unwrap();

        let results: Vec<_> = plan.iter_jobs().collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok() && results[1].is_ok());
        assert!(matches!(
            results[2],
            Err(ConvertError::MissingBibliographySource(None))
        ));
    }

    #[test]
    fn no_bibliography_without_citations_or_when_disabled() {
        let vault = create_test_vault();
        create_test_note(&vault, "Index.md", "Cites [[@k]].");

        let mut plan = ExecutionPlan::new(PlannerSettings {
            implicit_bibliography: false,
            ..Default::default()
        });
        plan.add_dir(vault.path()).unwrap();
        assert_eq!(collect(&plan).len(), 1);
    }
}
