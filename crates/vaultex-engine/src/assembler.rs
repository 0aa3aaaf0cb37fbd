use std::{collections::BTreeMap, path::PathBuf};

use biblatex::Bibliography;

use crate::{
    bibliography::{BibliographyStore, to_bibtex},
    error::Result,
    models::Metadata,
    parsing::blocks::{
        Block, BlockKind, RenderContext,
        kinds::{Marker, Section},
        parse_text,
    },
    planner::{JobKind, PlannedJob},
    template::TemplateEngine,
};

/// Everything the assembler needs besides the jobs.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblySettings {
    pub heading_levels: BTreeMap<i32, String>,
    pub graphics: Option<PathBuf>,
    pub appendix_marker: String,
    pub bibliography_marker: String,
}

impl AssemblySettings {
    pub fn default_heading_levels() -> BTreeMap<i32, String> {
        [
            (-2, "part"),
            (-1, "chapter"),
            (0, "section"),
            (1, "subsection"),
            (2, "subsubsection"),
            (3, "paragraph"),
        ]
        .into_iter()
        .map(|(level, command)| (level, command.to_string()))
        .collect()
    }
}

impl Default for AssemblySettings {
    fn default() -> Self {
        Self {
            heading_levels: Self::default_heading_levels(),
            graphics: None,
            appendix_marker: Marker::DEFAULT_APPENDIX.to_string(),
            bibliography_marker: Marker::DEFAULT_BIBLIOGRAPHY.to_string(),
        }
    }
}

/// Consumes jobs in order and accumulates the document's blocks.
pub struct DocumentAssembler {
    settings: AssemblySettings,
    blocks: Vec<Block>,
    in_appendix: bool,
    /// Level of the last structural header; body headings nest under it.
    latest_level: i32,
    bibliography: Option<Bibliography>,
}

impl DocumentAssembler {
    pub fn new(settings: AssemblySettings) -> Self {
        Self {
            settings,
            blocks: vec![],
            in_appendix: false,
            latest_level: 0,
            bibliography: None,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn push(&mut self, kind: BlockKind, metadata: Metadata) {
        self.blocks.push(Block::new(kind, metadata, self.in_appendix));
    }

    pub fn push_job(&mut self, job: PlannedJob) -> Result<()> {
        if !self.in_appendix && job.is_appendix() {
            self.in_appendix = true;
            let marker = Marker::new(self.settings.appendix_marker.clone());
            self.push(BlockKind::Marker(marker), Metadata::new());
            log::info!("Added appendix marker");
        }

        let PlannedJob { kind, metadata, .. } = job;
        match kind {
            JobKind::AddHeader { title, level } => {
                self.latest_level = level;
                log::info!("Added header \"{title}\" with level {level}");
                self.push(BlockKind::Section(Section::new(level, title)), metadata);
            }
            JobKind::AddText { text } => {
                let blocks = parse_text(&text, self.latest_level)?;
                log::info!(
                    "Added {} blocks, total {}",
                    blocks.len(),
                    self.blocks.len() + blocks.len()
                );
                for block in blocks {
                    self.push(block, metadata.clone());
                }
            }
            JobKind::AddBibliography { citations, source } => {
                let store = BibliographyStore::load(&source)?;
                let selected = store.select(&citations)?;
                log::debug!("Selected {} of {} bibliography entries", selected.len(), store.len());
                self.bibliography = Some(selected);

                let marker = Marker::new(self.settings.bibliography_marker.clone());
                self.push(BlockKind::Marker(marker), metadata);
                log::info!("Added bibliography marker");
            }
        }
        Ok(())
    }

    /// Renders every block through the job template, joins them with blank
    /// lines and renders the result through the main template.
    ///
    /// Returns the document and the filtered bibliography as BibTeX, if a
    /// bibliography job ran.
    pub fn finish(&self, templates: &TemplateEngine) -> Result<(String, Option<String>)> {
        let ctx = RenderContext {
            heading_levels: &self.settings.heading_levels,
            graphics: self.settings.graphics.as_deref(),
        };

        let rendered = self
            .blocks
            .iter()
            .map(|block| templates.render_job(&block.render(&ctx)?, &block.metadata))
            .collect::<Result<Vec<_>>>()?;

        let metadata = self
            .blocks
            .first()
            .map(|block| block.metadata.clone())
            .unwrap_or_default();
        let document = templates.render_main(&rendered.join("\n\n"), &metadata)?;

        Ok((document, self.bibliography.as_ref().map(to_bibtex)))
    }
}
