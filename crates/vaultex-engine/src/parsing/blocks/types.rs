use std::{collections::BTreeMap, path::Path};

use crate::{error::Result, models::Metadata};

use super::kinds::{
    CodeBlock, Equation, Figure, List, Marker, Paragraph, Quote, Section, Table,
};

/// A detection routine: given the line buffer and a cursor, either claims a
/// run of lines starting at the cursor and returns the index just past it,
/// or declines.
pub type Detector = fn(&[&str], usize) -> Result<Option<(BlockKind, usize)>>;

/// The closed set of block variants.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    /// Fallback for any line no detector claims.
    Paragraph(Paragraph),
    /// Injected markup such as the appendix or bibliography boundary.
    Marker(Marker),
    Section(Section),
    Equation(Equation),
    /// Unordered and ordered lists.
    List(List),
    Quote(Quote),
    Table(Table),
    Figure(Figure),
    /// Fenced code: raw markup, diagrams and listings.
    Code(CodeBlock),
}

/// What rendering needs from the run configuration.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Signed heading level to sectioning command name.
    pub heading_levels: &'a BTreeMap<i32, String>,
    /// Folder figure images are resolved against, if any.
    pub graphics: Option<&'a Path>,
}

impl BlockKind {
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Paragraph(_) => "paragraph",
            BlockKind::Marker(_) => "marker",
            BlockKind::Section(_) => "section",
            BlockKind::Equation(_) => "equation",
            BlockKind::List(_) => "list",
            BlockKind::Quote(_) => "quote",
            BlockKind::Table(_) => "table",
            BlockKind::Figure(_) => "figure",
            BlockKind::Code(_) => "code",
        }
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> Result<String> {
        match self {
            BlockKind::Paragraph(p) => Ok(p.render()),
            BlockKind::Marker(m) => Ok(m.render()),
            BlockKind::Section(s) => s.render(ctx.heading_levels),
            BlockKind::Equation(e) => Ok(e.render()),
            BlockKind::List(l) => Ok(l.render()),
            BlockKind::Quote(q) => Ok(q.render()),
            BlockKind::Table(t) => Ok(t.render()),
            BlockKind::Figure(f) => f.render(ctx.graphics),
            BlockKind::Code(c) => Ok(c.render()),
        }
    }
}

/// A block of the output document together with the metadata of the job it
/// came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub metadata: Metadata,
    /// Set for blocks emitted after the appendix boundary.
    pub appendix: bool,
}

impl Block {
    pub fn new(kind: BlockKind, metadata: Metadata, appendix: bool) -> Self {
        Self {
            kind,
            metadata,
            appendix,
        }
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> Result<String> {
        self.kind.render(ctx)
    }
}
