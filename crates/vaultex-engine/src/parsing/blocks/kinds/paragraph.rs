use crate::parsing::inline::normalize_lines;

/// Paragraph block: the fallback when no detector claims a line.
///
/// Usually holds a single line; unrendered callouts fall back to one
/// paragraph carrying their caption and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub lines: Vec<String>,
}

impl Paragraph {
    pub fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    pub fn render(&self) -> String {
        normalize_lines(&self.lines).join("\n")
    }
}
