use crate::{error::Result, parsing::blocks::BlockKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceSig {
    Backticks,
    Tildes,
}

/// How a fenced block is emitted, chosen by its language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeKind {
    /// `latex`: passed through untouched.
    RawMarkup,
    /// `tikz`: passed through with document boilerplate removed.
    Diagram,
    /// Anything else becomes a listing, with the language when tagged.
    Listing { language: Option<String> },
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    pub fn sig(line: &str) -> Option<FenceSig> {
        let t = line.trim_end_matches(['\r', '\n']);
        if t.starts_with(Self::BACKTICKS) {
            Some(FenceSig::Backticks)
        } else if t.starts_with(Self::TILDES) {
            Some(FenceSig::Tildes)
        } else {
            None
        }
    }

    pub fn closes(open: FenceSig, sig: Option<FenceSig>) -> bool {
        sig == Some(open)
    }

    /// Language tag after the fence, if any.
    pub fn language(line: &str) -> Option<&str> {
        line.trim_start_matches(['`', '~'])
            .split_whitespace()
            .next()
    }
}

impl CodeKind {
    fn from_language(language: Option<&str>) -> Self {
        match language {
            Some("latex") => CodeKind::RawMarkup,
            Some("tikz") => CodeKind::Diagram,
            other => CodeKind::Listing {
                language: other.map(str::to_string),
            },
        }
    }
}

/// The lines of a fenced block, fences excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub kind: CodeKind,
    pub lines: Vec<String>,
}

impl CodeBlock {
    /// Fenced blocks are raw zones; an unclosed fence runs to the end of the
    /// buffer.
    pub fn detect(lines: &[&str], index: usize) -> Result<Option<(BlockKind, usize)>> {
        let Some(open) = CodeFence::sig(lines[index]) else {
            return Ok(None);
        };

        let close = lines[index + 1..]
            .iter()
            .position(|l| CodeFence::closes(open, CodeFence::sig(l)))
            .map(|offset| index + 1 + offset);
        let (body_end, next) = match close {
            Some(close) => (close, close + 1),
            None => (lines.len(), lines.len()),
        };

        let block = CodeBlock {
            kind: CodeKind::from_language(CodeFence::language(lines[index])),
            lines: lines[index + 1..body_end]
                .iter()
                .map(|l| l.to_string())
                .collect(),
        };
        Ok(Some((BlockKind::Code(block), next)))
    }

    fn is_diagram_preamble(line: &str) -> bool {
        let t = line.trim_start();
        t.starts_with("\\usepackage") || t.starts_with("\\usetikzlibrary")
    }

    pub fn render(&self) -> String {
        match &self.kind {
            CodeKind::RawMarkup => self.lines.join("\n"),
            CodeKind::Diagram => self
                .lines
                .iter()
                .filter(|l| !Self::is_diagram_preamble(l))
                .map(|l| l.replace("\\begin{document}", "").replace("\\end{document}", ""))
                .collect::<Vec<_>>()
                .join("\n"),
            CodeKind::Listing { language } => {
                let options = language
                    .as_deref()
                    .map(|l| format!("[language={l}]"))
                    .unwrap_or_default();
                let mut out = format!("\\begin{{lstlisting}}{options}\n");
                for line in &self.lines {
                    out.push_str(line);
                    out.push('\n');
                }
                out.push_str("\\end{lstlisting}\n");
                out
            }
        }
    }
}
