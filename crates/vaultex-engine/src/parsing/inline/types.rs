use crate::parsing::span::Span;

/// A scanned inline node with byte spans into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Plain text that isn't part of any special construct.
    Text(Span),
    /// A code span including its backticks. No scanning happens inside.
    CodeSpan(Span),
    /// A wiki-style link `[[target]]`, `[[target|alias]]` or embed `![[target]]`.
    WikiLink {
        /// Full span including `[[` and `]]` (and the `!` of an embed).
        full: Span,
        target: Span,
        alias: Option<Span>,
        /// Whether the link is an embed (`![[...]]`).
        embed: bool,
    },
    /// A citation tag `[[@key]]`.
    Citation { full: Span, key: Span },
}

impl InlineNode {
    pub fn full(&self) -> Span {
        match self {
            InlineNode::Text(sp) | InlineNode::CodeSpan(sp) => *sp,
            InlineNode::WikiLink { full, .. }
            | InlineNode::Citation { full, .. } => *full,
        }
    }
}
