use crate::error::Result;

use super::{
    kinds::{Callout, CodeBlock, Equation, Figure, List, Paragraph, Quote, Section, Table},
    types::{BlockKind, Detector},
};

/// Detectors in priority order; the first to claim a line wins.
pub const DETECTORS: &[Detector] = &[
    Section::detect,
    Equation::detect,
    List::detect_unordered,
    List::detect_ordered,
    Table::detect,
    Quote::detect,
    Figure::detect,
    Callout::detect_unrendered,
    CodeBlock::detect,
];

/// Splits a note body into blocks.
///
/// Headings found in the body are shifted by `latest_level`, the level of
/// the enclosing structural header. Lines no detector claims become
/// paragraphs; blank lines carry nothing and are skipped.
pub fn parse_text(text: &str, latest_level: i32) -> Result<Vec<BlockKind>> {
    let lines: Vec<&str> = text.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    let mut blocks = vec![];
    let mut i = 0;

    'lines: while i < lines.len() {
        for detect in DETECTORS {
            if let Some((mut block, next)) = detect(&lines, i)? {
                if let BlockKind::Section(section) = &mut block {
                    section.level += latest_level;
                }
                blocks.push(block);
                i = next.max(i + 1);
                continue 'lines;
            }
        }

        if !lines[i].trim().is_empty() {
            blocks.push(BlockKind::Paragraph(Paragraph::line(lines[i])));
        }
        i += 1;
    }

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::blocks::kinds::{CodeKind, ListKind};
    use pretty_assertions::assert_eq;

    fn names(blocks: &[BlockKind]) -> Vec<&'static str> {
        blocks.iter().map(BlockKind::name).collect()
    }

    #[test]
    fn heading_then_paragraph() {
        let blocks = parse_text("# Title\n\nSome *italic* and **bold** text with `code`.", 0).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], BlockKind::Section(Section::new(1, "Title")));
        let BlockKind::Paragraph(p) = &blocks[1] else {
            panic!("expected paragraph");
        };
        let rendered = p.render();
        assert!(rendered.contains(r"\textit{italic}"));
        assert!(rendered.contains(r"\textbf{bold}"));
        assert!(rendered.contains(r"\texttt{code}"));
    }

    #[test]
    fn headings_are_offset_by_enclosing_level() {
        let blocks = parse_text("## Details", -1).unwrap();
        assert_eq!(blocks, vec![BlockKind::Section(Section::new(1, "Details"))]);
    }

    #[test]
    fn mixed_document_in_priority_order() {
        let text = "\
Intro line
- a
- b
1. one
> quoted
$$
x
$$
> [!table] T
> |A|B|
> |-|-|
> |1|2|
```python
print(1)
```
Outro";
        let blocks = parse_text(text, 0).unwrap();
        assert_eq!(
            names(&blocks),
            vec![
                "paragraph", "list", "list", "quote", "equation", "table", "code", "paragraph"
            ]
        );
        let BlockKind::List(ordered) = &blocks[2] else {
            panic!("expected list");
        };
        assert_eq!(ordered.kind, ListKind::Ordered);
        let BlockKind::Code(code) = &blocks[6] else {
            panic!("expected code");
        };
        assert_eq!(code.kind, CodeKind::Listing { language: Some("python".into()) });
    }

    #[test]
    fn unterminated_fence_is_recovered() {
        let blocks = parse_text("before\n```\nnever closed\n# still code", 0).unwrap();
        assert_eq!(names(&blocks), vec!["paragraph", "code"]);
    }

    #[test]
    fn every_non_blank_line_is_covered() {
        let blocks = parse_text("a\n\n  \nb\nc", 0).unwrap();
        assert_eq!(
            blocks,
            vec![
                BlockKind::Paragraph(Paragraph::line("a")),
                BlockKind::Paragraph(Paragraph::line("b")),
                BlockKind::Paragraph(Paragraph::line("c")),
            ]
        );
    }

    #[test]
    fn detector_errors_propagate() {
        assert!(parse_text("> [!figure] no image\n> text", 0).is_err());
    }
}
