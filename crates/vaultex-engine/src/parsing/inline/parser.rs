use crate::parsing::span::Span;

use super::{
    cursor::Cursor,
    kinds::{Citation, CodeSpan, WikiLink},
    types::InlineNode,
};

/// Scans a note body into [`InlineNode`]s.
///
/// Code spans are checked first and suppress all other scanning inside them,
/// so `` `[[not a link]]` `` is never followed by the planner. No construct
/// spans a line break. Text between special constructs is emitted as
/// `InlineNode::Text`.
pub fn scan_inline(s: &str) -> Vec<InlineNode> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<InlineNode>, start: usize, end: usize) {
        if end > start {
            out.push(InlineNode::Text(Span { start, end }));
        }
    }

    while !cur.eof() {
        let node = try_scan_code_span(&mut cur).or_else(|| try_scan_wikilink(&mut cur));
        if let Some(node) = node {
            let full = node.full();
            flush_text(&mut out, text_start, full.start);
            text_start = full.end;
            out.push(node);
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, text_start, cur.pos());
    out
}

fn try_scan_code_span(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(CodeSpan::TICK) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump();
    cur.bump_until(|c| matches!(c.peek(), Some(CodeSpan::TICK | NEWLINE)));

    if cur.bump() != Some(CodeSpan::TICK) {
        *cur = saved;
        return None;
    }

    Some(InlineNode::CodeSpan(Span {
        start,
        end: cur.pos(),
    }))
}

/// Scans `[[target]]`, `[[target|alias]]`, `![[embed]]` and `[[@citation]]`.
///
/// On failure (unclosed on its line) the cursor is restored. Only the first
/// `|` segment is the alias; later segments are dropped.
fn try_scan_wikilink(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if !cur.starts_with(WikiLink::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let embed = cur.prev() == Some(WikiLink::EMBED);
    let start = if embed { cur.pos() - 1 } else { cur.pos() };
    cur.bump_n(WikiLink::OPEN.len());
    let target_start = cur.pos();
    cur.bump_until(ends_segment);
    let target_end = cur.pos();

    let mut alias = None;
    if cur.peek() == Some(WikiLink::ALIAS) {
        cur.bump();
        let alias_start = cur.pos();
        cur.bump_until(ends_segment);
        alias = Some(Span {
            start: alias_start,
            end: cur.pos(),
        });
        cur.bump_until(|c| c.peek() == Some(NEWLINE) || c.starts_with(WikiLink::CLOSE));
    }

    if !cur.starts_with(WikiLink::CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump_n(WikiLink::CLOSE.len());

    let full = Span {
        start,
        end: cur.pos(),
    };
    let target = Span {
        start: target_start,
        end: target_end,
    };

    if !embed && cur.byte_at(target_start) == Some(Citation::MARK) {
        return Some(InlineNode::Citation {
            full,
            key: Span {
                start: target_start + 1,
                end: target_end,
            },
        });
    }

    Some(InlineNode::WikiLink {
        full,
        target,
        alias,
        embed,
    })
}

const NEWLINE: u8 = b'\n';

fn ends_segment(cur: &Cursor<'_>) -> bool {
    matches!(cur.peek(), Some(WikiLink::ALIAS | NEWLINE)) || cur.starts_with(WikiLink::CLOSE)
}
