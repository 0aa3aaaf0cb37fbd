use super::{kinds::WikiLink, parser::scan_inline, types::InlineNode};

/// A link to another note found in a note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteLink {
    pub target: String,
    pub alias: Option<String>,
}

impl NoteLink {
    /// The child note name the planner visits.
    pub fn node_name(&self) -> &str {
        WikiLink::display_name(&self.target, self.alias.as_deref())
    }
}

/// Strips note links from `text`, returning the trimmed remainder and the links
/// in document order.
///
/// Citations, embeds and anything inside code spans stay in the text.
pub fn extract_links(text: &str) -> (String, Vec<NoteLink>) {
    let mut remainder = String::with_capacity(text.len());
    let mut links = vec![];
    let mut last = 0;

    for node in scan_inline(text) {
        let InlineNode::WikiLink {
            full,
            target,
            alias,
            embed: false,
        } = node
        else {
            continue;
        };

        remainder.push_str(&text[last..full.start]);
        last = full.end;
        links.push(NoteLink {
            target: target.slice(text).to_string(),
            alias: alias.map(|a| a.slice(text).to_string()),
        });
    }
    remainder.push_str(&text[last..]);

    (remainder.trim().to_string(), links)
}
