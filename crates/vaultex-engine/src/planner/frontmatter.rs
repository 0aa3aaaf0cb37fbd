/// Front matter opens with a `---` line at the very start of a note.
pub const DELIMITER: &str = "---";

/// Splits a note into its front-matter source and body.
///
/// The body is trimmed. Without an opening delimiter, or without a closing
/// one, the whole text is body.
pub fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return (None, text.trim());
    };
    if first.trim_end() != DELIMITER {
        return (None, text.trim());
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let source = &text[start..offset];
            let body = &text[offset + line.len()..];
            return (Some(source), body.trim());
        }
        offset += line.len();
    }

    (None, text.trim())
}
