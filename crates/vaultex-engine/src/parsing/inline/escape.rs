/// Characters LaTeX treats specially in running text.
pub const RESERVED: &[char] = &['$', '%', '_', '}', '&', '#', '{'];

/// Backslash-escapes every reserved character.
pub fn escape_reserved(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Wraps bracketed residue in a brace group so LaTeX does not read it as an
/// optional argument: `[1]` becomes `{[1]}`.
///
/// A group starts at a `[` not preceded by `[` and runs to the last `]` on the
/// line that is not followed by another `]`.
pub fn group_brackets(line: &str) -> String {
    let bytes = line.as_bytes();
    let mut out = String::with_capacity(line.len() + 2);
    let mut i = 0;

    while i < line.len() {
        let opens = bytes[i] == b'[' && (i == 0 || bytes[i - 1] != b'[');
        if opens && let Some(close) = last_free_close(bytes, i + 1) {
            out.push('{');
            out.push_str(&line[i..=close]);
            out.push('}');
            i = close + 1;
            continue;
        }
        let next = next_char_boundary(line, i);
        out.push_str(&line[i..next]);
        i = next;
    }

    out
}

fn last_free_close(bytes: &[u8], from: usize) -> Option<usize> {
    (from..bytes.len())
        .rev()
        .find(|&k| bytes[k] == b']' && bytes.get(k + 1) != Some(&b']'))
}

fn next_char_boundary(s: &str, i: usize) -> usize {
    let mut next = i + 1;
    while !s.is_char_boundary(next) {
        next += 1;
    }
    next
}
