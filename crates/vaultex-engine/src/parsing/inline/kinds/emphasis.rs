/// A delimited emphasis span and the LaTeX command it becomes.
///
/// `guard` may neither precede the opener nor follow the closer, which keeps
/// `*` from matching inside `**`. The first inner character must not be
/// `inner_not`.
#[derive(Debug, Clone, Copy)]
pub struct Emphasis {
    pub open: &'static str,
    pub close: &'static str,
    pub guard: Option<char>,
    pub inner_not: char,
    pub command: &'static str,
}

impl Emphasis {
    pub const QUOTED_ITALIC: Emphasis = Emphasis {
        open: "*\"",
        close: "\"*",
        guard: Some('*'),
        inner_not: '*',
        command: "textquote",
    };

    pub const ITALIC: Emphasis = Emphasis {
        open: "*",
        close: "*",
        guard: Some('*'),
        inner_not: '*',
        command: "textit",
    };

    pub const BOLD: Emphasis = Emphasis {
        open: "**",
        close: "**",
        guard: None,
        inner_not: '*',
        command: "textbf",
    };

    pub const HIGHLIGHT: Emphasis = Emphasis {
        open: "==",
        close: "==",
        guard: None,
        inner_not: '=',
        command: "hl",
    };

    /// Applied in this order; quoted italics must run before plain italics.
    pub const ORDERED: [Emphasis; 4] = [
        Self::QUOTED_ITALIC,
        Self::ITALIC,
        Self::BOLD,
        Self::HIGHLIGHT,
    ];

    pub fn apply_all(line: &str) -> String {
        Self::ORDERED
            .iter()
            .fold(line.to_string(), |acc, emphasis| emphasis.apply(&acc))
    }

    /// Replaces every non-overlapping span, leftmost first, shortest inner text.
    pub fn apply(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut i = 0;
        let mut prev: Option<char> = None;

        while i < line.len() {
            if let Some((inner_end, end)) = self.match_at(line, i, prev) {
                out.push('\\');
                out.push_str(self.command);
                out.push('{');
                out.push_str(&line[i + self.open.len()..inner_end]);
                out.push('}');
                prev = line[..end].chars().next_back();
                i = end;
                continue;
            }
            let Some(c) = line[i..].chars().next() else {
                break;
            };
            out.push(c);
            prev = Some(c);
            i += c.len_utf8();
        }

        out
    }

    /// Returns `(inner_end, span_end)` for a span opening at `start`.
    fn match_at(&self, line: &str, start: usize, prev: Option<char>) -> Option<(usize, usize)> {
        if !line[start..].starts_with(self.open) {
            return None;
        }
        if self.guard.is_some() && prev == self.guard {
            return None;
        }

        let inner_start = start + self.open.len();
        let first = line[inner_start..].chars().next()?;
        if first == self.inner_not {
            return None;
        }

        let mut k = inner_start + first.len_utf8();
        while k < line.len() {
            if line[k..].starts_with(self.close) {
                let end = k + self.close.len();
                let next = line[end..].chars().next();
                if self.guard.is_none() || next != self.guard {
                    return Some((k, end));
                }
            }
            k += line[k..].chars().next()?.len_utf8();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("some *italic* text", r"some \textit{italic} text")]
    #[case("some **bold** text", r"some \textbf{bold} text")]
    #[case("*a* and **b**", r"\textit{a} and \textbf{b}")]
    #[case(r#"*"quoted"* words"#, r"\textquote{quoted} words")]
    #[case("==marked== up", r"\hl{marked} up")]
    #[case("a * b * c", r"a \textit{ b } c")]
    #[case("unclosed *star", "unclosed *star")]
    #[case("***", "***")]
    #[case("émphase *élan*", r"émphase \textit{élan}")]
    fn emphasis(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(Emphasis::apply_all(input), expected);
    }

    #[test]
    fn italic_skips_bold_markers() {
        assert_eq!(Emphasis::ITALIC.apply("**bold**"), "**bold**");
    }
}
