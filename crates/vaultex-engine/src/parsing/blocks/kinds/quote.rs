use crate::{
    error::Result,
    parsing::{blocks::BlockKind, inline::normalize_lines},
};

use super::Callout;

/// A run of `>` lines that does not open a reserved callout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Lines with the quote marker removed.
    pub lines: Vec<String>,
}

impl Quote {
    /// The quote prefix character.
    pub const PREFIX: char = '>';

    pub fn is_quoted(line: &str) -> bool {
        line.starts_with(Self::PREFIX)
    }

    /// Drops the leading `>` and at most one following space.
    pub fn strip_marker(line: &str) -> &str {
        let Some(rest) = line.strip_prefix(Self::PREFIX) else {
            return line;
        };
        rest.strip_prefix(' ').unwrap_or(rest)
    }

    pub fn detect(lines: &[&str], index: usize) -> Result<Option<(BlockKind, usize)>> {
        if !Self::is_quoted(lines[index]) || Callout::opens_reserved(lines[index]) {
            return Ok(None);
        }

        let run = 1 + lines[index + 1..]
            .iter()
            .take_while(|l| Self::is_quoted(l) && !Callout::opens_reserved(l))
            .count();
        let lines = lines[index..index + run]
            .iter()
            .map(|l| Self::strip_marker(l).to_string())
            .collect();
        Ok(Some((BlockKind::Quote(Quote { lines }), index + run)))
    }

    pub fn render(&self) -> String {
        let mut out = String::from("\\begin{displayquote}\n");
        for line in normalize_lines(&self.lines) {
            out.push('\t');
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str("\\end{displayquote}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_one_marker() {
        assert_eq!(Quote::strip_marker("> text"), "text");
        assert_eq!(Quote::strip_marker(">text"), "text");
        assert_eq!(Quote::strip_marker(">  two spaces"), " two spaces");
        assert_eq!(Quote::strip_marker("> > nested"), "> nested");
    }

    #[test]
    fn quote_run() {
        let lines = ["> To be", "> or not", "", "> again"];
        let (kind, next) = Quote::detect(&lines, 0).unwrap().unwrap();
        assert_eq!(next, 2);
        let BlockKind::Quote(quote) = kind else {
            panic!("expected quote");
        };
        assert_eq!(
            quote.render(),
            "\\begin{displayquote}\n\tTo be\n\tor not\n\\end{displayquote}\n"
        );
    }

    #[test]
    fn reserved_callouts_are_not_quotes() {
        assert!(Quote::detect(&["> [!figure] A plot"], 0).unwrap().is_none());
        assert!(Quote::detect(&["> [!table] Results"], 0).unwrap().is_none());
    }

    #[test]
    fn custom_callouts_are_quotes() {
        let (_, next) = Quote::detect(&["> [!note] Heads up", "> body"], 0)
            .unwrap()
            .unwrap();
        assert_eq!(next, 2);
    }

    #[test]
    fn quote_stops_before_reserved_callout() {
        let lines = ["> said", "> [!table] T", "> |a|"];
        let (_, next) = Quote::detect(&lines, 0).unwrap().unwrap();
        assert_eq!(next, 1);
    }
}
