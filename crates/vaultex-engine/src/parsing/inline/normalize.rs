use super::{
    escape::{escape_reserved, group_brackets},
    kinds::{Citation, CodeSpan, Emphasis, WikiLink},
    protect::protect,
};

/// Normalizes each line independently; output has the same length and order.
pub fn normalize_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines.iter().map(|l| normalize_line(l.as_ref())).collect()
}

/// Turns one line of inline Markdown into LaTeX.
///
/// The step order is load-bearing: every step assumes the ones before it ran.
pub fn normalize_line(line: &str) -> String {
    let protected = protect(line);
    let escaped = escape_reserved(&protected.text);
    let grouped = group_brackets(&escaped);
    let restored = protected.restore(grouped);

    let referenced = CodeSpan::replace_references(&restored);
    let monospaced = CodeSpan::replace_monospace(&referenced);
    let emphasized = Emphasis::apply_all(&monospaced);
    let cited = Citation::group_adjacent(&emphasized);
    WikiLink::replace_remaining(&cited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Plain prose, nothing else.")]
    #[case("Numbers 1, 2 and 3!")]
    #[case("")]
    fn plain_prose_round_trips(#[case] line: &str) {
        assert_eq!(normalize_line(line), line);
    }

    #[test]
    fn reserved_characters_are_escaped_outside_protected_spans() {
        assert_eq!(
            normalize_line("50% of a_b costs $x_1$"),
            r"50\% of a\_b costs $x_1$"
        );
    }

    #[test]
    fn italic_bold_and_code() {
        assert_eq!(
            normalize_line("Some *italic* and **bold** text with `code`."),
            r"Some \textit{italic} and \textbf{bold} text with \texttt{code}."
        );
    }

    #[test]
    fn cross_references_and_citations() {
        assert_eq!(
            normalize_line("As `fig:loss_curve` shows [[@smith2020]], [[@jones_2019]]."),
            r"As \autoref{fig:loss_curve} shows \citep{smith2020,jones_2019}."
        );
    }

    #[test]
    fn separate_citations_stay_separate() {
        assert_eq!(
            normalize_line("[[@a]] argues, while [[@b]] disagrees"),
            r"\citep{a} argues, while \citep{b} disagrees"
        );
    }

    #[test]
    fn bracket_residue_is_grouped() {
        assert_eq!(normalize_line("item [optional]"), "item {[optional]}");
    }

    #[test]
    fn leftover_wikilink_renders_as_text() {
        assert_eq!(normalize_line("see [[Methods/Setup|setup]]"), "see setup");
    }

    #[test]
    fn keeps_line_count() {
        let lines = ["a", "*b*", "c"];
        assert_eq!(normalize_lines(&lines), vec!["a", r"\textit{b}", "c"]);
    }
}
