use regex::Regex;
use std::{collections::BTreeMap, sync::OnceLock};

use crate::{
    error::{ConvertError, Result},
    parsing::{blocks::BlockKind, inline::normalize_line},
};

/// A heading, either synthesized from a note's place in the vault or found
/// as a `#` line inside a note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Signed level: negative levels are parts and chapters.
    pub level: i32,
    pub title: String,
}

fn heading_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#+)\s*(.+)").expect("heading regex"))
}

fn non_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\W").expect("non-word regex"))
}

impl Section {
    pub const PREFIX: char = '#';
    pub const LABEL_PREFIX: &'static str = "sec:";

    pub fn new(level: i32, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
        }
    }

    /// Parses a `#` heading line into its hash count and title.
    pub fn parse_heading(line: &str) -> Option<(i32, &str)> {
        let caps = heading_pattern().captures(line)?;
        let level = i32::try_from(caps.get(1)?.as_str().len()).ok()?;
        let title = caps.get(2)?.as_str().trim_end();
        Some((level, title))
    }

    pub fn detect(lines: &[&str], index: usize) -> Result<Option<(BlockKind, usize)>> {
        Ok(Self::parse_heading(lines[index])
            .map(|(level, title)| (BlockKind::Section(Section::new(level, title)), index + 1)))
    }

    /// `sec:` followed by the title with every non-word character replaced.
    pub fn label(&self) -> String {
        format!(
            "{}{}",
            Self::LABEL_PREFIX,
            non_word().replace_all(&self.title, "_")
        )
    }

    pub fn render(&self, heading_levels: &BTreeMap<i32, String>) -> Result<String> {
        let command = heading_levels
            .get(&self.level)
            .ok_or(ConvertError::UnmappedHeadingLevel(self.level))?;
        Ok(format!(
            "\\{command}{{{}}}\\label{{{}}}",
            normalize_line(&self.title),
            self.label()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn levels() -> BTreeMap<i32, String> {
        [(0, "section"), (1, "subsection")]
            .into_iter()
            .map(|(l, c)| (l, c.to_string()))
            .collect()
    }

    #[rstest]
    #[case("# Title", 1, "Title")]
    #[case("### Deep Dive  ", 3, "Deep Dive")]
    #[case("##No space", 2, "No space")]
    fn parses_headings(#[case] line: &str, #[case] level: i32, #[case] title: &str) {
        assert_eq!(Section::parse_heading(line), Some((level, title)));
    }

    #[rstest]
    #[case("plain text")]
    #[case(" # indented")]
    #[case("#")]
    fn rejects_non_headings(#[case] line: &str) {
        assert_eq!(Section::parse_heading(line), None);
    }

    #[test]
    fn detect_consumes_one_line() {
        let lines = ["# Intro", "text"];
        let (kind, next) = Section::detect(&lines, 0).unwrap().unwrap();
        assert_eq!(kind, BlockKind::Section(Section::new(1, "Intro")));
        assert_eq!(next, 1);
    }

    #[test]
    fn label_replaces_non_word_characters() {
        assert_eq!(Section::new(0, "Results & Discussion").label(), "sec:Results___Discussion");
    }

    #[test]
    fn renders_mapped_command() {
        let rendered = Section::new(1, "Data_Set").render(&levels()).unwrap();
        assert_eq!(rendered, r"\subsection{Data\_Set}\label{sec:Data_Set}");
    }

    #[test]
    fn unmapped_level_is_an_error() {
        let err = Section::new(7, "Too deep").render(&levels()).unwrap_err();
        assert!(matches!(err, ConvertError::UnmappedHeadingLevel(7)));
    }
}
