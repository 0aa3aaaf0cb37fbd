use regex::Regex;
use std::sync::OnceLock;

use crate::{error::Result, parsing::blocks::BlockKind};

/// Display math between `$$` delimiters, optionally labelled with a
/// `%% label %%` command on the opening line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    pub label: Option<String>,
    pub content: String,
}

fn label_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"%%\s*(.*?)\s*%%").expect("equation label regex"))
}

impl Equation {
    pub const DELIMITER: &'static str = "$$";

    fn is_delimiter(line: &str) -> bool {
        line.starts_with(Self::DELIMITER)
    }

    pub fn detect(lines: &[&str], index: usize) -> Result<Option<(BlockKind, usize)>> {
        let opener = lines[index];
        if !Self::is_delimiter(opener) {
            return Ok(None);
        }

        let label = label_pattern()
            .captures(opener)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|l| !l.is_empty());
        let rest = label_pattern().replace(&opener[Self::DELIMITER.len()..], "");

        if let Some(end) = rest.find(Self::DELIMITER) {
            let content = rest[..end].trim().to_string();
            return Ok(Some((BlockKind::Equation(Equation { label, content }), index + 1)));
        }

        let close = lines[index + 1..]
            .iter()
            .position(|l| Self::is_delimiter(l))
            .map(|offset| index + 1 + offset);
        let (body_end, next) = match close {
            Some(close) => (close, close + 1),
            None => (lines.len(), lines.len()),
        };

        let content = lines[index + 1..body_end].join("\n");
        Ok(Some((BlockKind::Equation(Equation { label, content }), next)))
    }

    pub fn render(&self) -> String {
        let mut out = String::from("\\begin{equation}\n");
        if let Some(label) = &self.label {
            out.push_str(&format!("\t\\label{{{label}}}\n"));
        }
        out.push_str(&format!("\t{}\n\\end{{equation}}\n", self.content));
        out
    }
}
