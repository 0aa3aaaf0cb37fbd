use regex::Regex;
use std::sync::OnceLock;

use crate::{
    error::Result,
    parsing::{blocks::BlockKind, inline::normalize_lines},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `- item`
    Unordered,
    /// `1. item`
    Ordered,
}

impl ListKind {
    fn marker(self) -> &'static Regex {
        static UNORDERED: OnceLock<Regex> = OnceLock::new();
        static ORDERED: OnceLock<Regex> = OnceLock::new();
        match self {
            ListKind::Unordered => {
                UNORDERED.get_or_init(|| Regex::new(r"^-\s+").expect("unordered item regex"))
            }
            ListKind::Ordered => {
                ORDERED.get_or_init(|| Regex::new(r"^\d+\.\s+").expect("ordered item regex"))
            }
        }
    }

    pub fn environment(self) -> &'static str {
        match self {
            ListKind::Unordered => "itemize",
            ListKind::Ordered => "enumerate",
        }
    }
}

/// A maximal run of consecutive items of one list kind, markers stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub kind: ListKind,
    pub items: Vec<String>,
}

impl List {
    fn detect_kind(
        kind: ListKind,
        lines: &[&str],
        index: usize,
    ) -> Option<(BlockKind, usize)> {
        let marker = kind.marker();
        let run = lines[index..]
            .iter()
            .take_while(|l| marker.is_match(l))
            .count();
        if run == 0 {
            return None;
        }

        let items = lines[index..index + run]
            .iter()
            .map(|l| marker.replace(l, "").into_owned())
            .collect();
        Some((BlockKind::List(List { kind, items }), index + run))
    }

    pub fn detect_unordered(lines: &[&str], index: usize) -> Result<Option<(BlockKind, usize)>> {
        Ok(Self::detect_kind(ListKind::Unordered, lines, index))
    }

    pub fn detect_ordered(lines: &[&str], index: usize) -> Result<Option<(BlockKind, usize)>> {
        Ok(Self::detect_kind(ListKind::Ordered, lines, index))
    }

    pub fn render(&self) -> String {
        let env = self.kind.environment();
        let mut out = format!("\\begin{{{env}}}\n");
        for item in normalize_lines(&self.items) {
            out.push_str(&format!("\t\\item {item}\n"));
        }
        out.push_str(&format!("\\end{{{env}}}\n"));
        out
    }
}
