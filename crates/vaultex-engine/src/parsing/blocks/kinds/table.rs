use regex::Regex;
use std::sync::OnceLock;

use crate::{
    error::{ConvertError, Result},
    parsing::{blocks::BlockKind, inline::normalize_line},
};

use super::{Callout, CalloutKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptionPosition {
    #[default]
    Top,
    Bottom,
}

/// A `[!table]` callout whose body is a pipe-delimited grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub caption: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub position: Option<String>,
    pub column_format: String,
    pub centering: bool,
    pub caption_position: CaptionPosition,
}

fn separator_cell() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^:?-+:?$").expect("table separator regex"))
}

fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix(Table::PIPE).unwrap_or(line);
    let line = line.strip_suffix(Table::PIPE).unwrap_or(line);
    line.split(Table::PIPE).map(|c| c.trim().to_string()).collect()
}

fn is_separator(row: &[String]) -> bool {
    row.iter().any(|c| !c.is_empty())
        && row
            .iter()
            .all(|c| c.is_empty() || separator_cell().is_match(c))
}

impl Table {
    pub const PIPE: char = '|';

    pub fn detect(lines: &[&str], index: usize) -> Result<Option<(BlockKind, usize)>> {
        let Some((callout, next)) = Callout::parse(CalloutKind::Table, lines, index)? else {
            return Ok(None);
        };
        Ok(Some((BlockKind::Table(Self::from_callout(callout)?), next)))
    }

    /// Builds the grid: cells are normalized, separator and blank rows dropped,
    /// columns empty in every row dropped.
    pub fn from_callout(callout: Callout) -> Result<Self> {
        let mut grid: Vec<Vec<String>> = callout
            .body
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| split_row(&normalize_line(l)))
            .filter(|row| !is_separator(row))
            .filter(|row| row.iter().any(|c| !c.is_empty()))
            .collect();

        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut grid {
            row.resize(width, String::new());
        }
        let keep: Vec<usize> = (0..width)
            .filter(|&col| grid.iter().any(|row| !row[col].is_empty()))
            .collect();
        if keep.is_empty() {
            return Err(ConvertError::Format(format!(
                "table `{}` has no columns",
                callout.caption
            )));
        }

        let mut grid = grid
            .into_iter()
            .map(|row| keep.iter().map(|&col| row[col].clone()).collect::<Vec<_>>());
        let header = grid.next().unwrap_or_default();
        let rows = grid.collect();

        let column_format = match callout.config_str("column_format")? {
            Some(format) => format,
            None => format!("l{}", "r".repeat(keep.len() - 1)),
        };
        let caption_position = match callout.config_str("caption_position")?.as_deref() {
            None | Some("top") => CaptionPosition::Top,
            Some("bottom") => CaptionPosition::Bottom,
            Some(other) => {
                return Err(ConvertError::MalformedBlock {
                    kind: CalloutKind::Table.tag(),
                    reason: format!("unknown caption_position `{other}`"),
                });
            }
        };

        Ok(Table {
            position: callout.config_str("position")?,
            centering: callout.config_bool("centering", true)?,
            caption: normalize_line(&callout.caption),
            header,
            rows,
            column_format,
            caption_position,
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::from("\\begin{table}");
        if let Some(position) = &self.position {
            out.push_str(&format!("[{position}]"));
        }
        out.push('\n');
        if self.centering {
            out.push_str("\\centering\n");
        }
        let caption = format!("\\caption{{{}}}\n", self.caption);
        if self.caption_position == CaptionPosition::Top {
            out.push_str(&caption);
        }

        out.push_str(&format!("\\begin{{tabular}}{{{}}}\n", self.column_format));
        out.push_str("\\toprule\n");
        out.push_str(&format!("{} \\\\\n", self.header.join(" & ")));
        out.push_str("\\midrule\n");
        for row in &self.rows {
            out.push_str(&format!("{} \\\\\n", row.join(" & ")));
        }
        out.push_str("\\bottomrule\n");
        out.push_str("\\end{tabular}\n");

        if self.caption_position == CaptionPosition::Bottom {
            out.push_str(&caption);
        }
        out.push_str("\\end{table}\n");
        out
    }
}
