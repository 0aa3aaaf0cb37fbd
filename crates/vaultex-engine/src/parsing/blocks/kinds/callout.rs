use regex::Regex;
use std::sync::OnceLock;

use crate::{
    error::{ConvertError, Result},
    models::{MetaValue, Metadata, parse_yaml_metadata},
    parsing::blocks::BlockKind,
};

use super::{Paragraph, Quote};

/// Callout tags with a dedicated block. Lines opening one of these never
/// form a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalloutKind {
    Figure,
    Table,
    /// Reserved without a renderer.
    Chart,
}

impl CalloutKind {
    pub const RESERVED: [CalloutKind; 3] =
        [CalloutKind::Figure, CalloutKind::Table, CalloutKind::Chart];

    pub fn tag(self) -> &'static str {
        match self {
            CalloutKind::Figure => "figure",
            CalloutKind::Table => "table",
            CalloutKind::Chart => "chart",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        Self::RESERVED.into_iter().find(|k| k.tag() == tag)
    }
}

/// The parsed shell of a reserved callout: caption, body and embedded
/// configuration. Tables and figures build on this.
#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    pub kind: CalloutKind,
    pub caption: String,
    /// Body lines with quote markers stripped and the config region removed.
    pub body: Vec<String>,
    pub config: Metadata,
}

fn opener_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^>\s*\[!(\w+)\]\s*(.*)").expect("callout regex"))
}

impl Callout {
    /// Opens and closes the embedded configuration region.
    pub const CONFIG_MARKER: &'static str = "%%";

    fn opener(line: &str) -> Option<(CalloutKind, &str)> {
        let caps = opener_pattern().captures(line)?;
        let kind = CalloutKind::from_tag(caps.get(1)?.as_str())?;
        Some((kind, caps.get(2).map_or("", |m| m.as_str())))
    }

    /// Whether `line` opens a figure, table or chart callout.
    pub fn opens_reserved(line: &str) -> bool {
        Self::opener(line).is_some()
    }

    /// Parses the callout of `kind` opening at `index`, returning it and the
    /// index past its last quoted line.
    pub fn parse(kind: CalloutKind, lines: &[&str], index: usize) -> Result<Option<(Callout, usize)>> {
        let Some((found, caption)) = Self::opener(lines[index]) else {
            return Ok(None);
        };
        if found != kind {
            return Ok(None);
        }

        let end = index
            + 1
            + lines[index + 1..]
                .iter()
                .take_while(|l| Quote::is_quoted(l))
                .count();
        let mut body: Vec<String> = lines[index + 1..end]
            .iter()
            .map(|l| Quote::strip_marker(l).to_string())
            .collect();

        let is_marker = |l: &String| l.starts_with(Self::CONFIG_MARKER);
        let config = match body.iter().position(is_marker) {
            Some(open) => {
                let close = body[open + 1..]
                    .iter()
                    .position(is_marker)
                    .map_or(body.len(), |offset| open + 1 + offset);
                let source = body[open + 1..close].join("\n");
                let config = parse_yaml_metadata(&source).map_err(|reason| {
                    ConvertError::MalformedBlock {
                        kind: kind.tag(),
                        reason: format!("could not parse callout configuration: {reason}"),
                    }
                })?;
                body.truncate(open);
                config
            }
            None => Metadata::new(),
        };

        let callout = Callout {
            kind,
            caption: caption.trim().to_string(),
            body,
            config,
        };
        Ok(Some((callout, end)))
    }

    /// Reserved callouts without a renderer degrade to one plain paragraph.
    pub fn detect_unrendered(lines: &[&str], index: usize) -> Result<Option<(BlockKind, usize)>> {
        Ok(Self::parse(CalloutKind::Chart, lines, index)?.map(|(callout, next)| {
            let mut text = vec![callout.caption];
            text.extend(callout.body);
            text.retain(|l| !l.trim().is_empty());
            (BlockKind::Paragraph(Paragraph { lines: text }), next)
        }))
    }

    pub fn config_str(&self, key: &str) -> Result<Option<String>> {
        match self.config.get(key) {
            None => Ok(None),
            Some(MetaValue::Map(_) | MetaValue::List(_)) => Err(self.invalid(key, "a scalar")),
            Some(value) => Ok(Some(value.to_markup())),
        }
    }

    pub fn config_bool(&self, key: &str, default: bool) -> Result<bool> {
        match self.config.get(key) {
            None => Ok(default),
            Some(value) => value.as_bool().ok_or_else(|| self.invalid(key, "a boolean")),
        }
    }

    pub fn config_f64(&self, key: &str, default: f64) -> Result<f64> {
        match self.config.get(key) {
            None => Ok(default),
            Some(value) => value.as_f64().ok_or_else(|| self.invalid(key, "a number")),
        }
    }

    fn invalid(&self, key: &str, expected: &str) -> ConvertError {
        ConvertError::MalformedBlock {
            kind: self.kind.tag(),
            reason: format!("`{key}` must be {expected}"),
        }
    }
}
