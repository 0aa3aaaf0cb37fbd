use regex::Regex;
use std::{path::Path, sync::OnceLock};

use crate::{
    error::{ConvertError, Result},
    parsing::{
        blocks::BlockKind,
        inline::{kinds::WikiLink, normalize_line},
    },
};

use super::{Callout, CalloutKind};

/// A `[!figure]` callout whose first body line embeds an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub caption: String,
    /// File name of the image, path segments and display text dropped.
    pub image: String,
    pub label: Option<String>,
    pub position: Option<String>,
    pub centering: bool,
    /// Fraction of the text width.
    pub width: f64,
}

fn embed_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*!\[\[(.*?)\]\]").expect("image embed regex"))
}

impl Figure {
    pub const DEFAULT_WIDTH: f64 = 0.5;
    pub const LABEL_PREFIX: &'static str = "fig:";

    /// Extracts the image file name from an `![[...]]` embed.
    pub fn image_name(line: &str) -> Option<&str> {
        let target = embed_pattern().captures(line)?.get(1)?.as_str();
        let target = target
            .split(WikiLink::ALIAS as char)
            .next()
            .unwrap_or(target);
        target.rsplit(WikiLink::PATH_SEPARATOR).next()
    }

    pub fn detect(lines: &[&str], index: usize) -> Result<Option<(BlockKind, usize)>> {
        let Some((callout, next)) = Callout::parse(CalloutKind::Figure, lines, index)? else {
            return Ok(None);
        };
        Ok(Some((BlockKind::Figure(Self::from_callout(callout)?), next)))
    }

    pub fn from_callout(callout: Callout) -> Result<Self> {
        let first = callout.body.first().map(String::as_str).unwrap_or_default();
        let image = Self::image_name(first).ok_or_else(|| ConvertError::MalformedBlock {
            kind: CalloutKind::Figure.tag(),
            reason: format!("could not find an image reference in `{first}`"),
        })?;

        Ok(Figure {
            image: image.to_string(),
            label: callout.config_str("label")?,
            position: callout.config_str("position")?,
            centering: callout.config_bool("centering", true)?,
            width: callout.config_f64("width", Self::DEFAULT_WIDTH)?,
            caption: callout.caption,
        })
    }

    /// Path emitted in `\includegraphics`: joined onto the graphics folder,
    /// which must then contain it, or the bare name when there is none.
    pub fn image_path(&self, graphics: Option<&Path>) -> Result<String> {
        let Some(graphics) = graphics else {
            return Ok(self.image.clone());
        };
        let path = graphics.join(&self.image);
        if !path.is_file() {
            return Err(ConvertError::MissingGraphic(path));
        }
        Ok(path.display().to_string())
    }

    pub fn render(&self, graphics: Option<&Path>) -> Result<String> {
        let mut out = String::from("\\begin{figure}");
        if let Some(position) = &self.position {
            out.push_str(&format!("[{position}]"));
        }
        out.push('\n');
        if self.centering {
            out.push_str("\\centering\n");
        }
        out.push_str(&format!(
            "\\includegraphics[width={}\\textwidth]{{{}}}\n",
            self.width,
            self.image_path(graphics)?
        ));
        out.push_str(&format!("\\caption{{{}}}\n", normalize_line(&self.caption)));
        if let Some(label) = &self.label {
            out.push_str(&format!("\\label{{{}{label}}}\n", Self::LABEL_PREFIX));
        }
        out.push_str("\\end{figure}\n");
        Ok(out)
    }
}
