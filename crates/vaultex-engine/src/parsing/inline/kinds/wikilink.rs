use regex::Regex;
use std::sync::OnceLock;

use crate::parsing::inline::escape::escape_reserved;

pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
    pub const ALIAS: u8 = b'|';
    pub const EMBED: u8 = b'!';
    pub const PATH_SEPARATOR: char = '/';

    pub fn pattern() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"\[\[.*?\]\]").expect("wikilink regex"))
    }

    /// The name a link resolves to: the alias if present, else the last path segment.
    pub fn display_name<'a>(target: &'a str, alias: Option<&'a str>) -> &'a str {
        match alias {
            Some(alias) => alias,
            None => target
                .rsplit(Self::PATH_SEPARATOR)
                .next()
                .unwrap_or(target),
        }
    }

    /// Replaces links (and embeds) still left in body text by their escaped display name.
    ///
    /// Runs after citation grouping, so `[[@key]]` never reaches here.
    pub fn replace_remaining(line: &str) -> String {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"!?\[\[([^\]|]*)(?:\|([^\]|]*))?(?:\|[^\]]*)?\]\]").expect("leftover link regex")
        });
        re.replace_all(line, |caps: &regex::Captures<'_>| {
            let alias = caps.get(2).map(|m| m.as_str());
            escape_reserved(Self::display_name(&caps[1], alias))
        })
        .into_owned()
    }
}
