use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Citation tags: `[[@key]]`.
pub struct Citation;

impl Citation {
    pub const MARK: u8 = b'@';
    pub const COMMAND: &'static str = "citep";

    fn key_pattern() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"\[\[@([^\]]+?)\]\]").expect("citation regex"))
    }

    /// Runs of citations separated only by commas and whitespace.
    fn group_pattern() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r"(?:\[\[@[^\]]+?\]\][\s,]*)*\[\[@[^\]]+?\]\]")
                .expect("citation group regex")
        })
    }

    /// All citation keys in `text`, deduplicated.
    pub fn find_all(text: &str) -> BTreeSet<String> {
        Self::key_pattern()
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    }

    /// Merges adjacent citations into one `\citep{a,b}` in source order.
    pub fn group_adjacent(line: &str) -> String {
        Self::group_pattern()
            .replace_all(line, |caps: &regex::Captures<'_>| {
                let keys = Self::key_pattern()
                    .captures_iter(&caps[0])
                    .map(|k| k[1].to_string())
                    .collect::<Vec<_>>();
                format!("\\{}{{{}}}", Self::COMMAND, keys.join(","))
            })
            .into_owned()
    }
}
