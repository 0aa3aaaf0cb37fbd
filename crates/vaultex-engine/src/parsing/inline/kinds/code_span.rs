use regex::Regex;
use std::sync::OnceLock;

use crate::parsing::inline::escape::escape_reserved;

/// Code span inline type.
///
/// Code spans are raw zones while scanning, cross-references when they hold a
/// `fig:`/`eq:`/`alg:` label, and monospace text otherwise.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    pub fn pattern() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"`.*?`").expect("code span regex"))
    }

    /// `` `fig:x` `` / `` `eq:x` `` / `` `alg:x` `` become `\autoref{..}`.
    pub fn replace_references(line: &str) -> String {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"`((?:fig|eq|alg):\S*?)`").expect("cross-reference regex")
        });
        re.replace_all(line, r"\autoref{$1}").into_owned()
    }

    /// Remaining code spans become `\texttt{..}` with their content escaped.
    pub fn replace_monospace(line: &str) -> String {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"`(.*?)`").expect("monospace regex"));
        re.replace_all(line, |caps: &regex::Captures<'_>| {
            format!("\\texttt{{{}}}", escape_reserved(&caps[1]))
        })
        .into_owned()
    }
}
