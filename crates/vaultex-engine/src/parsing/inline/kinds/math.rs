use regex::Regex;
use std::sync::OnceLock;

/// Inline math: `$...$`. Passed through to LaTeX untouched.
pub struct Math;

impl Math {
    pub fn pattern() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"\$.*?\$").expect("inline math regex"))
    }
}
