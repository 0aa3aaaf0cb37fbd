use regex::Regex;
use std::sync::OnceLock;

use super::kinds::{CodeSpan, Math, WikiLink};

/// The span classes shielded from escaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanClass {
    Math,
    Link,
    Code,
}

impl SpanClass {
    /// Sentinels use private-use code points so no note text can collide with
    /// them and no escaping step touches them.
    pub fn sentinel(self) -> &'static str {
        match self {
            SpanClass::Math => "\u{E000}MATH\u{E001}",
            SpanClass::Link => "\u{E000}LINK\u{E001}",
            SpanClass::Code => "\u{E000}CODE\u{E001}",
        }
    }
}

/// A line with its math, link and code spans swapped for sentinels.
#[derive(Debug, Default)]
pub struct Protected {
    pub text: String,
    math: Vec<String>,
    links: Vec<String>,
    code: Vec<String>,
}

fn protect_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alternatives = format!(
            "({})|({})|({})",
            Math::pattern().as_str(),
            WikiLink::pattern().as_str(),
            CodeSpan::pattern().as_str()
        );
        Regex::new(&alternatives).expect("protected span regex")
    })
}

/// Swaps protected spans for sentinels in one left-to-right pass.
///
/// The leftmost span wins; on a tie math beats links beats code.
pub fn protect(line: &str) -> Protected {
    let mut protected = Protected::default();
    let mut last = 0;

    for caps in protect_pattern().captures_iter(line) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let class = if caps.get(1).is_some() {
            SpanClass::Math
        } else if caps.get(2).is_some() {
            SpanClass::Link
        } else {
            SpanClass::Code
        };

        protected.text.push_str(&line[last..whole.start()]);
        protected.text.push_str(class.sentinel());
        protected.stash(class).push(whole.as_str().to_string());
        last = whole.end();
    }
    protected.text.push_str(&line[last..]);
    protected
}

impl Protected {
    fn stash(&mut self, class: SpanClass) -> &mut Vec<String> {
        match class {
            SpanClass::Math => &mut self.math,
            SpanClass::Link => &mut self.links,
            SpanClass::Code => &mut self.code,
        }
    }

    /// Puts the originals back into `text`: links, then math, then code, each
    /// in arrival order with one substitution per sentinel.
    pub fn restore(mut self, mut text: String) -> String {
        for class in [SpanClass::Link, SpanClass::Math, SpanClass::Code] {
            for original in std::mem::take(self.stash(class)) {
                text = text.replacen(class.sentinel(), &original, 1);
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protects_each_class() {
        let p = protect("x $a_b$ [[@k]] `c_d` y");
        assert_eq!(
            p.text,
            format!(
                "x {} {} {} y",
                SpanClass::Math.sentinel(),
                SpanClass::Link.sentinel(),
                SpanClass::Code.sentinel()
            )
        );
        let text = p.text.clone();
        assert_eq!(p.restore(text), "x $a_b$ [[@k]] `c_d` y");
    }

    #[test]
    fn code_containing_link_is_one_span() {
        let p = protect("`[[x]]` then [[y]]");
        assert_eq!(p.code, vec!["`[[x]]`"]);
        assert_eq!(p.links, vec!["[[y]]"]);
    }

    #[test]
    fn restores_in_arrival_order() {
        let p = protect("$1$ and $2$ and $3$");
        let text = p.text.replace(' ', "_");
        assert_eq!(p.restore(text), "$1$_and_$2$_and_$3$");
    }
}
