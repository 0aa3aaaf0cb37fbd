/// Markup injected by the assembler at flow boundaries (appendix,
/// bibliography). Never produced by detection and never normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub markup: String,
}

impl Marker {
    pub const DEFAULT_APPENDIX: &'static str = "\n\\appendix\n";
    pub const DEFAULT_BIBLIOGRAPHY: &'static str = "\n\\bibliography{references}\n";

    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    /// The bibliography marker pointing at a specific `.bib` stem.
    pub fn bibliography_for(stem: &str) -> String {
        format!("\n\\bibliography{{{stem}}}\n")
    }

    pub fn render(&self) -> String {
        self.markup.clone()
    }
}
