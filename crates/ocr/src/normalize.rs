/// OCR line output cleaned up for parsing.
///
/// Lines are trimmed, internal whitespace runs collapse to single
/// spaces, and blank lines are dropped. The joined full text and a
/// lowercase view are precomputed since every extractor needs them.
#[derive(Debug, Clone)]
pub struct NormalizedText {
    lines: Vec<String>,
    text: String,
    lower: String,
}

impl NormalizedText {
    pub fn new(raw_lines: &[String]) -> Self {
        let lines: Vec<String> = raw_lines
            .iter()
            .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|l| !l.is_empty())
            .collect();
        let text = lines.join(" ");
        let lower = text.to_lowercase();
        Self { lines, text, lower }
    }

    /// Convenience for transcript files and tests: splits on newlines.
    pub fn from_text(raw: &str) -> Self {
        let lines: Vec<String> = raw.lines().map(str::to_string).collect();
        Self::new(&lines)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined with single spaces, original case.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lowercase view of the full text, for substring matching.
    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
