/// Author-facing link markup: `[URL|LABEL]`.
pub struct WikiLink;

impl WikiLink {
    pub const OPEN: char = '[';
    pub const CLOSE: char = ']';
    pub const SEPARATOR: char = '|';

    /// URL runs up to the separator, label up to the closing bracket.
    pub const PATTERN: &'static str = r"\[([^|\]]+)\|([^\]]+)\]";

    pub fn render(url: &str, label: &str) -> String {
        format!(
            "{}{url}{}{label}{}",
            Self::OPEN,
            Self::SEPARATOR,
            Self::CLOSE
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_uses_delimiters() {
        assert_eq!(WikiLink::render("http://x", "here"), "[http://x|here]");
    }
}
