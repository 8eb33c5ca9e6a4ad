/// HTML anchor as emitted by the codec: `<a href="URL">LABEL</a>`.
///
/// Only this exact shape is recognized on the way back. Extra attributes,
/// single quotes or whitespace inside the tag are left as raw HTML.
/// The label may span lines, matching what [`super::WikiLink`] accepts.
pub struct Anchor;

impl Anchor {
    pub const PATTERN: &'static str = r#"(?s)<a href="([^"]*)">(.*?)</a>"#;

    pub fn render(href: &str, label: &str) -> String {
        format!(r#"<a href="{href}">{label}</a>"#)
    }
}
