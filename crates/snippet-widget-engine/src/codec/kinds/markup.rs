/// Fixed pieces of the basic snippet wire format.
///
/// These strings are load-bearing: previously stored fragments are matched
/// against them byte for byte.
pub struct BasicMarkup;

impl BasicMarkup {
    /// Leading comment that marks a fragment as editable by the basic form.
    pub const MARKER: &'static str = "<!--basic-->";
    pub const OPEN: &'static str = r#"<div class="snippet">"#;
    pub const CLOSE: &'static str = "</div>";
    pub const BODY_OPEN: &'static str = "<p>";
    pub const BODY_CLOSE: &'static str = "</p>";

    pub const ICON_PATTERN: &'static str = r#"<img class="icon" src="([^"]*)"\s*/?>"#;
    pub const BODY_PATTERN: &'static str = r"(?s)<p>(.*?)</p>";

    pub fn icon(data_uri: &str) -> String {
        format!(r#"<img class="icon" src="{data_uri}" />"#)
    }
}
