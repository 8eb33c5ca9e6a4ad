use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

use super::kinds::{Anchor, WikiLink};

fn wikilink_regex() -> &'static Regex {
    static WIKILINK_REGEX: OnceLock<Regex> = OnceLock::new();
    WIKILINK_REGEX.get_or_init(|| Regex::new(WikiLink::PATTERN).expect("Invalid wikilink regex"))
}

fn anchor_regex() -> &'static Regex {
    static ANCHOR_REGEX: OnceLock<Regex> = OnceLock::new();
    ANCHOR_REGEX.get_or_init(|| Regex::new(Anchor::PATTERN).expect("Invalid anchor regex"))
}

/// Rewrites the first `[URL|LABEL]` in `text` as an anchor.
///
/// Only the first match is converted; any later markup stays as typed.
pub fn linkify(text: &str) -> Cow<'_, str> {
    wikilink_regex().replace(text, |caps: &Captures| Anchor::render(&caps[1], &caps[2]))
}

/// Inverse of [`linkify`]: rewrites the first `<a href="URL">LABEL</a>` as
/// `[URL|LABEL]`. Everything else passes through unchanged.
pub fn unlinkify(html: &str) -> Cow<'_, str> {
    anchor_regex().replace(html, |caps: &Captures| WikiLink::render(&caps[1], &caps[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("hello", "hello")]
    #[case("see [http://x|here]", r#"see <a href="http://x">here</a>"#)]
    #[case("[http://x|a] and [http://y|b]", r#"<a href="http://x">a</a> and [http://y|b]"#)]
    #[case("[no separator]", "[no separator]")]
    #[case("[|empty url]", "[|empty url]")]
    #[case("[http://x|]", "[http://x|]")]
    #[case("unclosed [http://x|here", "unclosed [http://x|here")]
    fn linkify_converts_first_link_only(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(linkify(text), expected);
    }

    #[rstest]
    #[case("hello", "hello")]
    #[case(r#"see <a href="http://x">here</a>"#, "see [http://x|here]")]
    #[case(
        r#"<a href="http://x">a</a> and <a href="http://y">b</a>"#,
        r#"[http://x|a] and <a href="http://y">b</a>"#
    )]
    #[case(
        r#"<a class="ext" href="http://x">here</a>"#,
        r#"<a class="ext" href="http://x">here</a>"#
    )]
    #[case("<a href=\"http://x\">two\nlines</a>", "[http://x|two\nlines]")]
    fn unlinkify_converts_first_anchor_only(#[case] html: &str, #[case] expected: &str) {
        assert_eq!(unlinkify(html), expected);
    }

    #[test]
    fn untouched_text_is_borrowed() {
        assert!(matches!(linkify("plain"), Cow::Borrowed(_)));
        assert!(matches!(unlinkify("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn dollar_signs_in_labels_are_literal() {
        assert_eq!(
            linkify("[http://x|$1 off]"),
            r#"<a href="http://x">$1 off</a>"#
        );
    }
}
