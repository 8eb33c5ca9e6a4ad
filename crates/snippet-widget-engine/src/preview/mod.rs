//! # Preview
//!
//! Flattens a stored fragment into display segments for hosts that cannot
//! render HTML themselves (a terminal, a log line). Only what a snippet can
//! contain survives: icon images, anchors, text and line breaks. Other tags
//! are dropped and entities are decoded for display.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PreviewSegment {
    Icon { src: String },
    Text(String),
    Link { href: String, label: String },
    Break,
}

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("Invalid tag regex"))
}

fn attribute_regex() -> &'static Regex {
    static ATTRIBUTE_REGEX: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE_REGEX.get_or_init(|| {
        Regex::new(r#"([a-zA-Z-]+)\s*=\s*"([^"]*)""#).expect("Invalid attribute regex")
    })
}

fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    attribute_regex()
        .captures_iter(tag)
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .and_then(|caps| caps.get(2))
        .map(|value| value.as_str())
}

/// Lowercased element name of a tag, with a leading `/` for closing tags.
fn tag_name(tag: &str) -> String {
    let inner = tag.trim_start_matches('<');
    let (closing, rest) = match inner.strip_prefix('/') {
        Some(rest) => ("/", rest),
        None => ("", inner),
    };
    let name: String = rest.chars().take_while(char::is_ascii_alphanumeric).collect();
    format!("{closing}{}", name.to_ascii_lowercase())
}

/// Segments an HTML fragment for display.
pub fn render_preview(html: &str) -> Vec<PreviewSegment> {
    let mut segments = Vec::new();
    let mut open_link: Option<(String, String)> = None;
    let mut last = 0;

    for tag in tag_regex().find_iter(html) {
        push_text(&mut segments, &mut open_link, &html[last..tag.start()]);
        last = tag.end();

        let raw = tag.as_str();
        if raw.starts_with("<!--") {
            continue;
        }

        match tag_name(raw).as_str() {
            "img" => {
                let is_icon = attribute(raw, "class")
                    .is_some_and(|class| class.split_whitespace().any(|c| c == "icon"));
                if let (true, Some(src)) = (is_icon, attribute(raw, "src")) {
                    segments.push(PreviewSegment::Icon {
                        src: src.to_string(),
                    });
                }
            }
            "a" => {
                close_link(&mut segments, &mut open_link);
                if let Some(href) = attribute(raw, "href") {
                    open_link = Some((decode_entities(href), String::new()));
                }
            }
            "/a" => close_link(&mut segments, &mut open_link),
            "br" | "/p" | "/div" | "/li" => push_break(&mut segments),
            _ => {}
        }
    }
    push_text(&mut segments, &mut open_link, &html[last..]);
    close_link(&mut segments, &mut open_link);

    while segments.last() == Some(&PreviewSegment::Break) {
        segments.pop();
    }
    segments
}

/// Plain-text rendering of the preview, links shown as `label <href>`.
pub fn preview_text(segments: &[PreviewSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            PreviewSegment::Icon { .. } => out.push_str("[icon] "),
            PreviewSegment::Text(text) => out.push_str(text),
            PreviewSegment::Link { href, label } => {
                out.push_str(&format!("{label} <{href}>"));
            }
            PreviewSegment::Break => out.push('\n'),
        }
    }
    out
}

fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

fn push_text(
    segments: &mut Vec<PreviewSegment>,
    open_link: &mut Option<(String, String)>,
    raw: &str,
) {
    if raw.is_empty() {
        return;
    }
    let text = decode_entities(raw);
    if let Some((_, label)) = open_link {
        label.push_str(&text);
    } else if let Some(PreviewSegment::Text(previous)) = segments.last_mut() {
        previous.push_str(&text);
    } else {
        segments.push(PreviewSegment::Text(text));
    }
}

fn close_link(segments: &mut Vec<PreviewSegment>, open_link: &mut Option<(String, String)>) {
    if let Some((href, label)) = open_link.take() {
        segments.push(PreviewSegment::Link { href, label });
    }
}

fn push_break(segments: &mut Vec<PreviewSegment>) {
    if !segments.is_empty() && segments.last() != Some(&PreviewSegment::Break) {
        segments.push(PreviewSegment::Break);
    }
}
