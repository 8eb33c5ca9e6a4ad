//! # Snippet Codec
//!
//! Converts a [`Snippet`] to its stored HTML fragment and back.
//!
//! ## Wire format
//!
//! ```text
//! <!--basic--><div class="snippet">[<img class="icon" src="DATA_URI" />]<p>TEXT</p></div>
//! ```
//!
//! The `<img>` is present only when the snippet has an icon, and always
//! carries the encoded data URI rather than the source URL. `TEXT` is the
//! snippet text with its first `[URL|LABEL]` rewritten as an anchor.
//!
//! ## Decoding is deliberately narrow
//!
//! [`SnippetCodec::decode`] is a pattern match over the exact shapes
//! [`SnippetCodec::encode`] writes, not an HTML parser. Fragments without the
//! `<!--basic-->` marker are advanced content and decode to `None`. A
//! marker with no `<p>` body also decodes to `None`, sending the editor to
//! advanced mode rather than silently dropping whatever the fragment holds.
//! Hand-edited basic fragments that drift from the emitted shape are not
//! guaranteed to survive a round trip.
//!
//! ## Ampersands
//!
//! Text is inserted as raw HTML. The default codec leaves `&` alone so that
//! fragments written before escaping existed still decode byte for byte.
//! [`SnippetCodec::escaping_ampersands`] opts into writing `&amp;` and
//! reading it back; fragments written that way differ from legacy ones.

pub mod kinds;
pub mod linkify;

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{Icon, Snippet};
use kinds::BasicMarkup;
pub use linkify::{linkify, unlinkify};

const AMPERSAND: &str = "&";
const ESCAPED_AMPERSAND: &str = "&amp;";

/// Encoder/decoder for basic snippets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnippetCodec {
    escape_ampersands: bool,
}

impl SnippetCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn escaping_ampersands(mut self, escape: bool) -> Self {
        self.escape_ampersands = escape;
        self
    }

    pub fn escapes_ampersands(&self) -> bool {
        self.escape_ampersands
    }

    /// Serializes `snippet` to its canonical fragment.
    pub fn encode(&self, snippet: &Snippet) -> String {
        let text = if self.escape_ampersands {
            snippet.text.replace(AMPERSAND, ESCAPED_AMPERSAND)
        } else {
            snippet.text.clone()
        };

        let mut html = String::with_capacity(text.len() + 64);
        html.push_str(BasicMarkup::MARKER);
        html.push_str(BasicMarkup::OPEN);
        if let Some(icon) = &snippet.icon {
            html.push_str(&BasicMarkup::icon(&icon.data_uri));
        }
        html.push_str(BasicMarkup::BODY_OPEN);
        html.push_str(&linkify(&text));
        html.push_str(BasicMarkup::BODY_CLOSE);
        html.push_str(BasicMarkup::CLOSE);
        html
    }

    /// Recovers a snippet from a stored fragment.
    ///
    /// Returns `None` when the fragment is not a basic snippet; callers treat
    /// that as "edit as raw HTML", not as a failure.
    pub fn decode(&self, html: &str) -> Option<Snippet> {
        if !html.contains(BasicMarkup::MARKER) {
            log::debug!("fragment has no basic marker, treating as advanced content");
            return None;
        }

        let Some(body) = body_regex().captures(html).and_then(|caps| caps.get(1)) else {
            log::debug!("basic fragment has no <p> body, treating as advanced content");
            return None;
        };

        let icon = icon_regex()
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|src| Icon::from_data_uri(src.as_str()));

        let text = unlinkify(body.as_str());
        let text = if self.escape_ampersands {
            text.replace(ESCAPED_AMPERSAND, AMPERSAND)
        } else {
            text.into_owned()
        };

        Some(Snippet { text, icon })
    }

    /// Whether `html` carries the basic marker at all.
    pub fn is_basic(html: &str) -> bool {
        html.contains(BasicMarkup::MARKER)
    }
}

/// Encodes with the default (non-escaping) codec.
pub fn encode(snippet: &Snippet) -> String {
    SnippetCodec::default().encode(snippet)
}

/// Decodes with the default (non-escaping) codec.
pub fn decode(html: &str) -> Option<Snippet> {
    SnippetCodec::default().decode(html)
}

fn icon_regex() -> &'static Regex {
    static ICON_REGEX: OnceLock<Regex> = OnceLock::new();
    ICON_REGEX.get_or_init(|| Regex::new(BasicMarkup::ICON_PATTERN).expect("Invalid icon regex"))
}

fn body_regex() -> &'static Regex {
    static BODY_REGEX: OnceLock<Regex> = OnceLock::new();
    BODY_REGEX.get_or_init(|| Regex::new(BasicMarkup::BODY_PATTERN).expect("Invalid body regex"))
}
