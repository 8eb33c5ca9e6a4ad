//! # Icon Resolution
//!
//! An icon reaches the snippet model only once its image has been fetched
//! and inlined as a `data:` URI. Fetching belongs to the host (it may need a
//! network client, a filesystem root, a worker thread); this module owns the
//! contract ([`IconFetcher`]), the encoding ([`data_uri`]) and the request
//! bookkeeping that decides which completion wins ([`IconResolver`]).

pub mod resolver;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

pub use resolver::{IconRequest, IconResolver, IconResponse, RequestId, Resolution, Submission};

/// Prefix shared by every inline image URI.
pub const DATA_URI_PREFIX: &str = "data:";

/// Used when the bytes match no known signature.
pub const DEFAULT_MIME: &str = "image/png";

#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("Icon not found: {0}")]
    NotFound(String),
    #[error("Fetching {url} failed with HTTP status {status}")]
    Status { url: String, status: u16 },
    #[error("Fetching {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("Icon at {0} is empty")]
    Empty(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns an icon URL into raw image bytes.
///
/// Implementations run off the event loop, so they must be shareable across
/// threads. Exactly one result per call.
pub trait IconFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, IconError>;
}

impl<F> IconFetcher for F
where
    F: Fn(&str) -> Result<Vec<u8>, IconError> + Send + Sync,
{
    fn fetch(&self, url: &str) -> Result<Vec<u8>, IconError> {
        self(url)
    }
}

/// Inlines image bytes as a base64 `data:` URI.
pub fn data_uri(bytes: &[u8]) -> String {
    format!(
        "{DATA_URI_PREFIX}{};base64,{}",
        sniff_mime(bytes),
        STANDARD.encode(bytes)
    )
}

pub fn is_data_uri(url: &str) -> bool {
    url.starts_with(DATA_URI_PREFIX)
}

/// Guesses an image MIME type from its leading bytes.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";
    const JPEG: &[u8] = b"\xff\xd8\xff";
    const ICO: &[u8] = b"\x00\x00\x01\x00";

    if bytes.starts_with(PNG) {
        "image/png"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.starts_with(JPEG) {
        "image/jpeg"
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else if bytes.starts_with(ICO) {
        "image/x-icon"
    } else if looks_like_svg(bytes) {
        "image/svg+xml"
    } else {
        DEFAULT_MIME
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"\x89PNG\r\n\x1a\n\x00\x00", "image/png")]
    #[case(b"GIF89a\x01\x00", "image/gif")]
    #[case(b"\xff\xd8\xff\xe0", "image/jpeg")]
    #[case(b"RIFF\x00\x00\x00\x00WEBPVP8 ", "image/webp")]
    #[case(b"\x00\x00\x01\x00\x01\x00", "image/x-icon")]
    #[case(b"  <svg xmlns=\"http://www.w3.org/2000/svg\"/>", "image/svg+xml")]
    #[case(b"<?xml version=\"1.0\"?><svg/>", "image/svg+xml")]
    #[case(b"unknown", "image/png")]
    #[case(b"", "image/png")]
    fn sniffs_common_formats(#[case] bytes: &[u8], #[case] expected: &str) {
        assert_eq!(sniff_mime(bytes), expected);
    }

    #[test]
    fn data_uri_is_base64_with_mime() {
        assert_eq!(data_uri(b"GIF89a"), "data:image/gif;base64,R0lGODlh");
    }

    #[test]
    fn closures_are_fetchers() {
        let fetcher = |url: &str| -> Result<Vec<u8>, IconError> { Ok(url.as_bytes().to_vec()) };
        assert_eq!(fetcher.fetch("abc").unwrap(), b"abc");
    }

    #[test]
    fn error_messages_name_the_url() {
        let err = IconError::Status {
            url: "http://x/a.png".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "Fetching http://x/a.png failed with HTTP status 404"
        );
    }
}
