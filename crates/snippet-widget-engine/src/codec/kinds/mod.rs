//! # Codec Kinds
//!
//! Each construct the codec reads or writes owns its own delimiters and
//! patterns. The codec functions call these; they never hardcode `[`, `<a`
//! or the marker comment themselves.
//!
//! - **`WikiLink`**: `[URL|LABEL]`, the author-facing form
//! - **`Anchor`**: `<a href="URL">LABEL</a>`, the stored form
//! - **`BasicMarkup`**: marker comment, wrapper `div`, icon `img`, body `p`

pub mod anchor;
pub mod markup;
pub mod wikilink;

pub use anchor::Anchor;
pub use markup::BasicMarkup;
pub use wikilink::WikiLink;
