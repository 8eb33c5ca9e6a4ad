pub mod codec;
pub mod editing;
pub mod icon;
pub mod io;
pub mod models;
pub mod preview;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use codec::{SnippetCodec, decode, encode};
pub use editing::{Cmd, EditorMode, EditorSnapshot, Patch, SnippetEditor};
pub use icon::{IconError, IconFetcher, IconRequest, IconResponse};
pub use io::*;
pub use models::{Icon, Snippet};
pub use preview::{PreviewSegment, render_preview};
