use serde::Serialize;

use crate::preview::PreviewSegment;

/// Which form the editor presents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum EditorMode {
    /// Structured form: icon URL plus text with wiki links.
    #[default]
    Basic,
    /// Raw HTML, bypassing the codec.
    Advanced,
}

impl EditorMode {
    pub fn toggled(self) -> Self {
        match self {
            EditorMode::Basic => EditorMode::Advanced,
            EditorMode::Advanced => EditorMode::Basic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EditorMode::Basic => "Basic",
            EditorMode::Advanced => "Advanced",
        }
    }
}

/// Immutable view of the editor for one UI render.
///
/// UIs draw from snapshots and feed edits back as commands; they never touch
/// the snippet model directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorSnapshot {
    pub version: u64,
    pub mode: EditorMode,
    /// Icon URL input as typed.
    pub icon_url: String,
    /// Text input as typed, in wiki markup.
    pub text: String,
    /// Fragment destined for the hidden form field.
    pub code: String,
    pub preview: Vec<PreviewSegment>,
    /// URL of an icon fetch still in flight.
    pub pending_icon: Option<String>,
    /// Message for the user, e.g. a failed icon fetch.
    pub notification: Option<String>,
    pub modified: bool,
}
