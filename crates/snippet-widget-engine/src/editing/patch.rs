use crate::icon::IconRequest;

/// Result of applying a command or an icon response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Editor version after the change.
    pub version: u64,
    /// Whether the stored fragment (and so the preview) changed.
    pub output_changed: bool,
    /// A fetch the host must dispatch, then hand back via `complete_icon`.
    pub icon_request: Option<IconRequest>,
}
