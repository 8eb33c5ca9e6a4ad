use crate::editing::EditorMode;

/// Every edit the UI can make to a [`SnippetEditor`](crate::editing::SnippetEditor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// New contents of the text input, in wiki markup.
    SetText(String),
    /// New contents of the icon URL input.
    SetIconUrl(String),
    /// New contents of the raw HTML input (advanced mode only).
    SetRaw(String),
    SwitchMode(EditorMode),
}
