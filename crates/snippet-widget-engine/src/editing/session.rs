use crate::codec::SnippetCodec;
use crate::editing::{Cmd, EditorMode, EditorSnapshot, Patch};
use crate::icon::{IconRequest, IconResolver, IconResponse, Resolution, Submission};
use crate::models::Snippet;
use crate::preview::render_preview;

/// Editing session for one stored snippet fragment.
///
/// Owns the single [`Snippet`] model, the raw form inputs and the icon
/// request bookkeeping. Every command re-encodes the model so the stored
/// fragment and the preview never drift from the form.
///
/// ## Usage Pattern
///
/// ```rust
/// # use snippet_widget_engine::codec::SnippetCodec;
/// # use snippet_widget_engine::editing::{Cmd, EditorMode, SnippetEditor};
/// let mut editor = SnippetEditor::open("", SnippetCodec::default());
/// assert_eq!(editor.mode(), EditorMode::Basic);
///
/// editor.apply(Cmd::SetText("see [http://x|here]".to_string()));
/// assert_eq!(
///     editor.output(),
///     r#"<!--basic--><div class="snippet"><p>see <a href="http://x">here</a></p></div>"#
/// );
/// ```
#[derive(Debug)]
pub struct SnippetEditor {
    codec: SnippetCodec,
    mode: EditorMode,
    snippet: Snippet,
    icon_url: String,
    raw: String,
    resolver: IconResolver,
    notification: Option<String>,
    version: u64,
    saved_output: String,
}

impl SnippetEditor {
    /// Starts a session from previously stored HTML.
    ///
    /// Fragments the codec can decode open in basic mode with the form
    /// populated. Anything else, hand-written HTML included, opens in
    /// advanced mode untouched. An empty fragment is a fresh basic snippet.
    pub fn open(stored: &str, codec: SnippetCodec) -> Self {
        let mut editor = Self {
            codec,
            mode: EditorMode::Basic,
            snippet: Snippet::default(),
            icon_url: String::new(),
            raw: String::new(),
            resolver: IconResolver::new(),
            notification: None,
            version: 0,
            saved_output: stored.to_string(),
        };

        if stored.trim().is_empty() {
            editor.saved_output = editor.output();
            return editor;
        }

        match codec.decode(stored) {
            Some(snippet) => editor.load_snippet(snippet),
            None => {
                log::info!("stored fragment is not a basic snippet, opening in advanced mode");
                editor.mode = EditorMode::Advanced;
                editor.raw = stored.to_string();
            }
        }
        editor
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn snippet(&self) -> &Snippet {
        &self.snippet
    }

    pub fn icon_url(&self) -> &str {
        &self.icon_url
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    /// Fragment for the hidden form field.
    pub fn output(&self) -> String {
        match self.mode {
            EditorMode::Basic => self.codec.encode(&self.snippet),
            EditorMode::Advanced => self.raw.clone(),
        }
    }

    /// Whether the output differs from what was opened or last saved.
    pub fn is_modified(&self) -> bool {
        self.output() != self.saved_output
    }

    pub fn mark_saved(&mut self) {
        self.saved_output = self.output();
    }

    /// Applies one UI edit.
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let before = self.output();
        self.notification = None;
        let mut icon_request = None;

        match cmd {
            Cmd::SetText(text) => {
                self.snippet.text = text;
            }
            Cmd::SetIconUrl(url) => {
                icon_request = self.submit_icon_url(url);
            }
            Cmd::SetRaw(raw) => {
                if self.mode == EditorMode::Advanced {
                    self.raw = raw;
                } else {
                    log::warn!("ignoring raw HTML edit in basic mode");
                }
            }
            Cmd::SwitchMode(mode) => self.switch_mode(mode),
        }

        self.finish(&before, icon_request)
    }

    /// Applies a finished icon fetch.
    ///
    /// Responses for a URL the user has since moved away from are dropped.
    /// A failure leaves the model and output exactly as they were and only
    /// raises a notification.
    pub fn complete_icon(&mut self, response: IconResponse) -> Patch {
        let before = self.output();

        match self.resolver.complete(response) {
            Resolution::Resolved(icon) => {
                self.snippet.icon = Some(icon);
            }
            Resolution::Failed(err) => {
                log::warn!("icon could not be resolved: {err}");
                self.notification = Some(format!("Could not load icon: {err}"));
            }
            Resolution::Stale => {}
        }

        self.finish(&before, None)
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        let code = self.output();
        EditorSnapshot {
            version: self.version,
            mode: self.mode,
            icon_url: self.icon_url.clone(),
            text: self.snippet.text.clone(),
            preview: render_preview(&code),
            modified: code != self.saved_output,
            code,
            pending_icon: self.resolver.pending().map(|request| request.url.clone()),
            notification: self.notification.clone(),
        }
    }

    fn submit_icon_url(&mut self, url: String) -> Option<IconRequest> {
        let submission = self.resolver.submit(&url);
        self.icon_url = url;
        match submission {
            Submission::Unchanged => None,
            Submission::Cleared => {
                self.snippet.icon = None;
                None
            }
            Submission::Immediate(icon) => {
                self.snippet.icon = Some(icon);
                None
            }
            Submission::Fetch(request) => Some(request),
        }
    }

    fn switch_mode(&mut self, mode: EditorMode) {
        if mode == self.mode {
            return;
        }

        match mode {
            EditorMode::Advanced => {
                self.raw = self.codec.encode(&self.snippet);
                // Fetches still in flight belong to the form being left.
                self.resolver = resolver_for(&self.snippet);
                self.mode = EditorMode::Advanced;
                log::info!("switched to advanced mode");
            }
            EditorMode::Basic => match self.codec.decode(&self.raw) {
                Some(snippet) => {
                    self.load_snippet(snippet);
                    self.mode = EditorMode::Basic;
                    log::info!("switched to basic mode");
                }
                None => {
                    self.notification = Some(
                        "This HTML is not a basic snippet; keep editing it as raw HTML."
                            .to_string(),
                    );
                }
            },
        }
    }

    fn load_snippet(&mut self, snippet: Snippet) {
        self.icon_url = snippet
            .icon
            .as_ref()
            .map(|icon| icon.source_url.clone())
            .unwrap_or_default();
        self.resolver = resolver_for(&snippet);
        self.snippet = snippet;
    }

    fn finish(&mut self, before: &str, icon_request: Option<IconRequest>) -> Patch {
        let output_changed = self.output() != before;
        if output_changed {
            self.version += 1;
        }
        Patch {
            version: self.version,
            output_changed,
            icon_request,
        }
    }
}

fn resolver_for(snippet: &Snippet) -> IconResolver {
    match &snippet.icon {
        Some(icon) => IconResolver::with_resolved(icon.source_url.clone()),
        None => IconResolver::new(),
    }
}
