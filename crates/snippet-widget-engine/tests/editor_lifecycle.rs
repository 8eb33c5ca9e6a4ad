//! End-to-end editing sessions with icon fetches running on worker threads,
//! the way a host event loop drives the editor.

use pretty_assertions::assert_eq;
use snippet_widget_engine::{
    Cmd, EditorMode, IconError, IconFetcher, IconResponse, SnippetCodec, SnippetEditor,
    read_fragment, write_fragment,
};
use snippet_widget_engine::preview::preview_text;
use std::sync::mpsc;
use std::sync::{Arc, Barrier};
use std::thread;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";

struct MapFetcher;

impl IconFetcher for MapFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, IconError> {
        match url {
            "good.png" => Ok(PNG.to_vec()),
            "anim.gif" => Ok(b"GIF89a".to_vec()),
            other => Err(IconError::NotFound(other.to_string())),
        }
    }
}

#[test]
fn fresh_snippet_saved_and_reopened() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snippet.html");

    let mut editor = SnippetEditor::open(&read_fragment(&path).unwrap(), SnippetCodec::default());
    editor.apply(Cmd::SetText("Get [https://addons.mozilla.org/|add-ons]".to_string()));

    let request = editor
        .apply(Cmd::SetIconUrl("good.png".to_string()))
        .icon_request
        .unwrap();
    let response = thread::spawn(move || request.fetch_with(&MapFetcher))
        .join()
        .unwrap();
    editor.complete_icon(response);

    write_fragment(&path, &editor.output()).unwrap();
    editor.mark_saved();

    let reopened = SnippetEditor::open(&read_fragment(&path).unwrap(), SnippetCodec::default());
    assert_eq!(reopened.mode(), EditorMode::Basic);
    assert_eq!(reopened.snippet(), editor.snippet());
    assert_eq!(reopened.output(), editor.output());
    assert_eq!(reopened.icon_url(), "data:image/png;base64,iVBORw0KGgo=");
}

#[test]
fn out_of_order_responses_keep_latest_input() {
    let mut editor = SnippetEditor::open("", SnippetCodec::default());
    let (tx, rx) = mpsc::channel::<IconResponse>();
    let gate = Arc::new(Barrier::new(2));

    let slow = editor
        .apply(Cmd::SetIconUrl("anim.gif".to_string()))
        .icon_request
        .unwrap();
    let fast = editor
        .apply(Cmd::SetIconUrl("good.png".to_string()))
        .icon_request
        .unwrap();

    let slow_tx = tx.clone();
    let slow_gate = Arc::clone(&gate);
    let slow_worker = thread::spawn(move || {
        slow_gate.wait();
        slow_tx.send(slow.fetch_with(&MapFetcher)).unwrap();
    });
    thread::spawn(move || {
        tx.send(fast.fetch_with(&MapFetcher)).unwrap();
    })
    .join()
    .unwrap();

    editor.complete_icon(rx.recv().unwrap());
    gate.wait();
    slow_worker.join().unwrap();
    let patch = editor.complete_icon(rx.recv().unwrap());

    assert!(!patch.output_changed);
    let icon = editor.snippet().icon.clone().unwrap();
    assert_eq!(icon.source_url, "good.png");
    assert!(icon.data_uri.starts_with("data:image/png;base64,"));
}

#[test]
fn failed_icon_leaves_fragment_identical() {
    let mut editor = SnippetEditor::open("", SnippetCodec::default());
    editor.apply(Cmd::SetText("hello".to_string()));
    let before = editor.output();

    let request = editor
        .apply(Cmd::SetIconUrl("missing.png".to_string()))
        .icon_request
        .unwrap();
    editor.complete_icon(request.fetch_with(&MapFetcher));

    assert_eq!(editor.output(), before);
    assert_eq!(editor.snippet().icon, None);
    assert_eq!(
        editor.snapshot().notification.as_deref(),
        Some("Could not load icon: Icon not found: missing.png")
    );
}

#[test]
fn advanced_content_survives_a_session_untouched() {
    let custom = "<div class=\"snippet\"><marquee>custom</marquee></div>";
    let mut editor = SnippetEditor::open(custom, SnippetCodec::default());

    assert_eq!(editor.mode(), EditorMode::Advanced);
    editor.apply(Cmd::SwitchMode(EditorMode::Basic));
    assert_eq!(editor.mode(), EditorMode::Advanced);
    assert_eq!(editor.output(), custom);
    assert!(!editor.is_modified());
}

#[test]
fn snapshot_tracks_every_edit() {
    let mut editor = SnippetEditor::open("", SnippetCodec::default());
    editor.apply(Cmd::SetText("see [http://x|here]".to_string()));
    editor.apply(Cmd::SetIconUrl("data:image/png;base64,AA".to_string()));

    let snapshot = editor.snapshot();
    assert_eq!(snapshot.version, 2);
    assert_eq!(snapshot.mode, EditorMode::Basic);
    assert_eq!(snapshot.icon_url, "data:image/png;base64,AA");
    assert_eq!(snapshot.text, "see [http://x|here]");
    assert_eq!(
        snapshot.code,
        r#"<!--basic--><div class="snippet"><img class="icon" src="data:image/png;base64,AA" /><p>see <a href="http://x">here</a></p></div>"#
    );
    assert_eq!(
        preview_text(&snapshot.preview),
        "[icon] see here <http://x>"
    );
    assert_eq!(snapshot.pending_icon, None);
    assert_eq!(snapshot.notification, None);
    assert!(snapshot.modified);
}

#[test]
fn retyped_icon_url_waits_for_its_own_fetch() {
    let mut editor = SnippetEditor::open("", SnippetCodec::default());

    let first = editor
        .apply(Cmd::SetIconUrl("good.png".to_string()))
        .icon_request
        .unwrap();
    editor.apply(Cmd::SetIconUrl("good.pngx".to_string()));
    let latest = editor
        .apply(Cmd::SetIconUrl("good.png".to_string()))
        .icon_request
        .unwrap();

    let early = first.respond(Err(IconError::NotFound("good.png".to_string())));
    assert!(!editor.complete_icon(early).output_changed);
    assert_eq!(editor.snapshot().pending_icon.as_deref(), Some("good.png"));
    assert_eq!(editor.notification(), None);

    let patch = editor.complete_icon(latest.fetch_with(&MapFetcher));
    assert!(patch.output_changed);
    assert_eq!(editor.snippet().icon.as_ref().unwrap().source_url, "good.png");
}
