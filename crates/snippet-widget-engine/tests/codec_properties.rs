use pretty_assertions::assert_eq;
use rstest::rstest;
use snippet_widget_engine::{Icon, Snippet, SnippetCodec, decode, encode};

#[test]
fn text_only_snippet_encodes_to_bare_paragraph() {
    assert_eq!(
        encode(&Snippet::new("hello")),
        r#"<!--basic--><div class="snippet"><p>hello</p></div>"#
    );
}

#[test]
fn icon_and_link_encode_to_canonical_fragment() {
    let snippet = Snippet::new("see [http://x|here]")
        .with_icon(Icon::new("http://x/icon.png", "data:image/png;base64,AA"));

    assert_eq!(
        encode(&snippet),
        r#"<!--basic--><div class="snippet"><img class="icon" src="data:image/png;base64,AA" /><p>see <a href="http://x">here</a></p></div>"#
    );
}

#[test]
fn fragment_without_marker_is_not_decoded() {
    assert_eq!(decode("<p>no marker</p>"), None);
}

#[rstest]
#[case::empty(Snippet::default())]
#[case::plain(Snippet::new("plain text"))]
#[case::link_only(Snippet::new("[https://www.mozilla.org/|Mozilla]"))]
#[case::link_in_sentence(Snippet::new("Get [https://addons.mozilla.org/|add-ons] today!"))]
#[case::icon_only(Snippet::new("").with_icon(Icon::from_data_uri("data:image/png;base64,iVBORw0KGgo=")))]
#[case::icon_and_link(
    Snippet::new("Try [http://x/y?z=1|this]")
        .with_icon(Icon::new("http://x/icon.png", "data:image/png;base64,AA"))
)]
#[case::markup_lookalikes(Snippet::new("brackets [like this] and pipes | stay"))]
fn single_link_snippets_round_trip(#[case] snippet: Snippet) {
    assert_eq!(decode(&encode(&snippet)), Some(snippet));
}

#[test]
fn second_anchor_stays_html_in_the_model() {
    let html = r#"<!--basic--><div class="snippet"><p><a href="http://x">a</a> and <a href="http://y">b</a></p></div>"#;
    let snippet = decode(html).unwrap();

    assert_eq!(snippet.text, r#"[http://x|a] and <a href="http://y">b</a>"#);
    assert!(!snippet.text.contains("[http://y|b]"));
}

#[test]
fn legacy_unescaped_fragments_stay_byte_identical() {
    let stored = r#"<!--basic--><div class="snippet"><p>Q&A with <a href="http://x?a=1&b=2">us</a></p></div>"#;
    let snippet = decode(stored).unwrap();
    assert_eq!(encode(&snippet), stored);
}

#[test]
fn escaping_codec_is_opt_in() {
    let snippet = Snippet::new("Q&A");
    let legacy = SnippetCodec::default();
    let escaping = SnippetCodec::new().escaping_ampersands(true);

    assert_ne!(legacy.encode(&snippet), escaping.encode(&snippet));
    assert_eq!(escaping.decode(&escaping.encode(&snippet)), Some(snippet));
}
