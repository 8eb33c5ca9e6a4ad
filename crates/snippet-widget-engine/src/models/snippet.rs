use serde::{Deserialize, Serialize};

/// The logical content of a basic snippet: an optional icon and one text block.
///
/// `text` is always held in wiki markup (`[URL|LABEL]`), never as HTML anchors.
/// Conversion to and from HTML is the codec's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub text: String,
    pub icon: Option<Icon>,
}

impl Snippet {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.icon.is_none()
    }
}

/// A fully resolved icon. Both fields are always populated; an icon whose
/// encoding is still in flight never gets this far.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Icon {
    /// Where the editor got the image from.
    pub source_url: String,
    /// `data:` URI with the base64 encoded image, the only thing serialized.
    pub data_uri: String,
}

impl Icon {
    pub fn new(source_url: impl Into<String>, data_uri: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            data_uri: data_uri.into(),
        }
    }

    /// Icon recovered from stored HTML, where only the `src` survives.
    pub fn from_data_uri(data_uri: impl Into<String>) -> Self {
        let data_uri = data_uri.into();
        Self {
            source_url: data_uri.clone(),
            data_uri,
        }
    }
}

/// Icons compare by the image they render. `source_url` is not part of the
/// stored fragment, so two icons that serialize identically are the same icon.
impl PartialEq for Icon {
    fn eq(&self, other: &Self) -> bool {
        self.data_uri == other.data_uri
    }
}
