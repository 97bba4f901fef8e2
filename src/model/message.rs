//! Conversion outputs: per-part results, the image map and the final message result.

use serde::Serialize;

/// An inline image ready to be embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Content-ID without angle brackets.
    pub content_id: String,

    /// `data:<mime-type>;base64,<payload>`.
    pub data_uri: String,
}

/// What a single part turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Converted {
    /// HTML produced from a `text/plain` part.
    PlainBody(String),
    /// Re-serialized `text/html` part.
    HtmlBody(String),
    /// A base64 `image/*` part with a Content-ID.
    Image(InlineImage),
}

/// Content-ID → data URI, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageMap {
    entries: Vec<(String, String)>,
}

impl ImageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an image. An existing key keeps its position and gets the new URI.
    pub fn insert(&mut self, content_id: impl Into<String>, data_uri: impl Into<String>) {
        let content_id = content_id.into();
        let data_uri = data_uri.into();
        match self.entries.iter_mut().find(|(cid, _)| *cid == content_id) {
            Some(entry) => entry.1 = data_uri,
            None => self.entries.push((content_id, data_uri)),
        }
    }

    pub fn get(&self, content_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(cid, _)| cid == content_id)
            .map(|(_, uri)| uri.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(content_id, data_uri)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(cid, uri)| (cid.as_str(), uri.as_str()))
    }
}

impl FromIterator<InlineImage> for ImageMap {
    fn from_iter<I: IntoIterator<Item = InlineImage>>(iter: I) -> Self {
        let mut map = Self::new();
        for image in iter {
            map.insert(image.content_id, image.data_uri);
        }
        map
    }
}

/// The HTML renditions of one message.
///
/// Serializes to a JSON object holding only the keys that are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageResult {
    /// `<pre>`-wrapped plain body, with the attachment block if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain: Option<String>,

    /// Re-serialized HTML body with images inlined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl MessageResult {
    /// `true` when neither body was found.
    pub fn is_empty(&self) -> bool {
        self.plain.is_none() && self.html.is_none()
    }
}
