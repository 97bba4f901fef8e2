//! A single MIME part, flattened out of the parsed message tree.

use crate::error::Result;
use crate::parser::transfer;

/// One node of a MIME message, as a fixed record.
///
/// `body` holds the payload exactly as it appears in the message stream,
/// still transfer-encoded. Call [`Part::decoded_body`] to get the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Lowercase major type (`"text"`, `"image"`, `"multipart"`, …).
    pub maintype: String,

    /// Lowercase subtype (`"plain"`, `"html"`, `"png"`, …).
    pub subtype: String,

    /// Content-Transfer-Encoding header value, if present.
    pub transfer_encoding: Option<String>,

    /// Content-ID header value, if present.
    pub content_id: Option<String>,

    /// Raw payload bytes.
    pub body: Vec<u8>,
}

impl Part {
    /// Build a part from a `maintype/subtype` string.
    ///
    /// A missing subtype leaves `subtype` empty.
    pub fn new(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        let (maintype, subtype) = content_type
            .split_once('/')
            .unwrap_or((content_type, ""));
        Self {
            maintype: maintype.trim().to_ascii_lowercase(),
            subtype: subtype.trim().to_ascii_lowercase(),
            transfer_encoding: None,
            content_id: None,
            body: body.into(),
        }
    }

    /// Set the Content-Transfer-Encoding.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.transfer_encoding = Some(encoding.into());
        self
    }

    /// Set the Content-ID.
    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = Some(content_id.into());
        self
    }

    /// Full MIME type, e.g. `"image/png"`.
    pub fn content_type(&self) -> String {
        if self.subtype.is_empty() {
            self.maintype.clone()
        } else {
            format!("{}/{}", self.maintype, self.subtype)
        }
    }

    /// `true` if the declared transfer encoding is base64.
    pub fn is_base64(&self) -> bool {
        self.transfer_encoding
            .as_deref()
            .is_some_and(|enc| enc.trim().eq_ignore_ascii_case("base64"))
    }

    /// Payload with the transfer encoding undone.
    pub fn decoded_body(&self) -> Result<Vec<u8>> {
        transfer::decode(self.transfer_encoding.as_deref(), &self.body)
    }
}
