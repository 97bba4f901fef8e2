//! Splice inline images back into the converted bodies.
//!
//! - HTML bodies: `<img src="cid:…">` references are replaced by data URIs.
//! - Plain bodies: every image is appended after a separator, since there
//!   are no references to resolve.

use crate::convert::html::{parse_document, serialize};
use crate::error::{ConvertError, Result};
use crate::model::message::ImageMap;

/// `alt` text set on images whose `cid:` reference has no matching part.
pub const EMBED_FAILED_ALT: &str = "Failed to embed attached image";

/// Label preceding each image appended to a plain body.
pub const ATTACHMENT_LABEL: &str = "Attachment";

/// Replace `cid:` image sources in `html` with the matching data URIs.
///
/// Unresolved images keep their `src` and get [`EMBED_FAILED_ALT`] as `alt`.
pub fn embed_images_in_html(html: &str, images: &ImageMap) -> Result<String> {
    let document = parse_document(html)?;
    let img_tags = document
        .select("img")
        .map_err(|()| ConvertError::Parse("invalid selector".into()))?;

    for img in img_tags {
        let mut attributes = img.attributes.borrow_mut();
        let src = attributes.get("src").unwrap_or_default().to_string();
        let cid = src.strip_prefix("cid:").unwrap_or(&src);

        match images.get(cid) {
            Some(data_uri) => {
                attributes.insert("src", data_uri.to_string());
            }
            None => {
                tracing::debug!(src = %src, "No inline image for reference");
                attributes.insert("alt", EMBED_FAILED_ALT.to_string());
            }
        }
    }

    serialize(&document)
}

/// Append all images to a `<pre>` plain body, each under a numbered label.
pub fn attach_images_to_plain(plain: &str, images: &ImageMap) -> String {
    let mut html = String::from(plain);
    html.push_str("<hr>");
    for (n, (_, data_uri)) in images.iter().enumerate() {
        html.push_str(&format!("<p>{ATTACHMENT_LABEL} {}</p>", n + 1));
        html.push_str(&format!("<img src=\"{data_uri}\">"));
    }
    html
}
