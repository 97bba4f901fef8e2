//! Message conversion: walk the parts, convert each one, fold the results and embed images.

pub mod html;
pub mod image;
pub mod plain;

use std::path::Path;

use crate::embed;
use crate::error::Result;
use crate::model::message::{Converted, ImageMap, MessageResult};
use crate::model::part::Part;
use crate::parser::{eml, mime};

/// Convert every relevant part, in document order.
///
/// `text/plain`, `text/html` and embeddable `image/*` parts produce an entry;
/// everything else is ignored. The first failing part aborts the walk.
pub fn walk(parts: &[Part]) -> Result<Vec<Converted>> {
    let mut converted = Vec::new();

    for part in parts {
        tracing::debug!(maintype = %part.maintype, subtype = %part.subtype, "Visiting part");
        match (part.maintype.as_str(), part.subtype.as_str()) {
            ("text", "plain") => converted.push(Converted::PlainBody(plain::convert_plain(part)?)),
            ("text", "html") => converted.push(Converted::HtmlBody(html::convert_html(part)?)),
            ("image", _) => {
                if let Some(img) = image::convert_image(part)? {
                    converted.push(Converted::Image(img));
                }
            }
            _ => {}
        }
    }

    Ok(converted)
}

/// Aggregate walk output. The last plain and the last HTML body win.
pub fn reduce(converted: Vec<Converted>) -> (MessageResult, ImageMap) {
    let mut result = MessageResult::default();
    let mut images = ImageMap::new();

    for item in converted {
        match item {
            Converted::PlainBody(text) => result.plain = Some(text),
            Converted::HtmlBody(text) => result.html = Some(text),
            Converted::Image(img) => images.insert(img.content_id, img.data_uri),
        }
    }

    (result, images)
}

/// Embed `images` into both bodies. Nothing changes when `images` is empty.
pub fn embed_images(mut result: MessageResult, images: &ImageMap) -> Result<MessageResult> {
    if images.is_empty() {
        return Ok(result);
    }

    if let Some(html) = result.html.take() {
        result.html = Some(embed::embed_images_in_html(&html, images)?);
    }
    if let Some(plain) = result.plain.take() {
        result.plain = Some(embed::attach_images_to_plain(&plain, images));
    }

    Ok(result)
}

/// Convert already-flattened parts into the final result.
pub fn convert_parts(parts: &[Part]) -> Result<MessageResult> {
    let (result, images) = reduce(walk(parts)?);
    tracing::debug!(
        plain = result.plain.is_some(),
        html = result.html.is_some(),
        images = images.len(),
        "Converted parts"
    );
    embed_images(result, &images)
}

/// Convert a raw RFC 822 message.
pub fn convert_message(raw_message: &[u8]) -> Result<MessageResult> {
    convert_parts(&mime::parse_parts(raw_message)?)
}

/// Read and convert a message file.
pub fn convert_file(path: impl AsRef<Path>) -> Result<MessageResult> {
    let path = path.as_ref();
    let data = eml::read_eml(path)?;
    let result = convert_message(&data)?;
    tracing::info!(path = %path.display(), "Converted message");
    Ok(result)
}
