//! `image/*` → `(content-id, data URI)`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::Result;
use crate::model::message::InlineImage;
use crate::model::part::Part;

/// Convert an image part into an inline image.
///
/// Returns `Ok(None)` for parts that cannot be embedded: a transfer encoding
/// other than base64, or no usable Content-ID.
pub fn convert_image(part: &Part) -> Result<Option<InlineImage>> {
    if !part.is_base64() {
        tracing::debug!(
            content_type = %part.content_type(),
            encoding = ?part.transfer_encoding,
            "Skipping non-base64 image"
        );
        return Ok(None);
    }

    let Some(content_id) = part.content_id.as_deref().map(normalize_content_id) else {
        tracing::debug!(content_type = %part.content_type(), "Skipping image without Content-ID");
        return Ok(None);
    };
    if content_id.is_empty() {
        return Ok(None);
    }

    let payload = STANDARD.encode(part.decoded_body()?);
    let data_uri = format!("data:{};base64,{payload}", part.content_type());

    Ok(Some(InlineImage {
        content_id: content_id.to_string(),
        data_uri,
    }))
}

/// Strip the `<…>` delimiters of a Content-ID.
///
/// Values without both brackets are returned trimmed but otherwise untouched.
pub fn normalize_content_id(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER_B64: &str = "iVBORw0KGgo=";

    #[test]
    fn test_convert_base64_image() {
        let part = Part::new("image/png", "iVBORw0K\r\nGgo=\r\n")
            .with_encoding("base64")
            .with_content_id("<logo@example.com>");
        let image = convert_image(&part).unwrap().unwrap();
        assert_eq!(image.content_id, "logo@example.com");
        assert_eq!(image.data_uri, format!("data:image/png;base64,{PNG_HEADER_B64}"));
    }

    #[test]
    fn test_non_base64_image_is_skipped() {
        for encoding in ["quoted-printable", "7bit", "binary"] {
            let part = Part::new("image/png", "raw")
                .with_encoding(encoding)
                .with_content_id("<x>");
            assert_eq!(convert_image(&part).unwrap(), None);
        }
        let part = Part::new("image/png", "raw").with_content_id("<x>");
        assert_eq!(convert_image(&part).unwrap(), None);
    }

    #[test]
    fn test_missing_content_id_is_skipped() {
        let part = Part::new("image/png", PNG_HEADER_B64).with_encoding("base64");
        assert_eq!(convert_image(&part).unwrap(), None);

        let part = part.with_content_id("<>");
        assert_eq!(convert_image(&part).unwrap(), None);
    }

    #[test]
    fn test_invalid_base64_fails() {
        let part = Part::new("image/png", "***")
            .with_encoding("base64")
            .with_content_id("<x>");
        assert!(convert_image(&part).is_err());
    }

    #[test]
    fn test_normalize_content_id() {
        assert_eq!(normalize_content_id("<abc@d>"), "abc@d");
        assert_eq!(normalize_content_id(" <abc> "), "abc");
        assert_eq!(normalize_content_id("abc@d"), "abc@d");
        assert_eq!(normalize_content_id("<abc"), "<abc");
    }
}
