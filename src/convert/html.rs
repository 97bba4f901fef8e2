//! `text/html` → normalized HTML, by a round trip through a DOM.

use kuchikiki::traits::TendrilSink;
use kuchikiki::NodeRef;

use crate::error::{ConvertError, Result};
use crate::model::part::Part;

/// Convert a `text/html` part: decode, parse and re-serialize.
pub fn convert_html(part: &Part) -> Result<String> {
    let text = String::from_utf8(part.decoded_body()?)?;
    normalize_html(&text)
}

/// Parse `html` and serialize it back, fixing unclosed or misnested tags.
pub fn normalize_html(html: &str) -> Result<String> {
    let document = parse_document(html)?;
    serialize(&document)
}

/// Parse an HTML string into a DOM.
///
/// A document with no content at all cannot be parsed.
pub fn parse_document(html: &str) -> Result<NodeRef> {
    if html.trim().is_empty() {
        return Err(ConvertError::Parse("document is empty".into()));
    }
    Ok(kuchikiki::parse_html().one(html))
}

/// Serialize a DOM node (and its children) back to a string.
pub fn serialize(node: &NodeRef) -> Result<String> {
    let mut buf = Vec::new();
    node.serialize(&mut buf)
        .map_err(|e| ConvertError::Parse(format!("serialization failed: {e}")))?;
    String::from_utf8(buf).map_err(|e| ConvertError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_closes_tags() {
        let html = normalize_html("<p>Hello <b>world</p>").unwrap();
        assert!(html.contains("<b>world</b></p>"), "got: {html}");
        assert!(html.contains("<body>"));
    }

    #[test]
    fn test_normalize_keeps_text() {
        let html = normalize_html("<div>Caf\u{e9} &amp; cr\u{e8}me</div>").unwrap();
        assert!(html.contains("<div>Caf\u{e9} &amp; cr\u{e8}me</div>"), "got: {html}");
    }

    #[test]
    fn test_normalize_is_stable() {
        let once = normalize_html("<ul><li>a<li>b</ul>").unwrap();
        let twice = normalize_html(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_document_fails() {
        let err = normalize_html("  \r\n ").unwrap_err();
        assert!(matches!(err, ConvertError::Parse(_)));
    }

    #[test]
    fn test_convert_html_base64() {
        // "<p>Hi</p>"
        let part = Part::new("text/html", "PHA+SGk8L3A+").with_encoding("base64");
        let html = convert_html(&part).unwrap();
        assert!(html.contains("<p>Hi</p>"));
    }

    #[test]
    fn test_convert_html_invalid_utf8() {
        let part = Part::new("text/html", vec![b'<', b'p', b'>', 0xC3]);
        assert!(matches!(convert_html(&part).unwrap_err(), ConvertError::Decode(_)));
    }
}
