//! MIME message parsing: flattens the part tree into [`Part`] records.

use mail_parser::{MessageParser, MimeHeaders, PartType};

use crate::error::{ConvertError, Result};
use crate::model::part::Part;

/// Maximum depth for nested `message/rfc822` parts (to prevent stack overflow on
/// adversarial input).
const MAX_DEPTH: usize = 10;

/// Parse a complete raw message and return every part in document order.
///
/// Containers (`multipart/*`, `message/rfc822`) are included as parts of their
/// own, followed by their children, as a depth-first walk would visit them.
pub fn parse_parts(raw_message: &[u8]) -> Result<Vec<Part>> {
    let message_bytes = skip_from_line(raw_message);

    let message = MessageParser::default()
        .parse(message_bytes)
        .ok_or_else(|| ConvertError::Mime("Failed to parse message".into()))?;

    let mut parts = Vec::with_capacity(message.parts.len());
    collect_parts(&message, 0, &mut parts)?;
    Ok(parts)
}

fn collect_parts(
    message: &mail_parser::Message<'_>,
    depth: usize,
    out: &mut Vec<Part>,
) -> Result<()> {
    let raw = message.raw_message();

    for part in &message.parts {
        let record = to_part(part, raw);
        let nested_raw = match part.body {
            PartType::Message(_) => Some(record.decoded_body()?),
            _ => None,
        };
        out.push(record);

        let Some(nested_raw) = nested_raw else {
            continue;
        };
        if depth >= MAX_DEPTH {
            tracing::warn!(depth, "Nested message too deep, skipping its parts");
            continue;
        }

        // Re-parse the embedded message from its own bytes so offsets stay local.
        match MessageParser::default().parse(&nested_raw[..]) {
            Some(nested) => collect_parts(&nested, depth + 1, out)?,
            None => tracing::warn!("Failed to parse nested message, skipping its parts"),
        }
    }

    Ok(())
}

/// Build a [`Part`] record from a `mail_parser` part and the raw bytes it points into.
fn to_part(part: &mail_parser::MessagePart<'_>, raw: &[u8]) -> Part {
    let (maintype, subtype) = part
        .content_type()
        .map(|ct: &mail_parser::ContentType| {
            (
                ct.ctype().to_ascii_lowercase(),
                ct.subtype().unwrap_or("").to_ascii_lowercase(),
            )
        })
        .unwrap_or_else(|| default_type(&part.body));

    let start = part.raw_body_offset() as usize;
    let end = part.raw_end_offset() as usize;
    let body = raw.get(start..end).unwrap_or_default().to_vec();

    Part {
        maintype,
        subtype,
        transfer_encoding: part.content_transfer_encoding().map(String::from),
        content_id: part.content_id().map(String::from),
        body,
    }
}

/// Type to assume when a part carries no Content-Type header.
fn default_type(body: &PartType<'_>) -> (String, String) {
    match body {
        PartType::Multipart(_) => ("multipart".into(), "mixed".into()),
        PartType::Message(_) => ("message".into(), "rfc822".into()),
        _ => ("text".into(), "plain".into()),
    }
}

/// Skip the `From ` separator line at the start of MBOX-exported messages.
fn skip_from_line(data: &[u8]) -> &[u8] {
    // Handle BOM
    let data = data.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(data);

    if data.starts_with(b"From ") {
        if let Some(pos) = data.iter().position(|&b| b == b'\n') {
            return &data[pos + 1..];
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    const MULTIPART: &[u8] = b"From: alice@example.com\r\n\
Subject: Hi\r\n\
MIME-Version: 1.0\r\n\
Content-Type: multipart/mixed; boundary=\"XX\"\r\n\
\r\n\
--XX\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Hello\r\n\
--XX\r\n\
Content-Type: image/GIF\r\n\
Content-Transfer-Encoding: base64\r\n\
Content-ID: <dot@example>\r\n\
\r\n\
R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7\r\n\
--XX--\r\n";

    #[test]
    fn test_skip_from_line() {
        let data = b"From user@example.com Thu Jan 01 00:00:00 2024\nSubject: Test\n\nBody\n";
        let result = skip_from_line(data);
        assert!(result.starts_with(b"Subject:"));
    }

    #[test]
    fn test_skip_from_line_no_from() {
        let data = b"Subject: Test\n\nBody\n";
        let result = skip_from_line(data);
        assert_eq!(result, data);
    }

    #[test]
    fn test_skip_bom() {
        let data = b"\xEF\xBB\xBFSubject: Test\n\nBody\n";
        assert!(skip_from_line(data).starts_with(b"Subject:"));
    }

    #[test]
    fn test_parse_parts_multipart_order() {
        let parts = parse_parts(MULTIPART).unwrap();
        let types: Vec<String> = parts.iter().map(Part::content_type).collect();
        assert_eq!(types, ["multipart/mixed", "text/plain", "image/gif"]);
    }

    #[test]
    fn test_parse_parts_image_headers() {
        let parts = parse_parts(MULTIPART).unwrap();
        let image = &parts[2];
        assert!(image.is_base64());
        assert!(image.content_id.as_deref().unwrap().contains("dot@example"));
        let decoded = image.decoded_body().unwrap();
        assert!(decoded.starts_with(b"GIF89a"));
    }

    #[test]
    fn test_parse_parts_default_type_is_text_plain() {
        let parts = parse_parts(b"Subject: Bare\r\n\r\nJust text\r\n").unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].content_type(), "text/plain");
        assert!(String::from_utf8_lossy(&parts[0].body).contains("Just text"));
    }
}
