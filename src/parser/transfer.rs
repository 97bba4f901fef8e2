//! Content-Transfer-Encoding decoding, on top of the `mail-parser` decoders.

use mail_parser::decoders::base64::base64_decode;
use mail_parser::decoders::quoted_printable::quoted_printable_decode;

use crate::error::{ConvertError, Result};

/// Undo a Content-Transfer-Encoding.
///
/// `7bit`, `8bit`, `binary`, unknown and absent encodings return the bytes as-is.
pub fn decode(encoding: Option<&str>, raw: &[u8]) -> Result<Vec<u8>> {
    let encoding = encoding.map(|e| e.trim().to_ascii_lowercase());
    match encoding.as_deref() {
        Some("base64") => base64_decode(raw)
            .ok_or_else(|| ConvertError::Decode("invalid base64 payload".into())),
        Some("quoted-printable") => quoted_printable_decode(raw)
            .ok_or_else(|| ConvertError::Decode("invalid quoted-printable payload".into())),
        _ => Ok(raw.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_identity_encodings() {
        assert_eq!(decode(Some("7bit"), b"abc\r\n").unwrap(), b"abc\r\n");
        assert_eq!(decode(Some("8bit"), b"abc").unwrap(), b"abc");
        assert_eq!(decode(None, b"abc").unwrap(), b"abc");
    }

    #[test]
    fn test_decode_base64_with_line_breaks() {
        let decoded = decode(Some("BASE64"), b"SGVsbG8s\r\nIFdvcmxkIQ==\r\n").unwrap();
        assert_eq!(decoded, b"Hello, World!");
    }

    #[test]
    fn test_decode_base64_invalid() {
        let err = decode(Some("base64"), b"!!!not base64!!!").unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }

    #[test]
    fn test_decode_quoted_printable() {
        let raw = b"H=C3=A9llo, W=\r\norld!";
        let decoded = decode(Some("quoted-printable"), raw).unwrap();
        assert_eq!(decoded, "Héllo, World!".as_bytes());
    }

    #[test]
    fn test_decode_quoted_printable_drops_whitespace_before_hard_break() {
        let raw = b"ab  \r\ncd\t\r\nef";
        let decoded = decode(Some("quoted-printable"), raw).unwrap();
        assert_eq!(decoded, b"ab\r\ncd\r\nef");
        assert_eq!(Some(decoded), quoted_printable_decode(raw));
    }

    #[test]
    fn test_decode_quoted_printable_invalid_escape() {
        let err = decode(Some("quoted-printable"), b"a=ZZb").unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }
}
