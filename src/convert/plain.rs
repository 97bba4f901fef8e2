//! `text/plain` → `<pre>` HTML fragment.

use crate::error::Result;
use crate::model::part::Part;

/// Line-break element substituted for CRLF and zero-width spaces.
pub const LINE_BREAK: &str = "<br />";

const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Convert a `text/plain` part into a preformatted HTML block.
///
/// The payload must be valid UTF-8 once the transfer encoding is undone.
/// Content is not HTML-escaped.
pub fn convert_plain(part: &Part) -> Result<String> {
    let text = String::from_utf8(part.decoded_body()?)?;
    Ok(plain_to_html(&text))
}

/// Replace CRLF and U+200B with line breaks and wrap in `<pre>`.
pub fn plain_to_html(text: &str) -> String {
    let html = text
        .replace("\r\n", LINE_BREAK)
        .replace(ZERO_WIDTH_SPACE, LINE_BREAK);
    format!("<pre>{html}</pre>")
}
