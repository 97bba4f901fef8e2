//! Reader for individual `.eml` files (RFC 5322 messages without MBOX framing).

use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::model::part::Part;
use crate::parser::mime;

/// Read a whole `.eml` file into memory.
///
/// A missing file is reported as [`ConvertError::FileNotFound`].
pub fn read_eml(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConvertError::FileNotFound(path.to_path_buf())
        } else {
            ConvertError::io(path, e)
        }
    })
}

/// Read and parse a single `.eml` file into its parts.
pub fn parse_eml(path: impl AsRef<Path>) -> Result<Vec<Part>> {
    let data = read_eml(path)?;
    mime::parse_parts(&data)
}
