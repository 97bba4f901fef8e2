//! Centralized error types for mail2html.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the mail2html library.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// I/O error with the associated file path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified file does not exist.
    #[error("The file({0}) does not exist")]
    FileNotFound(PathBuf),

    /// A part's payload could not be decoded (bad transfer encoding or invalid UTF-8).
    #[error("Failed to decode content: {0}")]
    Decode(String),

    /// An HTML part could not be parsed as a document.
    #[error("Failed to parse HTML: {0}")]
    Parse(String),

    /// The raw bytes could not be read as a MIME message.
    #[error("MIME parsing error: {0}")]
    Mime(String),

    /// Writing converted output failed.
    #[error("Export error: {0}")]
    Export(String),
}

/// Convenience alias for `Result<T, ConvertError>`.
pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<std::string::FromUtf8Error> for ConvertError {
    fn from(source: std::string::FromUtf8Error) -> Self {
        Self::Decode(source.to_string())
    }
}
