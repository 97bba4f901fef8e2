//! `mail2html` — convert raw e-mail messages into self-contained HTML.
//!
//! This crate walks the MIME parts of a message, turns the `text/plain` and
//! `text/html` bodies into HTML, and inlines base64 image attachments as
//! data URIs.
//!
//! ```no_run
//! let result = mail2html::convert::convert_file("message.eml")?;
//! if let Some(html) = result.html {
//!     println!("{html}");
//! }
//! # Ok::<(), mail2html::error::ConvertError>(())
//! ```

pub mod config;
pub mod convert;
pub mod embed;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;

pub use convert::{convert_file, convert_message};
pub use error::{ConvertError, Result};
pub use model::message::{ImageMap, MessageResult};
