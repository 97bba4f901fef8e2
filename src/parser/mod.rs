//! Email parsing: EML reading, MIME part flattening, and transfer decoding.

pub mod eml;
pub mod mime;
pub mod transfer;
