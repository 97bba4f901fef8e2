//! Export functionality: writing converted messages to disk.

pub mod html;
