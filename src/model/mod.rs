//! Core data model types: MIME parts and conversion results.

pub mod message;
pub mod part;
