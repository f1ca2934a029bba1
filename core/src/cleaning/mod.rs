//! Null-equivalent removal over JSON-like records
//!
//! The record is modelled as [`serde_json::Value`]; cleaning is structural
//! recursion over its variants. See [`SanitizeProfile`](crate::SanitizeProfile)
//! for the two empty-container policies.

pub mod sanitizer;

pub use sanitizer::{is_null_equivalent, sanitize, sanitize_map};
