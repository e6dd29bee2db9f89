//! Entity decoding
//!
//! Turns JSON payloads into typed entities.
//!
//! # Overview
//!
//! Entities derive `Deserialize` and implement [`FromJson`], which maps a
//! missing required key to [`crate::Error::MissingField`]. Optional keys
//! fall back to `None` or an empty list. The [`lenient`] helpers skip
//! malformed entries inside lists instead of breaking the whole decode.
//! Older API revisions plug in through [`FromJson::from_json_versioned`].

pub mod lenient;
mod types;

pub use types::{decode, decode_list, decode_versioned, Cursor, FromJson};
