//! # utf8-chardb
//!
//! An allocation-minimizing substrate for UTF-8 text: a byte-addressable
//! string view, forward and backward codepoint decoding, and an embedded
//! Unicode character property database generated offline from the
//! canonical UnicodeData.txt file and addressable in logarithmic time by
//! codepoint.

pub mod error;
pub mod text;
pub mod unicode;

// Re-export the main types for convenience
pub use error::{Error, Result};
pub use text::{DecodedPoint, RevUtf8Cursor, Utf8Cursor, Utf8Str};
pub use unicode::{CharDatabase, CharInfo, UnicodeCategory};
