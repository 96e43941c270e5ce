//! UTF-8 text views and codepoint decoding

mod cursor;
mod rev_cursor;
mod utf8str;

pub use cursor::{decode_at, encode_into, encoded_len, DecodedPoint, Utf8Cursor};
pub use rev_cursor::{decode_before, RevUtf8Cursor};
pub use utf8str::Utf8Str;
