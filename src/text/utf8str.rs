//! A byte-addressable, non-owning view over UTF-8 text

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{Error, Result};
use super::cursor::{encode_into, is_continuation, Utf8Cursor};
use super::rev_cursor::RevUtf8Cursor;

/// The digit alphabet for integer formatting and parsing, radix 2 to 36.
const DIGITS: [u8; 36] = *b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A bounded view over a shared UTF-8 byte buffer.
///
/// `Clone` shares the underlying buffer; nothing is copied until a caller
/// asks for independence with [`detach`](Utf8Str::detach). Substrings are
/// views into the same buffer, addressed by byte offset. Views never
/// mutate the buffer, so any number of them may read it concurrently.
///
/// There is no one-to-one correspondence between bytes and codepoints; to
/// iterate by codepoint use [`cursor`](Utf8Str::cursor) or
/// [`rev_cursor`](Utf8Str::rev_cursor).
///
/// Invariant: a non-empty view begins and ends on codepoint boundaries.
/// Construction from raw bytes does not validate the encoding; the caller
/// asserts validity.
#[derive(Clone)]
pub struct Utf8Str {
    bytes: Arc<[u8]>,
    start: usize,
    len: usize,
}

impl Default for Utf8Str {
    fn default() -> Utf8Str {
        Utf8Str::from_vec(Vec::new())
    }
}

impl Utf8Str {
    /// The empty string.
    pub fn empty() -> Utf8Str {
        Utf8Str::default()
    }

    /// Wrap an owned byte buffer without copying or validating it.
    pub fn from_vec(bytes: Vec<u8>) -> Utf8Str {
        Utf8Str::from_arc(bytes.into())
    }

    /// Wrap a shared byte buffer without copying or validating it.
    pub fn from_arc(bytes: Arc<[u8]>) -> Utf8Str {
        let len = bytes.len();
        Utf8Str {
            bytes,
            start: 0,
            len,
        }
    }

    /// Length of this view in bytes, not codepoints.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The UTF-8 bytes of this view.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[self.start..self.start + self.len]
    }

    /// Borrow as `&str`, validating the encoding.
    pub fn as_str(&self) -> Result<&str> {
        std::str::from_utf8(self.as_bytes()).map_err(|e| Error::InvalidEncoding {
            offset: e.valid_up_to(),
        })
    }

    /// Copy the viewed bytes into a fresh buffer, releasing any larger or
    /// caller-held allocation this view was borrowing from.
    pub fn detach(&self) -> Utf8Str {
        Utf8Str::from_vec(self.as_bytes().to_vec())
    }

    /// A forward codepoint cursor over this view.
    pub fn cursor(&self) -> Utf8Cursor<'_> {
        Utf8Cursor::new(self.as_bytes())
    }

    /// A backward codepoint cursor over this view.
    pub fn rev_cursor(&self) -> RevUtf8Cursor<'_> {
        RevUtf8Cursor::new(self.as_bytes())
    }

    /// Count the codepoints in this view. Linear in the byte length; does
    /// not validate the encoding.
    pub fn count_codepoints(&self) -> usize {
        self.as_bytes().iter().filter(|&&b| !is_continuation(b)).count()
    }

    /// The view over `[start, start + len)`, in bytes. Zero-copy.
    ///
    /// Both boundaries must land on codepoint starts; a continuation byte
    /// at either boundary of a non-empty range fails with `OutOfRange`.
    pub fn substring(&self, start: usize, len: usize) -> Result<Utf8Str> {
        let end = start.checked_add(len).unwrap_or(usize::MAX);
        if end > self.len {
            return Err(Error::OutOfRange {
                context: "substring range past end of view",
                offset: end,
            });
        }
        if len > 0 {
            if is_continuation(self.byte_at(start)) {
                return Err(Error::OutOfRange {
                    context: "substring starts mid-codepoint",
                    offset: start,
                });
            }
            if end < self.len && is_continuation(self.byte_at(end)) {
                return Err(Error::OutOfRange {
                    context: "substring ends mid-codepoint",
                    offset: end,
                });
            }
        }
        Ok(self.slice_unchecked(start, len))
    }

    /// The view from byte offset `start` to the end. Zero-copy.
    pub fn substring_from(&self, start: usize) -> Result<Utf8Str> {
        if start > self.len {
            return Err(Error::OutOfRange {
                context: "substring start past end of view",
                offset: start,
            });
        }
        self.substring(start, self.len - start)
    }

    /// Whether this view begins with the bytes of `other`.
    pub fn starts_with(&self, other: &Utf8Str) -> bool {
        other.len <= self.len && &self.as_bytes()[..other.len] == other.as_bytes()
    }

    /// Whether this view ends with the bytes of `other`.
    pub fn ends_with(&self, other: &Utf8Str) -> bool {
        other.len <= self.len && &self.as_bytes()[self.len - other.len..] == other.as_bytes()
    }

    /// Whether this view begins with the given native text. Byte prefix
    /// equality, which for two UTF-8 encodings is codepoint equality.
    pub fn starts_with_str(&self, other: &str) -> bool {
        other.len() <= self.len && &self.as_bytes()[..other.len()] == other.as_bytes()
    }

    /// Whether this view ends with the given native text.
    pub fn ends_with_str(&self, other: &str) -> bool {
        other.len() <= self.len && &self.as_bytes()[self.len - other.len()..] == other.as_bytes()
    }

    pub fn contains(&self, other: &Utf8Str) -> bool {
        self.index_of(other).is_some()
    }

    /// Byte offset of the first occurrence of `other` within this view.
    pub fn index_of(&self, other: &Utf8Str) -> Option<usize> {
        if other.is_empty() {
            return Some(0);
        }
        if other.len > self.len {
            return None;
        }
        self.as_bytes()
            .windows(other.len)
            .position(|window| window == other.as_bytes())
    }

    /// Byte offset of the first occurrence of `codepoint` within this view.
    pub fn index_of_point(&self, codepoint: u32) -> Option<usize> {
        self.index_of_any(&[codepoint])
    }

    /// Byte offset of the first occurrence of any of `codepoints`.
    pub fn index_of_any(&self, codepoints: &[u32]) -> Option<usize> {
        let mut cur = self.cursor();
        while let Ok(Some(point)) = cur.advance() {
            if codepoints.contains(&point.value) {
                return Some(point.offset);
            }
        }
        None
    }

    /// This view minus leading and trailing whitespace. Zero-copy.
    pub fn trim(&self) -> Utf8Str {
        self.trim_end().trim_start()
    }

    /// This view minus leading whitespace. Zero-copy.
    pub fn trim_start(&self) -> Utf8Str {
        let mut cur = self.cursor();
        loop {
            match cur.advance() {
                Ok(Some(point)) if is_whitespace_point(point.value) => continue,
                Ok(Some(point)) => return self.slice_unchecked(point.offset, self.len - point.offset),
                _ => return Utf8Str::empty(),
            }
        }
    }

    /// This view minus trailing whitespace. Zero-copy.
    pub fn trim_end(&self) -> Utf8Str {
        let mut cur = self.rev_cursor();
        loop {
            match cur.advance() {
                Ok(Some(point)) if is_whitespace_point(point.value) => continue,
                Ok(Some(point)) => return self.slice_unchecked(0, point.offset + point.encoded_len),
                _ => return Utf8Str::empty(),
            }
        }
    }

    /// Split on any of the given separator codepoints. Zero-copy: every
    /// field is a view into this buffer.
    ///
    /// Adjacent separators yield empty fields, and a trailing separator
    /// yields a trailing empty field, so a line with 14 separators always
    /// splits into exactly 15 fields.
    pub fn split(&self, separators: &[u32]) -> Result<Vec<Utf8Str>> {
        let mut fields = Vec::new();
        let mut field_start = 0;
        let mut cur = self.cursor();
        while let Some(point) = cur.advance()? {
            if separators.contains(&point.value) {
                fields.push(self.slice_unchecked(field_start, point.offset - field_start));
                field_start = point.offset + point.encoded_len;
            }
        }
        fields.push(self.slice_unchecked(field_start, self.len - field_start));
        Ok(fields)
    }

    /// Compare against 16-bit-unit text, reconstituting surrogate pairs
    /// for codepoints above 0xFFFF.
    pub fn eq_utf16(&self, units: &[u16]) -> bool {
        let mut cur = self.cursor();
        let mut i = 0;
        loop {
            let point = match cur.advance() {
                Ok(Some(point)) => point,
                Ok(None) => return i == units.len(),
                Err(_) => return false,
            };
            let Some(&unit) = units.get(i) else {
                return false;
            };
            let value = if (0xD800..=0xDBFF).contains(&unit) {
                i += 1;
                let Some(&low) = units.get(i) else {
                    return false;
                };
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return false;
                }
                0x10000 + (((unit as u32 - 0xD800) << 10) | (low as u32 - 0xDC00))
            } else {
                unit as u32
            };
            if value != point.value {
                return false;
            }
            i += 1;
        }
    }

    /// An uppercase copy of this view.
    ///
    /// Two passes: one to compute the output byte length, one to encode
    /// into a single exact-size buffer. The output length may differ from
    /// the input length. Codepoints above 0x1FFFF pass through unchanged;
    /// no case mapping is attempted for that range.
    pub fn to_upper(&self) -> Result<Utf8Str> {
        // to_upper and to_lower are near-duplicates on purpose: routing the
        // mapping through a closure costs an indirect call per codepoint.
        if self.is_empty() {
            return Ok(Utf8Str::empty());
        }
        let mut cur = self.cursor();
        let mut out_len = 0usize;
        while let Some(point) = cur.advance()? {
            out_len += match mappable_char(point.value) {
                Some(c) => c.to_uppercase().map(char::len_utf8).sum(),
                None => point.encoded_len,
            };
        }
        cur.reset();
        let mut buf = Vec::with_capacity(out_len);
        while let Some(point) = cur.advance()? {
            match mappable_char(point.value) {
                Some(c) => {
                    for mapped in c.to_uppercase() {
                        encode_into(mapped as u32, &mut buf);
                    }
                }
                None => {
                    buf.extend_from_slice(&self.as_bytes()[point.offset..point.offset + point.encoded_len]);
                }
            }
        }
        Ok(Utf8Str::from_vec(buf))
    }

    /// A lowercase copy of this view. Same two-pass shape and range rule
    /// as [`to_upper`](Utf8Str::to_upper).
    pub fn to_lower(&self) -> Result<Utf8Str> {
        if self.is_empty() {
            return Ok(Utf8Str::empty());
        }
        let mut cur = self.cursor();
        let mut out_len = 0usize;
        while let Some(point) = cur.advance()? {
            out_len += match mappable_char(point.value) {
                Some(c) => c.to_lowercase().map(char::len_utf8).sum(),
                None => point.encoded_len,
            };
        }
        cur.reset();
        let mut buf = Vec::with_capacity(out_len);
        while let Some(point) = cur.advance()? {
            match mappable_char(point.value) {
                Some(c) => {
                    for mapped in c.to_lowercase() {
                        encode_into(mapped as u32, &mut buf);
                    }
                }
                None => {
                    buf.extend_from_slice(&self.as_bytes()[point.offset..point.offset + point.encoded_len]);
                }
            }
        }
        Ok(Utf8Str::from_vec(buf))
    }

    /// Format `value` in the given radix (2 to 36) using the digit
    /// alphabet `0-9A-Z`.
    pub fn from_long(value: i64, radix: u32) -> Utf8Str {
        assert!((2..=36).contains(&radix), "radix must be between 2 and 36");
        if value == 0 {
            return Utf8Str::from("0");
        }
        let radix = radix as u64;
        let negative = value < 0;
        let mut magnitude = value.unsigned_abs();

        let mut digit_count = 0;
        let mut x = magnitude;
        while x > 0 {
            digit_count += 1;
            x /= radix;
        }

        let len = digit_count + negative as usize;
        let mut buf = vec![0u8; len];
        if negative {
            buf[0] = b'-';
        }
        let mut i = len;
        while magnitude > 0 {
            i -= 1;
            buf[i] = DIGITS[(magnitude % radix) as usize];
            magnitude /= radix;
        }
        Utf8Str::from_vec(buf)
    }

    /// Parse an integer in the given radix over the digit alphabet
    /// `0-9A-Z` (lowercase digits are not accepted).
    ///
    /// Fails with `FormatError` on a radix outside 2 to 36, an empty digit
    /// run, a digit outside the radix, or overflow. Never returns a
    /// partial value.
    pub fn parse_long(&self, radix: u32) -> Result<i64> {
        if !(2..=36).contains(&radix) {
            return Err(Error::FormatError(format!("radix {radix} out of range")));
        }
        let bytes = self.as_bytes();
        let (negative, digits) = match bytes.first() {
            Some(&b'-') => (true, &bytes[1..]),
            _ => (false, bytes),
        };
        if digits.is_empty() {
            return Err(Error::FormatError("empty digit run".into()));
        }
        let mut acc: i64 = 0;
        for &digit in digits {
            let value = DIGITS[..radix as usize]
                .iter()
                .position(|&d| d == digit)
                .ok_or_else(|| {
                    Error::FormatError(format!(
                        "invalid digit {:?} for radix {}",
                        digit as char, radix
                    ))
                })?;
            acc = acc
                .checked_mul(radix as i64)
                .and_then(|a| a.checked_add(value as i64))
                .ok_or_else(|| Error::FormatError("integer overflow".into()))?;
        }
        Ok(if negative { -acc } else { acc })
    }

    fn byte_at(&self, i: usize) -> u8 {
        self.bytes[self.start + i]
    }

    // For boundaries already known to land on codepoint starts.
    fn slice_unchecked(&self, start: usize, len: usize) -> Utf8Str {
        Utf8Str {
            bytes: Arc::clone(&self.bytes),
            start: self.start + start,
            len,
        }
    }
}

fn is_whitespace_point(value: u32) -> bool {
    char::from_u32(value).is_some_and(char::is_whitespace)
}

/// The codepoint as a `char` when it is in the case-mappable range.
fn mappable_char(value: u32) -> Option<char> {
    if value > 0x1FFFF {
        return None;
    }
    char::from_u32(value)
}

impl From<&str> for Utf8Str {
    /// Copies the UTF-8 bytes of `s` into a new shared buffer.
    fn from(s: &str) -> Utf8Str {
        Utf8Str::from_vec(s.as_bytes().to_vec())
    }
}

impl From<String> for Utf8Str {
    fn from(s: String) -> Utf8Str {
        Utf8Str::from_vec(s.into_bytes())
    }
}

impl PartialEq for Utf8Str {
    /// Byte-wise view-to-view equality.
    fn eq(&self, other: &Utf8Str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Utf8Str {}

impl Hash for Utf8Str {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl PartialEq<str> for Utf8Str {
    /// Codepoint-by-codepoint comparison against native text.
    fn eq(&self, other: &str) -> bool {
        let mut cur = self.cursor();
        let mut chars = other.chars();
        loop {
            match (cur.advance(), chars.next()) {
                (Ok(Some(point)), Some(c)) if point.value == c as u32 => continue,
                (Ok(None), None) => return true,
                _ => return false,
            }
        }
    }
}

impl PartialEq<&str> for Utf8Str {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl fmt::Display for Utf8Str {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for Utf8Str {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Utf8Str({:?})", String::from_utf8_lossy(self.as_bytes()))
    }
}
