//! Custom error types for the utf8-chardb crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A malformed UTF-8 byte sequence was met during decoding: a truncated
    /// sequence, a bad continuation byte, or a bad leader for the scan
    /// distance.
    #[error("invalid UTF-8 sequence at byte offset {offset}")]
    InvalidEncoding { offset: usize },

    /// An index or range request fell outside the buffer, or landed in the
    /// middle of a codepoint.
    #[error("out of range: {context} (byte offset {offset})")]
    OutOfRange { context: &'static str, offset: usize },

    /// The builder met a two-letter general-category code absent from the
    /// closed mapping table. Fatal: the generation run is aborted.
    #[error("unknown general category {code:?} on line {line}")]
    UnknownCategory { code: String, line: usize },

    /// A generated line produced a different byte span than all prior lines.
    /// Fatal: the record layout contract is broken.
    #[error("record width mismatch on line {line}: expected {expected} bytes, but found {found} bytes")]
    RecordWidthMismatch { line: usize, expected: u64, found: u64 },

    /// A malformed integer literal during parse.
    #[error("format error: {0}")]
    FormatError(String),

    /// Structurally invalid data: a source line with too few fields, or a
    /// corrupt artifact (truncated table, bad category byte, inverted
    /// name span).
    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// A convenience `Result` type alias using the crate's `Error` type.
pub type Result<T> = std::result::Result<T, Error>;
