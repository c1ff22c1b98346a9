//! Error types for binary decoding and document loading.

use thiserror::Error;

/// An error that can occur while decoding a binary buffer.
///
/// Every error aborts the whole decode; no partial tree is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// A zero-length buffer was passed to the decoder.
    #[error("empty input: a binary document holds at least one record")]
    EmptyInput,

    /// A read would run past the end of the buffer.
    #[error("truncated input while reading {context} at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        context: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A byte outside the 14 defined tags was found where a tag was expected.
    #[error("unknown tag {tag} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },

    /// A valid tag that cannot introduce a size record was found where a size was expected.
    #[error("tag {tag} at offset {offset} is not a valid size record")]
    InvalidSizeTag { tag: u8, offset: usize },

    /// A size record decoded to a negative count or length.
    #[error("negative size {size} at offset {offset}")]
    NegativeSize { size: i64, offset: usize },

    /// An object key was not encoded as a string record.
    #[error("object key at offset {offset} has tag {tag}, expected a string record")]
    InvalidKeyTag { tag: u8, offset: usize },

    /// String payload is not valid UTF-8.
    #[error("invalid UTF-8 in string payload at offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// Bool payload other than 0 or 1 (strict mode).
    #[error("invalid bool value {value} at offset {offset} (expected 0 or 1)")]
    InvalidBool { value: u8, offset: usize },

    /// Objects/arrays nested deeper than the configured limit.
    #[error("nesting depth exceeds limit of {max}")]
    DepthLimitExceeded { max: usize },

    /// Bytes left over after the root record (strict mode).
    #[error("{remaining} trailing bytes after root record at offset {offset}")]
    TrailingBytes { offset: usize, remaining: usize },
}

/// An error from loading or printing a [`Document`](crate::Document).
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed JSON text, passed through from `serde_json`.
    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    /// Malformed binary input.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
