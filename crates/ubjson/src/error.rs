//! Error types for encoding and decoding.

use std::sync::Arc;

use thiserror::Error;
use ubjson_buffers::SourceError;

/// Errors raised while decoding a byte stream.
///
/// Every failure is terminal for the `decode` call that raised it: no
/// partial tree is returned and no bytes are skipped cleanly.
#[derive(Debug, Error, Clone)]
pub enum UbjsonError {
    /// The leading byte of a value matched no marker table entry.
    #[error("unknown type marker 0x{0:02x} at offset {1}")]
    UnknownMarker(u8, usize),
    /// The stream ended inside a value's fixed payload or length field.
    #[error("unexpected end of stream")]
    UnexpectedEndOfStream,
    /// A container declared more elements than the stream holds.
    #[error("container declared {declared} elements but the stream ended after {read}")]
    TruncatedContainer { declared: usize, read: usize },
    /// A huge-number payload was not a plain signed digit string.
    #[error("huge number payload is not a plain signed digit string")]
    MalformedNumeric,
    /// An object entry's key position held a non-string marker.
    #[error("object key must be a string value, found marker 0x{0:02x}")]
    InvalidObjectKey(u8),
    /// The compact container count 255 declares an unbounded container,
    /// which this decoder does not support.
    #[error("unbounded container (compact count 255) decoding is not supported")]
    UnsupportedUnboundedContainer,
    /// Containers nested past the configured depth limit.
    #[error("container nesting exceeds the depth limit of {0}")]
    NestingTooDeep(usize),
    /// A string payload held invalid UTF-8.
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
    /// A full (4-byte) length field held a negative value.
    #[error("full length field holds negative value {0}")]
    InvalidLength(i32),
    /// The byte source failed; the underlying I/O error is carried through
    /// unchanged.
    #[error("byte source failure: {0}")]
    Io(Arc<std::io::Error>),
}

impl From<SourceError> for UbjsonError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::EndOfStream => UbjsonError::UnexpectedEndOfStream,
            SourceError::Io(e) => UbjsonError::Io(e),
        }
    }
}

/// Errors raised while encoding a value tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A payload or container exceeds what a full length field can declare.
    #[error("payload of {0} bytes exceeds the maximum encodable length")]
    SizeOverflow(usize),
    /// A huge-number value holds text that is not a plain signed digit
    /// string of its kind.
    #[error("huge number payload is not a plain signed digit string")]
    MalformedNumeric,
}

/// Errors raised by the streaming sink entry point.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
