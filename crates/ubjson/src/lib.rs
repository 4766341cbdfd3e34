//! Universal Binary JSON (Draft 8) codec.
//!
//! A self-describing, length-prefixed binary document format: every value
//! starts with a one-byte type marker, and strings, huge numbers and
//! containers carry a compact (1-byte) or full (4-byte big-endian) length
//! chosen deterministically from the payload size. Decoding reconstructs
//! the full [`UbjValue`] tree by recursive descent; encoding is the exact
//! inverse, so `decode(encode(v)) == v` for every constructible tree,
//! duplicate object keys and container order included.
//!
//! ```
//! use ubjson::{decode, encode, UbjValue};
//!
//! let doc = UbjValue::Object(vec![
//!     ("a".to_owned(), UbjValue::Int8(1)),
//!     ("b".to_owned(), UbjValue::Array(vec![
//!         UbjValue::Str("x".to_owned()),
//!         UbjValue::Bool(true),
//!     ])),
//! ]);
//! let bytes = encode(&doc).unwrap();
//! assert_eq!(decode(&bytes).unwrap(), doc);
//! ```
//!
//! Known limitation: the wire format reserves the compact container count
//! 255 for unbounded containers terminated by an `E` marker. Decoding that
//! form is not supported and fails fast with
//! [`UbjsonError::UnsupportedUnboundedContainer`].

pub mod markers;

mod decoder;
mod encoder;
mod error;
mod huge;
mod value;

pub use decoder::{UbjsonDecoder, DEFAULT_MAX_DEPTH};
pub use encoder::UbjsonEncoder;
pub use error::{EncodeError, UbjsonError, WriteError};
pub use huge::{classify, HugeKind};
pub use value::UbjValue;

/// Encodes a value tree into its wire bytes.
pub fn encode(value: &UbjValue) -> Result<Vec<u8>, EncodeError> {
    UbjsonEncoder::new().encode(value)
}

/// Encodes a value tree into an [`std::io::Write`] sink.
pub fn encode_into<W: std::io::Write>(value: &UbjValue, sink: &mut W) -> Result<(), WriteError> {
    UbjsonEncoder::new().encode_into(value, sink)
}

/// Decodes a single value tree from wire bytes.
pub fn decode(data: &[u8]) -> Result<UbjValue, UbjsonError> {
    UbjsonDecoder::new().decode(data)
}

/// Decodes a single value tree from an [`std::io::Read`] stream, consuming
/// exactly the bytes of that value.
pub fn decode_from<R: std::io::Read>(source: &mut R) -> Result<UbjValue, UbjsonError> {
    UbjsonDecoder::new().decode_from(source)
}
