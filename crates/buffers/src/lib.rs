//! Byte-level primitives for the ubjson codec: a growable big-endian
//! [`Writer`] sink and bounds-checked [`ByteSource`] readers.
//!
//! Nothing in this crate knows about the wire format; it only moves bytes.

mod reader;
mod source;
mod writer;

pub use reader::Reader;
pub use source::{ByteSource, IoSource, SourceError};
pub use writer::Writer;
