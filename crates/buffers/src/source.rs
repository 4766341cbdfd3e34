//! The byte-source abstraction consumed by pull-style decoders.

use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Failure modes of a byte source.
///
/// I/O errors from an underlying reader are carried through untouched; a
/// clean end of data is its own case so callers can tell truncation apart
/// from transport failure.
#[derive(Debug, Error, Clone)]
pub enum SourceError {
    #[error("unexpected end of stream")]
    EndOfStream,
    #[error("byte source i/o failure: {0}")]
    Io(Arc<io::Error>),
}

/// A pull-style source of bytes: "give me exactly `n` bytes or fail".
///
/// Typed big-endian readers are derived from [`pull`](ByteSource::pull), so
/// implementors only have to supply the exact-read primitive and a consumed
/// byte count for error reporting.
pub trait ByteSource {
    /// Fills `buf` completely, or fails without producing a partial value.
    fn pull(&mut self, buf: &mut [u8]) -> Result<(), SourceError>;

    /// Number of bytes consumed so far.
    fn position(&self) -> usize;

    /// Reads an unsigned 8-bit integer.
    fn read_u8(&mut self) -> Result<u8, SourceError> {
        let mut buf = [0u8; 1];
        self.pull(&mut buf)?;
        Ok(buf[0])
    }

    /// Reads a signed 8-bit integer.
    fn read_i8(&mut self) -> Result<i8, SourceError> {
        Ok(self.read_u8()? as i8)
    }

    /// Reads a signed 16-bit integer (big-endian).
    fn read_i16(&mut self) -> Result<i16, SourceError> {
        let mut buf = [0u8; 2];
        self.pull(&mut buf)?;
        Ok(i16::from_be_bytes(buf))
    }

    /// Reads a signed 32-bit integer (big-endian).
    fn read_i32(&mut self) -> Result<i32, SourceError> {
        let mut buf = [0u8; 4];
        self.pull(&mut buf)?;
        Ok(i32::from_be_bytes(buf))
    }

    /// Reads a signed 64-bit integer (big-endian).
    fn read_i64(&mut self) -> Result<i64, SourceError> {
        let mut buf = [0u8; 8];
        self.pull(&mut buf)?;
        Ok(i64::from_be_bytes(buf))
    }

    /// Reads a 32-bit floating point number (big-endian).
    fn read_f32(&mut self) -> Result<f32, SourceError> {
        let mut buf = [0u8; 4];
        self.pull(&mut buf)?;
        Ok(f32::from_be_bytes(buf))
    }

    /// Reads a 64-bit floating point number (big-endian).
    fn read_f64(&mut self) -> Result<f64, SourceError> {
        let mut buf = [0u8; 8];
        self.pull(&mut buf)?;
        Ok(f64::from_be_bytes(buf))
    }

    /// Reads exactly `len` raw bytes into a new vector.
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>, SourceError> {
        let mut buf = vec![0u8; len];
        self.pull(&mut buf)?;
        Ok(buf)
    }
}

/// A [`ByteSource`] over any [`io::Read`] stream.
///
/// End-of-file surfaces as [`SourceError::EndOfStream`]; every other I/O
/// failure is passed through unchanged.
pub struct IoSource<R> {
    inner: R,
    consumed: usize,
}

impl<R: io::Read> IoSource<R> {
    /// Wraps a reader.
    pub fn new(inner: R) -> Self {
        Self { inner, consumed: 0 }
    }

    /// Unwraps the source, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read> ByteSource for IoSource<R> {
    fn pull(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        self.inner.read_exact(buf).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                SourceError::EndOfStream
            } else {
                SourceError::Io(Arc::new(e))
            }
        })?;
        self.consumed += buf.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.consumed
    }

    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>, SourceError> {
        // Lengths come off the wire; grow in chunks instead of trusting a
        // hostile length with one huge up-front allocation.
        const CHUNK: usize = 64 * 1024;
        let mut out = Vec::with_capacity(len.min(CHUNK));
        while out.len() < len {
            let take = (len - out.len()).min(CHUNK);
            let start = out.len();
            out.resize(start + take, 0);
            self.pull(&mut out[start..start + take])?;
        }
        Ok(out)
    }
}
