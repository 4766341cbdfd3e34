//! In-memory byte slice reader.

use crate::source::{ByteSource, SourceError};

/// A bounds-checked cursor over an in-memory byte slice.
///
/// The fastest [`ByteSource`]: all reads are plain slice copies.
///
/// # Example
///
/// ```
/// use ubjson_buffers::{ByteSource, Reader};
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.read_u8().unwrap(), 0x01);
/// assert_eq!(reader.read_i16().unwrap(), 0x0203);
/// assert_eq!(reader.remaining(), 1);
/// ```
pub struct Reader<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader over the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.x
    }

    /// Whether the cursor has reached the end of the slice.
    pub fn is_empty(&self) -> bool {
        self.x == self.data.len()
    }
}

impl ByteSource for Reader<'_> {
    fn pull(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        let n = buf.len();
        if self.remaining() < n {
            return Err(SourceError::EndOfStream);
        }
        buf.copy_from_slice(&self.data[self.x..self.x + n]);
        self.x += n;
        Ok(())
    }

    fn position(&self) -> usize {
        self.x
    }

    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>, SourceError> {
        if self.remaining() < len {
            return Err(SourceError::EndOfStream);
        }
        let out = self.data[self.x..self.x + len].to_vec();
        self.x += len;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u8() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.read_u8().unwrap(), 0x02);
        assert_eq!(reader.read_u8().unwrap(), 0x03);
        assert!(matches!(reader.read_u8(), Err(SourceError::EndOfStream)));
    }

    #[test]
    fn test_read_i8_negative() {
        let data = [0xfeu8];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_i8().unwrap(), -2i8);
    }

    #[test]
    fn test_read_i16_big_endian() {
        let data = (-1000i16).to_be_bytes();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_i16().unwrap(), -1000);
    }

    #[test]
    fn test_read_i32_big_endian() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_i32().unwrap(), 0x01020304);
    }

    #[test]
    fn test_read_i64_roundtrip() {
        let data = (-9_999_999_999i64).to_be_bytes();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_i64().unwrap(), -9_999_999_999i64);
    }

    #[test]
    fn test_read_f64_roundtrip() {
        let data = std::f64::consts::PI.to_be_bytes();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_f64().unwrap(), std::f64::consts::PI);
    }

    #[test]
    fn test_read_past_end_does_not_advance() {
        let data = [0x01u8];
        let mut reader = Reader::new(&data);
        assert!(matches!(reader.read_i32(), Err(SourceError::EndOfStream)));
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_u8().unwrap(), 0x01);
    }

    #[test]
    fn test_read_vec() {
        let mut reader = Reader::new(b"hello world");
        assert_eq!(reader.read_vec(5).unwrap(), b"hello");
        assert_eq!(reader.position(), 5);
        assert!(matches!(reader.read_vec(100), Err(SourceError::EndOfStream)));
        assert_eq!(reader.remaining(), 6);
    }
}
