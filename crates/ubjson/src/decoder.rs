//! `UbjsonDecoder` — recursive-descent parser over a byte source.

use ubjson_buffers::{ByteSource, IoSource, Reader};

use crate::error::UbjsonError;
use crate::huge::{self, HugeKind};
use crate::markers::{self, Marker};
use crate::value::UbjValue;

/// Default container nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Elements are declared by the wire, so preallocation is capped rather
/// than trusting a hostile count.
const PREALLOC_CAP: usize = 1024;

/// Pull-style decoder.
///
/// Reads one marker at a time and recurses into containers, consuming
/// exactly the bytes of one value per call — no whole-document lookahead,
/// no buffering. Failures are terminal: a failed decode yields no value and
/// leaves the source at an unspecified position.
pub struct UbjsonDecoder {
    max_depth: usize,
}

impl Default for UbjsonDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl UbjsonDecoder {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Caps how deep containers may nest before decoding fails with
    /// [`UbjsonError::NestingTooDeep`] instead of exhausting the call
    /// stack.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Decodes a single value tree from an in-memory byte slice.
    pub fn decode(&self, data: &[u8]) -> Result<UbjValue, UbjsonError> {
        let mut source = Reader::new(data);
        self.read_value(&mut source, 0)
    }

    /// Decodes a single value tree from any [`ByteSource`], consuming
    /// exactly the bytes of that value. Subsequent values on the same
    /// source can be decoded by calling this again.
    pub fn decode_source<S: ByteSource>(&self, source: &mut S) -> Result<UbjValue, UbjsonError> {
        self.read_value(source, 0)
    }

    /// Decodes a single value tree from an [`std::io::Read`] stream.
    pub fn decode_from<R: std::io::Read>(&self, source: &mut R) -> Result<UbjValue, UbjsonError> {
        let mut source = IoSource::new(source);
        self.read_value(&mut source, 0)
    }

    /// Reads the next marker byte and resolves it against the marker
    /// table.
    fn next_marker<S: ByteSource>(&self, source: &mut S) -> Result<Marker, UbjsonError> {
        let offset = source.position();
        let byte = source.read_u8()?;
        Marker::from_byte(byte).ok_or(UbjsonError::UnknownMarker(byte, offset))
    }

    /// Reads one complete value, recursing into containers.
    fn read_value<S: ByteSource>(
        &self,
        source: &mut S,
        depth: usize,
    ) -> Result<UbjValue, UbjsonError> {
        match self.next_marker(source)? {
            Marker::Null => Ok(UbjValue::Null),
            Marker::True => Ok(UbjValue::Bool(true)),
            Marker::False => Ok(UbjValue::Bool(false)),
            Marker::End => Ok(UbjValue::End),
            Marker::Int8 => Ok(UbjValue::Int8(source.read_i8()?)),
            Marker::Int16 => Ok(UbjValue::Int16(source.read_i16()?)),
            Marker::Int32 => Ok(UbjValue::Int32(source.read_i32()?)),
            Marker::Int64 => Ok(UbjValue::Int64(source.read_i64()?)),
            Marker::Float32 => Ok(UbjValue::Float32(source.read_f32()?)),
            Marker::Float64 => Ok(UbjValue::Float64(source.read_f64()?)),
            Marker::Huge { compact } => self.read_huge(source, compact),
            Marker::Str { compact } => Ok(UbjValue::Str(self.read_text(source, compact)?)),
            Marker::Array { compact } => self.read_array(source, compact, depth),
            Marker::Object { compact } => self.read_object(source, compact, depth),
        }
    }

    /// Reads a compact (1-byte) or full (4-byte big-endian) length field.
    fn read_length<S: ByteSource>(
        &self,
        source: &mut S,
        compact: bool,
    ) -> Result<usize, UbjsonError> {
        if compact {
            Ok(source.read_u8()? as usize)
        } else {
            let len = source.read_i32()?;
            if len < 0 {
                return Err(UbjsonError::InvalidLength(len));
            }
            Ok(len as usize)
        }
    }

    /// Reads a container count. The compact count 255 declares an
    /// unbounded container terminated by an `E` marker; that wire form is
    /// rejected up front rather than mis-decoded.
    fn read_container_length<S: ByteSource>(
        &self,
        source: &mut S,
        compact: bool,
    ) -> Result<usize, UbjsonError> {
        let count = self.read_length(source, compact)?;
        if compact && count == markers::UNBOUNDED as usize {
            return Err(UbjsonError::UnsupportedUnboundedContainer);
        }
        Ok(count)
    }

    fn read_text<S: ByteSource>(
        &self,
        source: &mut S,
        compact: bool,
    ) -> Result<String, UbjsonError> {
        let len = self.read_length(source, compact)?;
        let bytes = source.read_vec(len)?;
        String::from_utf8(bytes).map_err(|_| UbjsonError::InvalidUtf8)
    }

    fn read_huge<S: ByteSource>(
        &self,
        source: &mut S,
        compact: bool,
    ) -> Result<UbjValue, UbjsonError> {
        let len = self.read_length(source, compact)?;
        let bytes = source.read_vec(len)?;
        let text = String::from_utf8(bytes).map_err(|_| UbjsonError::MalformedNumeric)?;
        match huge::classify(&text) {
            Some(HugeKind::Integer) => Ok(UbjValue::HugeInt(text)),
            Some(HugeKind::Decimal) => Ok(UbjValue::HugeDecimal(text)),
            None => Err(UbjsonError::MalformedNumeric),
        }
    }

    fn read_array<S: ByteSource>(
        &self,
        source: &mut S,
        compact: bool,
        depth: usize,
    ) -> Result<UbjValue, UbjsonError> {
        if depth >= self.max_depth {
            return Err(UbjsonError::NestingTooDeep(self.max_depth));
        }
        let declared = self.read_container_length(source, compact)?;
        let mut items = Vec::with_capacity(declared.min(PREALLOC_CAP));
        for read in 0..declared {
            match self.read_value(source, depth + 1) {
                Ok(item) => items.push(item),
                Err(UbjsonError::UnexpectedEndOfStream) => {
                    return Err(UbjsonError::TruncatedContainer { declared, read });
                }
                Err(err) => return Err(err),
            }
        }
        Ok(UbjValue::Array(items))
    }

    fn read_object<S: ByteSource>(
        &self,
        source: &mut S,
        compact: bool,
        depth: usize,
    ) -> Result<UbjValue, UbjsonError> {
        if depth >= self.max_depth {
            return Err(UbjsonError::NestingTooDeep(self.max_depth));
        }
        let declared = self.read_container_length(source, compact)?;
        let mut entries = Vec::with_capacity(declared.min(PREALLOC_CAP));
        for read in 0..declared {
            let key = match self.read_key(source) {
                Ok(key) => key,
                Err(UbjsonError::UnexpectedEndOfStream) => {
                    return Err(UbjsonError::TruncatedContainer { declared, read });
                }
                Err(err) => return Err(err),
            };
            let value = match self.read_value(source, depth + 1) {
                Ok(value) => value,
                Err(UbjsonError::UnexpectedEndOfStream) => {
                    return Err(UbjsonError::TruncatedContainer { declared, read });
                }
                Err(err) => return Err(err),
            };
            entries.push((key, value));
        }
        Ok(UbjValue::Object(entries))
    }

    /// Object keys are complete string values; any other assigned marker in
    /// key position is a format error.
    fn read_key<S: ByteSource>(&self, source: &mut S) -> Result<String, UbjsonError> {
        let offset = source.position();
        let byte = source.read_u8()?;
        match Marker::from_byte(byte) {
            Some(Marker::Str { compact }) => self.read_text(source, compact),
            Some(_) => Err(UbjsonError::InvalidObjectKey(byte)),
            None => Err(UbjsonError::UnknownMarker(byte, offset)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(data: &[u8]) -> Result<UbjValue, UbjsonError> {
        UbjsonDecoder::new().decode(data)
    }

    #[test]
    fn decodes_scalars() {
        assert_eq!(decode(b"Z").unwrap(), UbjValue::Null);
        assert_eq!(decode(b"T").unwrap(), UbjValue::Bool(true));
        assert_eq!(decode(b"F").unwrap(), UbjValue::Bool(false));
        assert_eq!(decode(b"E").unwrap(), UbjValue::End);
        assert_eq!(decode(&[b'B', 0xfe]).unwrap(), UbjValue::Int8(-2));
        assert_eq!(decode(&[b'i', 0xfc, 0x18]).unwrap(), UbjValue::Int16(-1000));
        assert_eq!(
            decode(&[b'I', 0x00, 0x01, 0x86, 0xa0]).unwrap(),
            UbjValue::Int32(100_000)
        );
    }

    #[test]
    fn unknown_marker_reports_byte_and_offset() {
        match decode(&[0x00]) {
            Err(UbjsonError::UnknownMarker(0x00, 0)) => {}
            other => panic!("expected UnknownMarker, got {other:?}"),
        }
        // Offset of the bad marker inside a container, not of the root.
        match decode(&[b'a', 2, b'Z', b'X']) {
            Err(UbjsonError::UnknownMarker(b'X', 3)) => {}
            other => panic!("expected UnknownMarker at 3, got {other:?}"),
        }
    }

    #[test]
    fn truncated_scalar_is_end_of_stream() {
        assert!(matches!(
            decode(&[b'I', 0x00, 0x01]),
            Err(UbjsonError::UnexpectedEndOfStream)
        ));
    }

    #[test]
    fn truncated_container_reports_declared_and_read() {
        // Array declares 5 elements, stream carries 3.
        let data = [b'a', 5, b'Z', b'T', b'F'];
        match decode(&data) {
            Err(UbjsonError::TruncatedContainer { declared: 5, read: 3 }) => {}
            other => panic!("expected TruncatedContainer, got {other:?}"),
        }
    }

    #[test]
    fn unbounded_containers_are_rejected() {
        assert!(matches!(
            decode(&[b'a', 0xff]),
            Err(UbjsonError::UnsupportedUnboundedContainer)
        ));
        assert!(matches!(
            decode(&[b'o', 0xff]),
            Err(UbjsonError::UnsupportedUnboundedContainer)
        ));
        // A full-marker container may legitimately declare 255 elements.
        let mut data = vec![b'A'];
        data.extend_from_slice(&255i32.to_be_bytes());
        data.extend(std::iter::repeat(b'Z').take(255));
        let decoded = decode(&data).unwrap();
        assert_eq!(decoded.as_array().unwrap().len(), 255);
    }

    #[test]
    fn negative_full_length_is_invalid() {
        let mut data = vec![b'S'];
        data.extend_from_slice(&(-1i32).to_be_bytes());
        assert!(matches!(
            decode(&data),
            Err(UbjsonError::InvalidLength(-1))
        ));
    }

    #[test]
    fn object_keys_must_be_strings() {
        let data = [b'o', 1, b'B', 1, b'Z'];
        assert!(matches!(
            decode(&data),
            Err(UbjsonError::InvalidObjectKey(b'B'))
        ));
    }

    #[test]
    fn huge_payloads_route_by_decimal_point() {
        let data = [b'h', 3, b'1', b'2', b'3'];
        assert_eq!(
            decode(&data).unwrap(),
            UbjValue::HugeInt("123".to_owned())
        );
        let data = [b'h', 4, b'1', b'.', b'2', b'5'];
        assert_eq!(
            decode(&data).unwrap(),
            UbjValue::HugeDecimal("1.25".to_owned())
        );
    }

    #[test]
    fn malformed_huge_payloads_are_rejected() {
        let data = [b'h', 3, b'1', b'x', b'3'];
        assert!(matches!(decode(&data), Err(UbjsonError::MalformedNumeric)));
        let data = [b'h', 5, b'1', b'.', b'2', b'.', b'3'];
        assert!(matches!(decode(&data), Err(UbjsonError::MalformedNumeric)));
    }

    #[test]
    fn invalid_utf8_in_string_payload() {
        let data = [b's', 2, 0xff, 0xfe];
        assert!(matches!(decode(&data), Err(UbjsonError::InvalidUtf8)));
    }

    #[test]
    fn nesting_guard_trips_before_the_stack_does() {
        // 70 nested single-element arrays against the default limit of 64.
        let mut data = Vec::new();
        for _ in 0..70 {
            data.extend_from_slice(&[b'a', 1]);
        }
        data.push(b'Z');
        assert!(matches!(
            decode(&data),
            Err(UbjsonError::NestingTooDeep(DEFAULT_MAX_DEPTH))
        ));

        // A shallow tree passes under a tight custom limit.
        let decoder = UbjsonDecoder::with_max_depth(2);
        let ok = [b'a', 1, b'a', 1, b'Z'];
        assert!(decoder.decode(&ok).is_ok());
        let too_deep = [b'a', 1, b'a', 1, b'a', 1, b'Z'];
        assert!(matches!(
            decoder.decode(&too_deep),
            Err(UbjsonError::NestingTooDeep(2))
        ));
    }

    #[test]
    fn decode_source_consumes_exactly_one_value() {
        use ubjson_buffers::Reader;
        let data = [b'B', 1, b'T', b'Z'];
        let decoder = UbjsonDecoder::new();
        let mut source = Reader::new(&data);
        assert_eq!(
            decoder.decode_source(&mut source).unwrap(),
            UbjValue::Int8(1)
        );
        assert_eq!(
            decoder.decode_source(&mut source).unwrap(),
            UbjValue::Bool(true)
        );
        assert_eq!(decoder.decode_source(&mut source).unwrap(), UbjValue::Null);
        assert!(source.is_empty());
    }
}
