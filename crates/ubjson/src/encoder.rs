//! `UbjsonEncoder` — serializes a value tree into the wire format.

use ubjson_buffers::Writer;

use crate::error::{EncodeError, WriteError};
use crate::huge::{self, HugeKind};
use crate::markers;
use crate::value::UbjValue;

/// Largest length a full (4-byte signed big-endian) length field can carry.
const FULL_MAX: usize = i32::MAX as usize;

/// Serializes [`UbjValue`] trees.
///
/// Walks the tree depth-first, emitting `(marker, [length], payload)` per
/// node. Marker selection is deterministic: two encoders given equal trees
/// produce identical bytes. The encoder holds no cross-call state beyond
/// its output buffer.
pub struct UbjsonEncoder {
    pub writer: Writer,
}

impl Default for UbjsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl UbjsonEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Serializes a whole value tree and returns its wire bytes.
    pub fn encode(&mut self, value: &UbjValue) -> Result<Vec<u8>, EncodeError> {
        self.writer.reset();
        self.write_value(value)?;
        Ok(self.writer.flush())
    }

    /// Streaming variant of [`encode`](Self::encode): emits the wire bytes
    /// into an [`std::io::Write`] sink. Sink failures pass through
    /// unchanged.
    pub fn encode_into<W: std::io::Write>(
        &mut self,
        value: &UbjValue,
        sink: &mut W,
    ) -> Result<(), WriteError> {
        let bytes = self.encode(value)?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(())
    }

    /// Serializes a `serde_json::Value`, mapping numbers to their narrowest
    /// wire representation.
    pub fn encode_json(&mut self, value: &serde_json::Value) -> Result<Vec<u8>, EncodeError> {
        self.encode(&UbjValue::from(value))
    }

    /// Dispatches one node to its kind-specific writer.
    pub fn write_value(&mut self, value: &UbjValue) -> Result<(), EncodeError> {
        match value {
            UbjValue::Null => {
                self.write_null();
                Ok(())
            }
            UbjValue::Bool(b) => {
                self.write_bool(*b);
                Ok(())
            }
            UbjValue::Int8(v) => {
                self.write_int8(*v);
                Ok(())
            }
            UbjValue::Int16(v) => {
                self.write_int16(*v);
                Ok(())
            }
            UbjValue::Int32(v) => {
                self.write_int32(*v);
                Ok(())
            }
            UbjValue::Int64(v) => {
                self.write_int64(*v);
                Ok(())
            }
            UbjValue::Float32(v) => {
                self.write_float32(*v);
                Ok(())
            }
            UbjValue::Float64(v) => {
                self.write_float64(*v);
                Ok(())
            }
            UbjValue::HugeInt(digits) => self.write_huge_int(digits),
            UbjValue::HugeDecimal(digits) => self.write_huge_decimal(digits),
            UbjValue::Str(s) => self.write_str(s),
            UbjValue::Array(items) => self.write_array(items),
            UbjValue::Object(entries) => self.write_object(entries),
            UbjValue::End => {
                self.write_end();
                Ok(())
            }
        }
    }

    pub fn write_null(&mut self) {
        self.writer.u8(markers::NULL);
    }

    pub fn write_bool(&mut self, b: bool) {
        self.writer.u8(if b { markers::TRUE } else { markers::FALSE });
    }

    pub fn write_end(&mut self) {
        self.writer.u8(markers::END);
    }

    pub fn write_int8(&mut self, v: i8) {
        self.writer.u8(markers::INT8);
        self.writer.i8(v);
    }

    pub fn write_int16(&mut self, v: i16) {
        self.writer.u8(markers::INT16);
        self.writer.i16(v);
    }

    pub fn write_int32(&mut self, v: i32) {
        self.writer.u8(markers::INT32);
        self.writer.i32(v);
    }

    pub fn write_int64(&mut self, v: i64) {
        self.writer.u8(markers::INT64);
        self.writer.i64(v);
    }

    pub fn write_float32(&mut self, v: f32) {
        self.writer.u8(markers::FLOAT32);
        self.writer.f32(v);
    }

    pub fn write_float64(&mut self, v: f64) {
        self.writer.u8(markers::FLOAT64);
        self.writer.f64(v);
    }

    /// Writes a string value: marker, length, UTF-8 bytes, no terminator.
    pub fn write_str(&mut self, s: &str) -> Result<(), EncodeError> {
        let bytes = s.as_bytes();
        self.write_length(markers::str_marker(bytes.len()), bytes.len())?;
        self.writer.buf(bytes);
        Ok(())
    }

    /// Writes an arbitrary-precision integer. The payload must be a plain
    /// signed digit string without a decimal point.
    pub fn write_huge_int(&mut self, digits: &str) -> Result<(), EncodeError> {
        if huge::classify(digits) != Some(HugeKind::Integer) {
            return Err(EncodeError::MalformedNumeric);
        }
        self.write_huge_payload(digits)
    }

    /// Writes an arbitrary-precision decimal. The payload must be a plain
    /// signed digit string with exactly one decimal point.
    pub fn write_huge_decimal(&mut self, digits: &str) -> Result<(), EncodeError> {
        if huge::classify(digits) != Some(HugeKind::Decimal) {
            return Err(EncodeError::MalformedNumeric);
        }
        self.write_huge_payload(digits)
    }

    fn write_huge_payload(&mut self, digits: &str) -> Result<(), EncodeError> {
        self.write_length(markers::huge_marker(digits.len()), digits.len())?;
        self.writer.ascii(digits);
        Ok(())
    }

    /// Writes an array header for a caller that emits the `count` elements
    /// itself.
    pub fn write_array_header(&mut self, count: usize) -> Result<(), EncodeError> {
        self.write_length(markers::array_marker(count), count)
    }

    /// Writes an object header for a caller that emits the `count`
    /// key/value entries itself.
    pub fn write_object_header(&mut self, count: usize) -> Result<(), EncodeError> {
        self.write_length(markers::object_marker(count), count)
    }

    fn write_array(&mut self, items: &[UbjValue]) -> Result<(), EncodeError> {
        self.write_array_header(items.len())?;
        for item in items {
            self.write_value(item)?;
        }
        Ok(())
    }

    fn write_object(&mut self, entries: &[(String, UbjValue)]) -> Result<(), EncodeError> {
        self.write_object_header(entries.len())?;
        for (key, value) in entries {
            // Keys are complete string values: marker + length + bytes.
            self.write_str(key)?;
            self.write_value(value)?;
        }
        Ok(())
    }

    /// Emits a marker followed by its 1-byte (compact) or 4-byte (full)
    /// length field.
    fn write_length(&mut self, marker: u8, len: usize) -> Result<(), EncodeError> {
        if len > FULL_MAX {
            return Err(EncodeError::SizeOverflow(len));
        }
        self.writer.u8(marker);
        let compact = matches!(
            marker,
            markers::STR_COMPACT
                | markers::HUGE_COMPACT
                | markers::ARRAY_COMPACT
                | markers::OBJECT_COMPACT
        );
        if compact {
            self.writer.u8(len as u8);
        } else {
            self.writer.i32(len as i32);
        }
        Ok(())
    }
}
