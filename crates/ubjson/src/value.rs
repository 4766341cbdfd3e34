//! [`UbjValue`] — the tagged value tree produced by decoding and consumed
//! by encoding.

use crate::huge::{self, HugeKind};

/// One node of a Universal Binary JSON document.
///
/// A single closed union over every kind the wire format can carry. A
/// container owns its children outright; dropping the root drops the whole
/// tree.
///
/// Huge numbers hold their exact ASCII payload, so `HugeInt("007")` and
/// `HugeInt("7")` are distinct values and both round-trip byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub enum UbjValue {
    /// null
    Null,
    /// true / false
    Bool(bool),
    /// 8-bit signed integer
    Int8(i8),
    /// 16-bit signed integer
    Int16(i16),
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),
    /// 32-bit IEEE float
    Float32(f32),
    /// 64-bit IEEE float
    Float64(f64),
    /// Arbitrary-precision integer, kept as its signed digit text.
    HugeInt(String),
    /// Arbitrary-precision decimal, kept as its signed digit text with one
    /// decimal point.
    HugeDecimal(String),
    /// UTF-8 string
    Str(String),
    /// Ordered sequence of values.
    Array(Vec<UbjValue>),
    /// Ordered key/value entries. The format does not require unique keys,
    /// so duplicates are kept in their original positions.
    Object(Vec<(String, UbjValue)>),
    /// The container-end marker, when it appears where a value is expected.
    End,
}

impl UbjValue {
    /// The smallest fixed-width integer variant that holds `int`.
    pub fn int(int: i64) -> UbjValue {
        if let Ok(v) = i8::try_from(int) {
            UbjValue::Int8(v)
        } else if let Ok(v) = i16::try_from(int) {
            UbjValue::Int16(v)
        } else if let Ok(v) = i32::try_from(int) {
            UbjValue::Int32(v)
        } else {
            UbjValue::Int64(int)
        }
    }

    /// Validating constructor for [`UbjValue::HugeInt`]. Returns `None`
    /// unless `digits` is a plain signed digit string without a decimal
    /// point.
    pub fn huge_int(digits: impl Into<String>) -> Option<UbjValue> {
        let digits = digits.into();
        match huge::classify(&digits) {
            Some(HugeKind::Integer) => Some(UbjValue::HugeInt(digits)),
            _ => None,
        }
    }

    /// Validating constructor for [`UbjValue::HugeDecimal`]. Returns `None`
    /// unless `digits` is a plain signed digit string with exactly one
    /// decimal point.
    pub fn huge_decimal(digits: impl Into<String>) -> Option<UbjValue> {
        let digits = digits.into();
        match huge::classify(&digits) {
            Some(HugeKind::Decimal) => Some(UbjValue::HugeDecimal(digits)),
            _ => None,
        }
    }

    /// Whether this value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, UbjValue::Null)
    }

    /// Borrows the boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            UbjValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrows the text, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            UbjValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrows the elements, if this is an `Array`.
    pub fn as_array(&self) -> Option<&[UbjValue]> {
        match self {
            UbjValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrows the entries, if this is an `Object`.
    pub fn as_object(&self) -> Option<&[(String, UbjValue)]> {
        match self {
            UbjValue::Object(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<bool> for UbjValue {
    fn from(b: bool) -> Self {
        UbjValue::Bool(b)
    }
}

impl From<i8> for UbjValue {
    fn from(v: i8) -> Self {
        UbjValue::Int8(v)
    }
}

impl From<i16> for UbjValue {
    fn from(v: i16) -> Self {
        UbjValue::Int16(v)
    }
}

impl From<i32> for UbjValue {
    fn from(v: i32) -> Self {
        UbjValue::Int32(v)
    }
}

impl From<i64> for UbjValue {
    fn from(v: i64) -> Self {
        UbjValue::Int64(v)
    }
}

impl From<f32> for UbjValue {
    fn from(v: f32) -> Self {
        UbjValue::Float32(v)
    }
}

impl From<f64> for UbjValue {
    fn from(v: f64) -> Self {
        UbjValue::Float64(v)
    }
}

impl From<&str> for UbjValue {
    fn from(s: &str) -> Self {
        UbjValue::Str(s.to_owned())
    }
}

impl From<String> for UbjValue {
    fn from(s: String) -> Self {
        UbjValue::Str(s)
    }
}

impl From<Vec<UbjValue>> for UbjValue {
    fn from(items: Vec<UbjValue>) -> Self {
        UbjValue::Array(items)
    }
}

impl From<serde_json::Value> for UbjValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => UbjValue::Null,
            serde_json::Value::Bool(b) => UbjValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    UbjValue::int(i)
                } else if let Some(u) = n.as_u64() {
                    // Beyond i64 range: carried as an arbitrary-precision
                    // integer.
                    UbjValue::HugeInt(u.to_string())
                } else {
                    UbjValue::Float64(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => UbjValue::Str(s),
            serde_json::Value::Array(arr) => {
                UbjValue::Array(arr.into_iter().map(UbjValue::from).collect())
            }
            serde_json::Value::Object(obj) => UbjValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, UbjValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&serde_json::Value> for UbjValue {
    fn from(v: &serde_json::Value) -> Self {
        UbjValue::from(v.clone())
    }
}

impl From<UbjValue> for serde_json::Value {
    /// Lossy where JSON is narrower: huge numbers become strings so no
    /// digits are dropped, `End` becomes null, and duplicate object keys
    /// collapse to the last occurrence.
    fn from(v: UbjValue) -> Self {
        match v {
            UbjValue::Null | UbjValue::End => serde_json::Value::Null,
            UbjValue::Bool(b) => serde_json::Value::Bool(b),
            UbjValue::Int8(i) => serde_json::json!(i),
            UbjValue::Int16(i) => serde_json::json!(i),
            UbjValue::Int32(i) => serde_json::json!(i),
            UbjValue::Int64(i) => serde_json::json!(i),
            UbjValue::Float32(f) => serde_json::json!(f),
            UbjValue::Float64(f) => serde_json::json!(f),
            UbjValue::HugeInt(s) | UbjValue::HugeDecimal(s) => serde_json::Value::String(s),
            UbjValue::Str(s) => serde_json::Value::String(s),
            UbjValue::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            UbjValue::Object(entries) => serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}
