//! Textual classification of arbitrary-precision payloads.
//!
//! Huge numbers travel on the wire as plain ASCII digit strings, never as a
//! binary bignum. Keeping the text as the in-memory representation is what
//! lets sign, scale and leading zeros survive a round trip untouched.

/// The two shapes a huge-number payload can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HugeKind {
    /// No decimal point: an arbitrary-precision integer.
    Integer,
    /// Exactly one decimal point: an arbitrary-precision decimal.
    Decimal,
}

/// Classifies a huge-number payload, or rejects it.
///
/// A legal payload is an optional leading `+` or `-`, then ASCII digits
/// with at most one `.` anywhere among them; at least one digit must be
/// present. Exponent notation is not part of the wire format.
pub fn classify(payload: &str) -> Option<HugeKind> {
    let rest = match payload.as_bytes().first() {
        Some(b'+') | Some(b'-') => &payload[1..],
        _ => payload,
    };
    let mut dots = 0u32;
    let mut digits = 0u32;
    for byte in rest.bytes() {
        match byte {
            b'0'..=b'9' => digits += 1,
            b'.' => {
                dots += 1;
                if dots > 1 {
                    return None;
                }
            }
            _ => return None,
        }
    }
    if digits == 0 {
        return None;
    }
    Some(if dots == 1 {
        HugeKind::Decimal
    } else {
        HugeKind::Integer
    })
}
