use proptest::collection::vec;
use proptest::prelude::*;

use ubjson::{decode, encode, UbjValue};

fn leaf() -> impl Strategy<Value = UbjValue> {
    prop_oneof![
        prop_oneof![Just(UbjValue::Null), Just(UbjValue::End)],
        any::<bool>().prop_map(UbjValue::Bool),
        any::<i8>().prop_map(UbjValue::Int8),
        any::<i16>().prop_map(UbjValue::Int16),
        any::<i32>().prop_map(UbjValue::Int32),
        any::<i64>().prop_map(UbjValue::Int64),
        prop_oneof![
            (-1.0e6f32..1.0e6f32).prop_map(UbjValue::Float32),
            (-1.0e12f64..1.0e12f64).prop_map(UbjValue::Float64),
        ],
        "[+-]?[0-9]{1,40}".prop_map(UbjValue::HugeInt),
        "[+-]?[0-9]{1,20}\\.[0-9]{1,20}".prop_map(UbjValue::HugeDecimal),
        "[a-zA-Z0-9 é€]{0,24}".prop_map(UbjValue::Str),
    ]
}

fn tree() -> impl Strategy<Value = UbjValue> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..6).prop_map(UbjValue::Array),
            vec(("[a-z]{0,4}", inner), 0..6).prop_map(UbjValue::Object),
        ]
    })
}

proptest! {
    #[test]
    fn every_tree_roundtrips(value in tree()) {
        let bytes = encode(&value).unwrap();
        let back = decode(&bytes).unwrap();
        prop_assert_eq!(back, value);
    }

    #[test]
    fn every_huge_integer_payload_roundtrips(digits in "[+-]?[0-9]{1,80}") {
        let value = UbjValue::HugeInt(digits);
        let bytes = encode(&value).unwrap();
        prop_assert_eq!(decode(&bytes).unwrap(), value);
    }

    #[test]
    fn decoding_arbitrary_bytes_never_panics(data in vec(any::<u8>(), 0..256)) {
        // Any outcome is fine as long as it is an Ok or an Err, not a
        // panic or a hang.
        let _ = decode(&data);
    }
}
