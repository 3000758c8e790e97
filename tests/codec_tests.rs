// Value codec tests
// Fixed-width table, string prefixes, timestamps and failure modes.

use bytemap::codec::{decode_value, encode_value, encoded_length, value_bytes};
use bytemap::{Error, TypeTag, Value};
use chrono::{DateTime, Utc};

fn samples() -> Vec<Value> {
    vec![
        Value::Nil,
        Value::Bool(true),
        Value::Bool(false),
        Value::Byte(u8::MAX),
        Value::UInt16(u16::MAX),
        Value::UInt32(u32::MAX),
        Value::UInt64(u64::MAX),
        Value::UInt(usize::MAX),
        Value::Int8(i8::MIN),
        Value::Int16(i16::MAX),
        Value::Int32(i32::MIN),
        Value::Int64(i64::MAX),
        Value::Int(isize::MIN),
        Value::Float32(f32::MAX),
        Value::Float64(-f64::MAX),
        Value::String(String::new()),
        Value::String("Hello World".into()),
        Value::String("héllo".into()),
        Value::Timestamp(DateTime::from_timestamp(1_391_619_963, 9).unwrap()),
    ]
}

// =============================================================================
// Test 1: encoded_length agrees with encode_value for every kind
// =============================================================================
#[test]
fn encoded_length_matches_encode() {
    for value in samples() {
        let mut buf = vec![0u8; 64];
        let (tag, written) = encode_value(&mut buf, &value).unwrap();
        assert_eq!(written, encoded_length(&value), "{value:?}");
        assert_eq!(tag, value.tag());
    }
}

// =============================================================================
// Test 2: decode is the inverse of encode
// =============================================================================
#[test]
fn decode_inverts_encode() {
    for value in samples() {
        let mut buf = vec![0u8; encoded_length(&value)];
        let (tag, _) = encode_value(&mut buf, &value).unwrap();
        assert_eq!(decode_value(&buf, tag).unwrap(), value);
    }
}

// =============================================================================
// Test 3: fixed-width table
// =============================================================================
#[test]
fn fixed_widths() {
    assert_eq!(encoded_length(&Value::Bool(true)), 1);
    assert_eq!(encoded_length(&Value::Byte(1)), 1);
    assert_eq!(encoded_length(&Value::Int8(1)), 1);
    assert_eq!(encoded_length(&Value::UInt16(1)), 2);
    assert_eq!(encoded_length(&Value::Int16(1)), 2);
    assert_eq!(encoded_length(&Value::UInt32(1)), 4);
    assert_eq!(encoded_length(&Value::Int32(1)), 4);
    assert_eq!(encoded_length(&Value::Float32(1.0)), 4);
    assert_eq!(encoded_length(&Value::UInt64(1)), 8);
    assert_eq!(encoded_length(&Value::UInt(1)), 8);
    assert_eq!(encoded_length(&Value::Int64(1)), 8);
    assert_eq!(encoded_length(&Value::Int(1)), 8);
    assert_eq!(encoded_length(&Value::Float64(1.0)), 8);
    assert_eq!(encoded_length(&Value::Timestamp(DateTime::<Utc>::UNIX_EPOCH)), 8);
    assert_eq!(encoded_length(&Value::Nil), 0);
}

// =============================================================================
// Test 4: string length prefix counts bytes, not characters
// =============================================================================
#[test]
fn string_prefix_counts_bytes() {
    let value = Value::String("héllo".into());
    let mut buf = vec![0u8; encoded_length(&value)];
    encode_value(&mut buf, &value).unwrap();
    assert_eq!(&buf[..2], &6u16.to_le_bytes());
    assert_eq!(buf.len(), 8);
}

// =============================================================================
// Test 5: value_bytes returns exactly one value, prefix included
// =============================================================================
#[test]
fn value_bytes_slices_one_value() {
    let data = [2, 0, b'h', b'i', 0xAA, 0xBB];
    assert_eq!(value_bytes(&data, TypeTag::String).unwrap(), &[2, 0, b'h', b'i']);
    assert_eq!(value_bytes(&data, TypeTag::UInt16).unwrap(), &[2, 0]);
    assert_eq!(value_bytes(&data, TypeTag::Nil).unwrap(), &[] as &[u8]);
}

// =============================================================================
// Test 6: strings past 65535 bytes are rejected, the limit itself is not
// =============================================================================
#[test]
fn string_length_limit() {
    let at_limit = Value::String("x".repeat(65_535));
    let mut buf = vec![0u8; encoded_length(&at_limit)];
    assert!(encode_value(&mut buf, &at_limit).is_ok());
    assert_eq!(&buf[..2], &[0xFF, 0xFF]);

    let too_long = Value::String("x".repeat(65_536));
    let mut buf = vec![0u8; encoded_length(&too_long)];
    let err = encode_value(&mut buf, &too_long).unwrap_err();
    assert!(matches!(err, Error::ValueTooLarge { len: 65_536 }));
    assert!(buf.iter().all(|b| *b == 0), "nothing written on failure");
}

// =============================================================================
// Test 7: timestamps are nanoseconds since the epoch
// =============================================================================
#[test]
fn timestamp_is_epoch_nanos() {
    let ts: DateTime<Utc> = DateTime::from_timestamp(1, 5).unwrap();
    let mut buf = [0u8; 8];
    encode_value(&mut buf, &Value::Timestamp(ts)).unwrap();
    assert_eq!(i64::from_le_bytes(buf), 1_000_000_005);
}

#[test]
fn timestamp_out_of_range_rejected() {
    let far = Value::Timestamp(DateTime::<Utc>::MAX_UTC);
    let mut buf = [0u8; 8];
    assert!(matches!(
        encode_value(&mut buf, &far),
        Err(Error::TimestampOutOfRange)
    ));
}

// =============================================================================
// Test 8: short or malformed input fails with CorruptEncoding
// =============================================================================
#[test]
fn short_input_is_corrupt() {
    assert!(matches!(
        decode_value(&[1, 2, 3], TypeTag::UInt64),
        Err(Error::CorruptEncoding(_))
    ));
    assert!(matches!(
        decode_value(&[5, 0, b'a'], TypeTag::String),
        Err(Error::CorruptEncoding(_))
    ));
    assert!(matches!(
        value_bytes(&[1], TypeTag::String),
        Err(Error::CorruptEncoding(_))
    ));
}

#[test]
fn invalid_utf8_string_is_corrupt() {
    assert!(matches!(
        decode_value(&[2, 0, 0xFF, 0xFE], TypeTag::String),
        Err(Error::CorruptEncoding(_))
    ));
}

#[test]
fn undersized_output_region_rejected() {
    let mut buf = [0u8; 3];
    assert!(encode_value(&mut buf, &Value::UInt32(1)).is_err());
}
