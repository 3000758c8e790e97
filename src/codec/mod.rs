//! Converts scalar values to and from their encoded bytes.
//!
//! Encoding table (all integers little-endian):
//! ```text
//! ┌──────────────────────────────────────┬────────────────────────────┐
//! │ Bool, Byte, Int8                     │ 1 byte                     │
//! │ UInt16, Int16                        │ 2 bytes                    │
//! │ UInt32, Int32, Float32               │ 4 bytes                    │
//! │ UInt64, UInt, Int64, Int, Float64    │ 8 bytes                    │
//! │ Timestamp                            │ 8 bytes, i64 ns since epoch│
//! │ String                               │ len(2B) + UTF-8 bytes      │
//! │ Nil                                  │ 0 bytes                    │
//! └──────────────────────────────────────┴────────────────────────────┘
//! ```

pub mod convert;

pub use convert::{IntoValue, Unsupported};

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::types::{MAX_STRING_LEN, SIZE_STRING_LEN, TypeTag, Value};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Number of bytes `encode_value` writes for this value.
/// Agrees with `encode_value` for every input, including 0 for `Nil`.
pub fn encoded_length(value: &Value) -> usize {
    match value {
        Value::String(s) => SIZE_STRING_LEN + s.len(),
        other => other.tag().fixed_width().unwrap_or(0),
    }
}

/// Check that `value` can be encoded, without writing anything.
///
/// Catches oversized strings and out-of-range timestamps so a builder can
/// reject its input before laying out a buffer.
pub fn validate(value: &Value) -> Result<()> {
    match value {
        Value::String(s) if s.len() > MAX_STRING_LEN => Err(Error::ValueTooLarge { len: s.len() }),
        Value::Timestamp(ts) => ts.timestamp_nanos_opt().map(|_| ()).ok_or(Error::TimestampOutOfRange),
        _ => Ok(()),
    }
}

/// Write `value` at the start of `out` and return its tag and width.
///
/// `out` must have room for `encoded_length(value)` bytes.
pub fn encode_value(out: &mut [u8], value: &Value) -> Result<(TypeTag, usize)> {
    validate(value)?;
    let width = encoded_length(value);
    if out.len() < width {
        return Err(Error::corrupt(format!(
            "output region of {} bytes cannot hold a {width} byte value",
            out.len()
        )));
    }

    match value {
        Value::Nil => {}
        Value::Bool(v) => out[0] = u8::from(*v),
        Value::Byte(v) => out[0] = *v,
        Value::UInt16(v) => out[..2].copy_from_slice(&v.to_le_bytes()),
        Value::UInt32(v) => out[..4].copy_from_slice(&v.to_le_bytes()),
        Value::UInt64(v) => out[..8].copy_from_slice(&v.to_le_bytes()),
        Value::UInt(v) => out[..8].copy_from_slice(&(*v as u64).to_le_bytes()),
        Value::Int8(v) => out[..1].copy_from_slice(&v.to_le_bytes()),
        Value::Int16(v) => out[..2].copy_from_slice(&v.to_le_bytes()),
        Value::Int32(v) => out[..4].copy_from_slice(&v.to_le_bytes()),
        Value::Int64(v) => out[..8].copy_from_slice(&v.to_le_bytes()),
        Value::Int(v) => out[..8].copy_from_slice(&(*v as i64).to_le_bytes()),
        Value::Float32(v) => out[..4].copy_from_slice(&v.to_bits().to_le_bytes()),
        Value::Float64(v) => out[..8].copy_from_slice(&v.to_bits().to_le_bytes()),
        Value::String(s) => {
            // Length already validated against MAX_STRING_LEN.
            out[..SIZE_STRING_LEN].copy_from_slice(&(s.len() as u16).to_le_bytes());
            out[SIZE_STRING_LEN..width].copy_from_slice(s.as_bytes());
        }
        Value::Timestamp(ts) => {
            let nanos = ts.timestamp_nanos_opt().ok_or(Error::TimestampOutOfRange)?;
            out[..8].copy_from_slice(&nanos.to_le_bytes());
        }
    }

    Ok((value.tag(), width))
}

/// Decode the value of kind `tag` starting at `data[0]`.
pub fn decode_value(data: &[u8], tag: TypeTag) -> Result<Value> {
    let value = match tag {
        TypeTag::Nil => Value::Nil,
        TypeTag::Bool => Value::Bool(read_array::<1>(data, 0)?[0] == 1),
        TypeTag::Byte => Value::Byte(read_array::<1>(data, 0)?[0]),
        TypeTag::UInt16 => Value::UInt16(u16::from_le_bytes(read_array(data, 0)?)),
        TypeTag::UInt32 => Value::UInt32(u32::from_le_bytes(read_array(data, 0)?)),
        TypeTag::UInt64 => Value::UInt64(u64::from_le_bytes(read_array(data, 0)?)),
        TypeTag::UInt => {
            let raw = u64::from_le_bytes(read_array(data, 0)?);
            let v = usize::try_from(raw)
                .map_err(|_| Error::corrupt(format!("uint {raw} exceeds platform width")))?;
            Value::UInt(v)
        }
        TypeTag::Int8 => Value::Int8(i8::from_le_bytes(read_array(data, 0)?)),
        TypeTag::Int16 => Value::Int16(i16::from_le_bytes(read_array(data, 0)?)),
        TypeTag::Int32 => Value::Int32(i32::from_le_bytes(read_array(data, 0)?)),
        TypeTag::Int64 => Value::Int64(i64::from_le_bytes(read_array(data, 0)?)),
        TypeTag::Int => {
            let raw = i64::from_le_bytes(read_array(data, 0)?);
            let v = isize::try_from(raw)
                .map_err(|_| Error::corrupt(format!("int {raw} exceeds platform width")))?;
            Value::Int(v)
        }
        TypeTag::Float32 => Value::Float32(f32::from_bits(u32::from_le_bytes(read_array(data, 0)?))),
        TypeTag::Float64 => Value::Float64(f64::from_bits(u64::from_le_bytes(read_array(data, 0)?))),
        TypeTag::String => {
            let bytes = &value_bytes(data, tag)?[SIZE_STRING_LEN..];
            let s = std::str::from_utf8(bytes)
                .map_err(|e| Error::corrupt(format!("string value is not UTF-8: {e}")))?;
            Value::String(s.to_owned())
        }
        TypeTag::Timestamp => {
            let nanos = i64::from_le_bytes(read_array(data, 0)?);
            Value::Timestamp(timestamp_from_nanos(nanos)?)
        }
    };
    Ok(value)
}

/// The exact bytes one value of kind `tag` occupies at the start of `data`.
///
/// For strings this includes the 2-byte length prefix. `Nil` yields an empty
/// slice.
pub fn value_bytes(data: &[u8], tag: TypeTag) -> Result<&[u8]> {
    let len = value_len(data, tag)?;
    data.get(..len).ok_or_else(|| {
        Error::corrupt(format!(
            "{tag:?} value needs {len} bytes, only {} available",
            data.len()
        ))
    })
}

/// Width of the value of kind `tag` starting at `data[0]`; reads the length
/// prefix for strings.
pub fn value_len(data: &[u8], tag: TypeTag) -> Result<usize> {
    match tag.fixed_width() {
        Some(width) => Ok(width),
        None => {
            let len = u16::from_le_bytes(read_array(data, 0)?) as usize;
            Ok(SIZE_STRING_LEN + len)
        }
    }
}

/// Seconds and sub-second nanoseconds by floor division, so instants before
/// the epoch keep a non-negative nanosecond part.
fn timestamp_from_nanos(nanos: i64) -> Result<DateTime<Utc>> {
    let secs = nanos.div_euclid(NANOS_PER_SECOND);
    let sub_nanos = nanos.rem_euclid(NANOS_PER_SECOND) as u32;
    DateTime::from_timestamp(secs, sub_nanos)
        .ok_or_else(|| Error::corrupt(format!("timestamp {nanos}ns out of range")))
}

/// Bounds-checked fixed-size read at `at`.
pub(crate) fn read_array<const N: usize>(data: &[u8], at: usize) -> Result<[u8; N]> {
    at.checked_add(N)
        .and_then(|end| data.get(at..end))
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| {
            Error::corrupt(format!(
                "read of {N} bytes at offset {at} past end of {} byte buffer",
                data.len()
            ))
        })
}
