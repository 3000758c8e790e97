use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// Width of the little-endian key length prefix of every entry.
pub const SIZE_KEY_LEN: usize = 2;
/// Width of the type tag that follows each key.
pub const SIZE_VALUE_TYPE: usize = 1;
/// Width of the absolute value offset stored for non-Nil entries.
pub const SIZE_VALUE_OFFSET: usize = 4;
/// Width of the length prefix in front of string values.
pub const SIZE_STRING_LEN: usize = 2;

/// Longest key the 2-byte key length prefix can describe.
pub const MAX_KEY_LEN: usize = u16::MAX as usize;
/// Longest string value the 2-byte length prefix can describe.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// One-byte discriminator stored in every entry.
///
/// The numbering is a format constant. `Nil` entries carry no value offset
/// and occupy no bytes in the value region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeTag {
    Nil = 0,
    Bool = 1,
    Byte = 2,
    UInt16 = 3,
    UInt32 = 4,
    UInt64 = 5,
    Int8 = 6,
    Int16 = 7,
    Int32 = 8,
    Int64 = 9,
    Int = 10,
    Float32 = 11,
    Float64 = 12,
    String = 13,
    Timestamp = 14,
    UInt = 15,
}

impl TypeTag {
    pub fn from_u8(byte: u8) -> Result<Self> {
        let tag = match byte {
            0 => TypeTag::Nil,
            1 => TypeTag::Bool,
            2 => TypeTag::Byte,
            3 => TypeTag::UInt16,
            4 => TypeTag::UInt32,
            5 => TypeTag::UInt64,
            6 => TypeTag::Int8,
            7 => TypeTag::Int16,
            8 => TypeTag::Int32,
            9 => TypeTag::Int64,
            10 => TypeTag::Int,
            11 => TypeTag::Float32,
            12 => TypeTag::Float64,
            13 => TypeTag::String,
            14 => TypeTag::Timestamp,
            15 => TypeTag::UInt,
            _ => return Err(Error::corrupt(format!("invalid type tag: {byte}"))),
        };
        Ok(tag)
    }

    /// Encoded width for fixed-width kinds. `None` for strings, whose width
    /// lives in their length prefix. `Nil` is zero bytes wide.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            TypeTag::Nil => Some(0),
            TypeTag::Bool | TypeTag::Byte | TypeTag::Int8 => Some(1),
            TypeTag::UInt16 | TypeTag::Int16 => Some(2),
            TypeTag::UInt32 | TypeTag::Int32 | TypeTag::Float32 => Some(4),
            TypeTag::UInt64
            | TypeTag::UInt
            | TypeTag::Int64
            | TypeTag::Int
            | TypeTag::Float64
            | TypeTag::Timestamp => Some(8),
            TypeTag::String => None,
        }
    }

    pub fn is_nil(self) -> bool {
        self == TypeTag::Nil
    }
}

/// A decoded scalar value.
///
/// `UInt` and `Int` are platform-width integers; they are always encoded in
/// 8 bytes. Timestamps are UTC instants with nanosecond precision.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Byte(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    UInt(usize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Int(isize),
    Float32(f32),
    Float64(f64),
    String(String),
    Timestamp(DateTime<Utc>),
}

impl Value {
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Nil => TypeTag::Nil,
            Value::Bool(_) => TypeTag::Bool,
            Value::Byte(_) => TypeTag::Byte,
            Value::UInt16(_) => TypeTag::UInt16,
            Value::UInt32(_) => TypeTag::UInt32,
            Value::UInt64(_) => TypeTag::UInt64,
            Value::UInt(_) => TypeTag::UInt,
            Value::Int8(_) => TypeTag::Int8,
            Value::Int16(_) => TypeTag::Int16,
            Value::Int32(_) => TypeTag::Int32,
            Value::Int64(_) => TypeTag::Int64,
            Value::Int(_) => TypeTag::Int,
            Value::Float32(_) => TypeTag::Float32,
            Value::Float64(_) => TypeTag::Float64,
            Value::String(_) => TypeTag::String,
            Value::Timestamp(_) => TypeTag::Timestamp,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

/// Outcome of a point lookup.
///
/// Distinguishes a key stored without a value (`FoundAbsent`) from a key
/// that was never stored (`NotFound`).
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    FoundAbsent,
    NotFound,
}

impl<T> Lookup<T> {
    /// Collapse `FoundAbsent` and `NotFound` into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::FoundAbsent | Lookup::NotFound => None,
        }
    }

    /// True if the key is present, with or without a value.
    pub fn is_present(&self) -> bool {
        !matches!(self, Lookup::NotFound)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(v) => Lookup::Found(f(v)),
            Lookup::FoundAbsent => Lookup::FoundAbsent,
            Lookup::NotFound => Lookup::NotFound,
        }
    }
}
