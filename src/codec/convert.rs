use chrono::{DateTime, Utc};

use crate::types::Value;

/// Marker for an input whose type has no encoding in a byte map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unsupported {
    pub type_name: &'static str,
}

impl Unsupported {
    fn of<T: ?Sized>() -> Self {
        Unsupported {
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// Conversion from builder input to a [`Value`].
///
/// Every supported scalar converts infallibly. Types outside the scalar set
/// report [`Unsupported`]; the builder then either stores the key as Nil or
/// fails, depending on `Options::strict_types`.
pub trait IntoValue {
    fn into_value(self) -> Result<Value, Unsupported>;
}

macro_rules! scalar_values {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl IntoValue for $ty {
                fn into_value(self) -> Result<Value, Unsupported> {
                    Ok(Value::$variant(self))
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

scalar_values! {
    bool => Bool,
    u8 => Byte,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    usize => UInt,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    isize => Int,
    f32 => Float32,
    f64 => Float64,
    String => String,
    DateTime<Utc> => Timestamp,
}

macro_rules! unsupported_values {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoValue for $ty {
                fn into_value(self) -> Result<Value, Unsupported> {
                    Err(Unsupported::of::<$ty>())
                }
            }
        )*
    };
}

// Collections have no encoding; they are the common case of an unsupported
// value arriving from a loosely typed source.
unsupported_values!(Vec<u8>, &[u8], Vec<f64>, &[f64], Vec<String>);

impl IntoValue for &str {
    fn into_value(self) -> Result<Value, Unsupported> {
        Ok(Value::String(self.to_owned()))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Result<Value, Unsupported> {
        Ok(self)
    }
}

impl IntoValue for () {
    fn into_value(self) -> Result<Value, Unsupported> {
        Ok(Value::Nil)
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Result<Value, Unsupported> {
        match self {
            Some(v) => v.into_value(),
            None => Ok(Value::Nil),
        }
    }
}
