use thiserror::Error;

/// Unified error type for encoding, reading and projecting byte maps.
///
/// A missing key is never an error: lookups report it through
/// [`Lookup::NotFound`](crate::types::Lookup) or `Ok(None)`.
#[derive(Debug, Error)]
pub enum Error {
    /// The buffer is truncated or malformed (offset past the end, unknown
    /// type tag, invalid UTF-8, ...).
    #[error("Corrupt encoding: {0}")]
    CorruptEncoding(String),

    /// A string value longer than the 2-byte length prefix can describe.
    #[error("Value too large: {len} bytes exceeds the 65535 byte limit")]
    ValueTooLarge { len: usize },

    /// A key longer than the 2-byte key length prefix can describe.
    #[error("Key too large: {len} bytes exceeds the 65535 byte limit")]
    KeyTooLarge { len: usize },

    /// A value outside the supported scalar set, reported in strict mode.
    #[error("Unsupported value type: {type_name}")]
    UnsupportedType { type_name: &'static str },

    /// A timestamp that cannot be expressed as i64 nanoseconds since the epoch.
    #[error("Timestamp out of range for nanosecond encoding")]
    TimestampOutOfRange,

    /// The same key was supplied twice to a builder.
    #[error("Duplicate key: {0:?}")]
    DuplicateKey(String),

    /// A sorted entry point received keys out of ascending order.
    #[error("Keys not sorted: {key:?} follows {previous:?}")]
    Unsorted { previous: String, key: String },

    /// Parallel key and value slices of different lengths.
    #[error("Length mismatch: {keys} keys but {values} values")]
    LengthMismatch { keys: usize, values: usize },

    /// The encoded map would not be addressable with 4-byte value offsets.
    #[error("Buffer too large: {len} bytes exceeds u32 offsets")]
    BufferTooLarge { len: usize },
}

impl Error {
    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        Error::CorruptEncoding(msg.into())
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
