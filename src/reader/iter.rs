use crate::codec;
use crate::error::{Error, Result};
use crate::reader::entry::{HeaderScanner, RawEntry};
use crate::types::{TypeTag, Value};

/// One key and its value as stored in a map. Borrows from the map's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    key: &'a str,
    tag: TypeTag,
    bytes: Option<&'a [u8]>,
}

impl<'a> Entry<'a> {
    pub(crate) fn resolve(buf: &'a [u8], raw: RawEntry<'a>) -> Result<Self> {
        let key = std::str::from_utf8(raw.key)
            .map_err(|e| Error::corrupt(format!("key is not UTF-8: {e}")))?;
        Ok(Entry {
            key,
            tag: raw.tag,
            bytes: raw.value_bytes(buf)?,
        })
    }

    pub fn key(&self) -> &'a str {
        self.key
    }

    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// True if the key was stored without a value.
    pub fn is_nil(&self) -> bool {
        self.tag.is_nil()
    }

    /// The encoded value, length prefix included for strings. `None` for Nil.
    pub fn value_bytes(&self) -> Option<&'a [u8]> {
        self.bytes
    }

    /// Decode the value. Nil entries decode to `Value::Nil`.
    pub fn value(&self) -> Result<Value> {
        match self.bytes {
            Some(bytes) => codec::decode_value(bytes, self.tag),
            None => Ok(Value::Nil),
        }
    }
}

/// Iterator over the entries of a map in ascending key order.
///
/// Holds only a position in the buffer; calling `iter()` again starts a
/// fresh scan from the first entry. Stops after the first malformed entry.
pub struct Iter<'a> {
    buf: &'a [u8],
    scanner: HeaderScanner<'a>,
    failed: bool,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Iter {
            buf,
            scanner: HeaderScanner::new(buf),
            failed: false,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Result<Entry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let buf = self.buf;
        let item = self
            .scanner
            .next()
            .map(|raw| raw.and_then(|raw| Entry::resolve(buf, raw)));
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}
