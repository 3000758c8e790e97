//! Point lookups and iteration over an encoded map.
//!
//! Lookups are a single linear scan of the header region. Nothing is
//! decoded except the entry that matches.

pub(crate) mod entry;
pub mod iter;

pub use iter::{Entry, Iter};

use std::collections::HashMap;

use crate::codec;
use crate::error::Result;
use crate::map::ByteMapRef;
use crate::types::{Lookup, TypeTag, Value};
use entry::{HeaderScanner, RawEntry};

impl<'a> ByteMapRef<'a> {
    pub(crate) fn entries(&self) -> HeaderScanner<'a> {
        HeaderScanner::new(self.buf)
    }

    fn find(&self, key: &str) -> Result<Option<RawEntry<'a>>> {
        let target = key.as_bytes();
        for entry in self.entries() {
            let entry = entry?;
            if entry.key == target {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }

    /// Look up `key`, telling a key stored without a value apart from a key
    /// that was never stored.
    pub fn lookup(&self, key: &str) -> Result<Lookup<Value>> {
        match self.lookup_bytes_with_tag(key)? {
            Lookup::Found((bytes, tag)) => codec::decode_value(bytes, tag).map(Lookup::Found),
            Lookup::FoundAbsent => Ok(Lookup::FoundAbsent),
            Lookup::NotFound => Ok(Lookup::NotFound),
        }
    }

    /// Like [`lookup`](Self::lookup) but returns the encoded value bytes
    /// without decoding them.
    pub fn lookup_bytes(&self, key: &str) -> Result<Lookup<&'a [u8]>> {
        Ok(self.lookup_bytes_with_tag(key)?.map(|(bytes, _)| bytes))
    }

    fn lookup_bytes_with_tag(&self, key: &str) -> Result<Lookup<(&'a [u8], TypeTag)>> {
        let Some(entry) = self.find(key)? else {
            return Ok(Lookup::NotFound);
        };
        match entry.value_bytes(self.buf)? {
            Some(bytes) => Ok(Lookup::Found((bytes, entry.tag))),
            None => Ok(Lookup::FoundAbsent),
        }
    }

    /// The value for `key`, or `None` if the key is missing or stored
    /// without a value.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.lookup(key)?.into_option())
    }

    /// The encoded bytes for `key` (string values keep their length
    /// prefix), or `None` if the key is missing or stored without a value.
    pub fn get_bytes(&self, key: &str) -> Result<Option<&'a [u8]>> {
        Ok(self.lookup_bytes(key)?.into_option())
    }

    pub fn iter(&self) -> Iter<'a> {
        Iter::new(self.buf)
    }

    /// Call `cb` for every entry in ascending key order until it returns
    /// false.
    ///
    /// `include_value` decodes each value (Nil entries pass `Value::Nil`);
    /// `include_bytes` passes the encoded value bytes (`None` for Nil
    /// entries). Whatever is not requested is passed as `None`.
    pub fn iterate<F>(&self, include_value: bool, include_bytes: bool, mut cb: F) -> Result<()>
    where
        F: FnMut(&str, Option<Value>, Option<&[u8]>) -> bool,
    {
        for entry in self.iter() {
            let entry = entry?;
            let value = if include_value { Some(entry.value()?) } else { None };
            let bytes = if include_bytes { entry.value_bytes() } else { None };
            if !cb(entry.key(), value, bytes) {
                break;
            }
        }
        Ok(())
    }

    pub fn iterate_values<F>(&self, mut cb: F) -> Result<()>
    where
        F: FnMut(&str, Value) -> bool,
    {
        self.iterate(true, false, |key, value, _| cb(key, value.unwrap_or(Value::Nil)))
    }

    pub fn iterate_value_bytes<F>(&self, mut cb: F) -> Result<()>
    where
        F: FnMut(&str, Option<&[u8]>) -> bool,
    {
        self.iterate(false, true, |key, _, bytes| cb(key, bytes))
    }

    /// Decode the whole map. Keys stored without a value map to `Value::Nil`.
    pub fn as_map(&self) -> Result<HashMap<String, Value>> {
        let mut result = HashMap::new();
        self.iterate_values(|key, value| {
            result.insert(key.to_owned(), value);
            true
        })?;
        Ok(result)
    }
}
