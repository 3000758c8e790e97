use std::collections::HashMap;

use crate::error::Result;
use crate::reader::Iter;
use crate::types::{Lookup, Value};

/// An immutable string-keyed map encoded in a single owned byte buffer.
///
/// Produced by a [`Builder`](crate::Builder) or by projecting another map.
/// Reads and projections operate on the encoded bytes directly, without
/// decoding the whole map. The buffer is never mutated after construction,
/// so a `ByteMap` can be shared freely between threads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteMap {
    buf: Vec<u8>,
}

impl ByteMap {
    /// Wrap bytes produced elsewhere. Nothing is validated up front; every
    /// read is bounds-checked and malformed input surfaces as
    /// `Error::CorruptEncoding`.
    pub fn from_bytes(buf: Vec<u8>) -> Self {
        ByteMap { buf }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrowed view over this map's bytes.
    pub fn view(&self) -> ByteMapRef<'_> {
        ByteMapRef::new(&self.buf)
    }

    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        self.view().get(key)
    }

    pub fn get_bytes(&self, key: &str) -> Result<Option<&[u8]>> {
        self.view().get_bytes(key)
    }

    pub fn lookup(&self, key: &str) -> Result<Lookup<Value>> {
        self.view().lookup(key)
    }

    pub fn lookup_bytes(&self, key: &str) -> Result<Lookup<&[u8]>> {
        self.view().lookup_bytes(key)
    }

    pub fn iter(&self) -> Iter<'_> {
        self.view().iter()
    }

    pub fn iterate<F>(&self, include_value: bool, include_bytes: bool, cb: F) -> Result<()>
    where
        F: FnMut(&str, Option<Value>, Option<&[u8]>) -> bool,
    {
        self.view().iterate(include_value, include_bytes, cb)
    }

    pub fn iterate_values<F>(&self, cb: F) -> Result<()>
    where
        F: FnMut(&str, Value) -> bool,
    {
        self.view().iterate_values(cb)
    }

    pub fn iterate_value_bytes<F>(&self, cb: F) -> Result<()>
    where
        F: FnMut(&str, Option<&[u8]>) -> bool,
    {
        self.view().iterate_value_bytes(cb)
    }

    pub fn as_map(&self) -> Result<HashMap<String, Value>> {
        self.view().as_map()
    }

    pub fn slice<K: AsRef<str>>(&self, keys: &[K]) -> Result<ByteMap> {
        self.view().slice(keys)
    }

    pub fn split<K: AsRef<str>>(&self, keys: &[K]) -> Result<(ByteMap, ByteMap)> {
        self.view().split(keys)
    }

    pub fn project<K: AsRef<str>>(
        &self,
        keys: &[K],
        include_omitted: bool,
    ) -> Result<(ByteMap, Option<ByteMap>)> {
        self.view().project(keys, include_omitted)
    }
}

impl From<Vec<u8>> for ByteMap {
    fn from(buf: Vec<u8>) -> Self {
        ByteMap::from_bytes(buf)
    }
}

impl From<ByteMap> for Vec<u8> {
    fn from(map: ByteMap) -> Self {
        map.into_bytes()
    }
}

impl AsRef<[u8]> for ByteMap {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl<'a> IntoIterator for &'a ByteMap {
    type Item = Result<crate::reader::Entry<'a>>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// A borrowed view over an encoded map held in someone else's buffer.
///
/// Slices returned from a view (keys, raw value bytes) borrow from the
/// underlying buffer and live as long as it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteMapRef<'a> {
    pub(crate) buf: &'a [u8],
}

impl<'a> ByteMapRef<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        ByteMapRef { buf }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Copy the viewed bytes into an owned map.
    pub fn to_byte_map(&self) -> ByteMap {
        ByteMap::from_bytes(self.buf.to_vec())
    }
}

impl<'a> From<&'a [u8]> for ByteMapRef<'a> {
    fn from(buf: &'a [u8]) -> Self {
        ByteMapRef::new(buf)
    }
}
