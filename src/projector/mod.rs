//! Deriving smaller maps from an encoded map without decoding it.
//!
//! A projection walks the stored entries and the requested keys together
//! (both ascending) and copies the raw bytes of each stored entry into the
//! matched or the omitted output. Offsets are rebased when the outputs are
//! packed, so every output is a valid map in its own right and can be read
//! or projected again.

mod merge;
mod pack;

use tracing::trace;

use crate::error::Result;
use crate::map::{ByteMap, ByteMapRef};
use merge::RequestCursor;
use pack::Packer;

impl<'a> ByteMapRef<'a> {
    /// Split this map's entries by membership in `keys`.
    ///
    /// Returns the matched entries and, if `include_omitted` is set, the
    /// rest. `keys` may be unsorted and contain duplicates. Requested keys
    /// that are not stored produce no entry. Keys stored without a value are
    /// carried over like any other entry.
    ///
    /// Without `include_omitted` the scan stops as soon as the last
    /// requested key has been matched or passed.
    pub fn project<K: AsRef<str>>(
        &self,
        keys: &[K],
        include_omitted: bool,
    ) -> Result<(ByteMap, Option<ByteMap>)> {
        let mut requested = RequestCursor::new(keys);
        let mut matched = Packer::default();
        let mut omitted = include_omitted.then(Packer::default);

        if requested.is_exhausted() && omitted.is_none() {
            return Ok((ByteMap::default(), None));
        }

        for entry in self.entries() {
            let entry = entry?;
            if requested.matches(entry.key) {
                matched.push(entry.prefix, entry.value_bytes(self.buf)?);
            } else if let Some(omitted) = omitted.as_mut() {
                omitted.push(entry.prefix, entry.value_bytes(self.buf)?);
            }
            if omitted.is_none() && requested.is_exhausted() {
                break;
            }
        }

        trace!(
            requested = keys.len(),
            matched = matched.len(),
            omitted = omitted.as_ref().map_or(0, Packer::len),
            "projected byte map"
        );
        let omitted = omitted.map(Packer::finish).transpose()?;
        Ok((matched.finish()?, omitted))
    }

    /// A new map holding only the entries whose keys are in `keys`.
    pub fn slice<K: AsRef<str>>(&self, keys: &[K]) -> Result<ByteMap> {
        let (matched, _) = self.project(keys, false)?;
        Ok(matched)
    }

    /// Two new maps: the entries whose keys are in `keys`, and all others.
    pub fn split<K: AsRef<str>>(&self, keys: &[K]) -> Result<(ByteMap, ByteMap)> {
        let (matched, omitted) = self.project(keys, true)?;
        Ok((matched, omitted.unwrap_or_default()))
    }
}
