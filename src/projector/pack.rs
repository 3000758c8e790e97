use crate::error::{Error, Result};
use crate::map::ByteMap;
use crate::types::SIZE_VALUE_OFFSET;

/// Collects entries copied out of a source map and packs them into a new one.
///
/// The source's value offsets point into the source buffer, so they are not
/// copied. `finish` writes each kept entry's prefix, then a fresh offset
/// (position within the new value region + new header length), then all
/// value bytes in the same order.
#[derive(Debug, Default)]
pub(crate) struct Packer<'a> {
    entries: Vec<(&'a [u8], Option<&'a [u8]>)>,
    header_len: usize,
    values_len: usize,
}

impl<'a> Packer<'a> {
    /// Queue one entry: its `[key_len][key][tag]` prefix and, unless Nil,
    /// its encoded value.
    pub fn push(&mut self, prefix: &'a [u8], value: Option<&'a [u8]>) {
        self.header_len += prefix.len();
        if let Some(value) = value {
            self.header_len += SIZE_VALUE_OFFSET;
            self.values_len += value.len();
        }
        self.entries.push((prefix, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn finish(self) -> Result<ByteMap> {
        let total = self.header_len + self.values_len;
        if total > u32::MAX as usize {
            return Err(Error::BufferTooLarge { len: total });
        }

        let mut out = Vec::with_capacity(total);
        let mut value_offset = self.header_len;
        for (prefix, value) in &self.entries {
            out.extend_from_slice(prefix);
            if let Some(value) = value {
                out.extend_from_slice(&(value_offset as u32).to_le_bytes());
                value_offset += value.len();
            }
        }
        for value in self.entries.iter().filter_map(|(_, value)| *value) {
            out.extend_from_slice(value);
        }
        debug_assert_eq!(out.len(), total);

        Ok(ByteMap::from_bytes(out))
    }
}
