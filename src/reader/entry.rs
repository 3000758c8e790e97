use crate::codec::{self, read_array};
use crate::error::{Error, Result};
use crate::types::{SIZE_KEY_LEN, SIZE_VALUE_OFFSET, SIZE_VALUE_TYPE, TypeTag};

/// One header entry as it sits in the buffer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawEntry<'a> {
    /// `[key_len][key][tag]`: everything except the value offset.
    pub prefix: &'a [u8],
    pub key: &'a [u8],
    pub tag: TypeTag,
    /// Absolute offset of the value; `None` for Nil entries.
    pub value_offset: Option<usize>,
    /// Offset just past this entry.
    pub end: usize,
}

impl<'a> RawEntry<'a> {
    /// The bytes of this entry's value within `buf`, `None` for Nil.
    pub fn value_bytes(&self, buf: &'a [u8]) -> Result<Option<&'a [u8]>> {
        let Some(offset) = self.value_offset else {
            return Ok(None);
        };
        let rest = buf.get(offset..).ok_or_else(|| {
            Error::corrupt(format!(
                "value offset {offset} past end of {} byte buffer",
                buf.len()
            ))
        })?;
        codec::value_bytes(rest, self.tag).map(Some)
    }
}

/// Walks the header region one entry at a time.
///
/// There is no stored entry count. The scan ends when the cursor reaches the
/// first value offset seen so far (the start of the value region) or the
/// end of the buffer. A map whose entries are all Nil has no value region,
/// so the header runs to the end of the buffer.
///
/// Yields an error once and then stops if an entry is truncated or malformed.
pub(crate) struct HeaderScanner<'a> {
    buf: &'a [u8],
    offset: usize,
    values_start: Option<usize>,
    failed: bool,
}

impl<'a> HeaderScanner<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        HeaderScanner {
            buf,
            offset: 0,
            values_start: None,
            failed: false,
        }
    }

    fn at_end(&self) -> bool {
        self.failed
            || self.offset >= self.buf.len()
            || self.values_start.is_some_and(|start| self.offset >= start)
    }

    fn parse(&self) -> Result<RawEntry<'a>> {
        let start = self.offset;
        let key_len = u16::from_le_bytes(read_array(self.buf, start)?) as usize;
        let key_start = start + SIZE_KEY_LEN;
        let tag_at = key_start + key_len;
        let key = self.buf.get(key_start..tag_at).ok_or_else(|| {
            Error::corrupt(format!(
                "key of {key_len} bytes at offset {key_start} runs past end of buffer"
            ))
        })?;
        let [tag_byte] = read_array::<1>(self.buf, tag_at)?;
        let tag = TypeTag::from_u8(tag_byte)?;
        let prefix_end = tag_at + SIZE_VALUE_TYPE;

        let (value_offset, end) = if tag.is_nil() {
            (None, prefix_end)
        } else {
            let offset = u32::from_le_bytes(read_array(self.buf, prefix_end)?) as usize;
            (Some(offset), prefix_end + SIZE_VALUE_OFFSET)
        };

        Ok(RawEntry {
            prefix: &self.buf[start..prefix_end],
            key,
            tag,
            value_offset,
            end,
        })
    }
}

impl<'a> Iterator for HeaderScanner<'a> {
    type Item = Result<RawEntry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.at_end() {
            return None;
        }

        match self.parse() {
            Ok(entry) => {
                if self.values_start.is_none() {
                    self.values_start = entry.value_offset;
                }
                self.offset = entry.end;
                Some(Ok(entry))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
