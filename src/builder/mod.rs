use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use tracing::{debug, trace};

use crate::codec::{self, IntoValue};
use crate::error::{Error, Result};
use crate::map::ByteMap;
use crate::options::Options;
use crate::types::{MAX_KEY_LEN, SIZE_KEY_LEN, SIZE_VALUE_OFFSET, SIZE_VALUE_TYPE, Value};

/// Lays out key/value pairs as a single encoded buffer.
///
/// Layout of the buffer:
/// ```text
/// ┌─────────────────────────────────────────────────────┐
/// │ Entry 0: [key_len(2B)][key][tag(1B)][value_off(4B)] │
/// │ Entry 1: [key_len(2B)][key][tag=Nil]                │
/// │ Entry N: ...                                        │
/// ├─────────────────────────────────────────────────────┤
/// │ Value 0 │ Value 2 │ ... │ Value N                   │
/// └─────────────────────────────────────────────────────┘
/// ```
///
/// Entries are in ascending byte order of their keys. Value offsets are
/// absolute, so the first stored offset marks the end of the header. No
/// entry count is stored.
///
/// Build process:
/// 1. Convert values and order the entries (unless the caller sorted them)
/// 2. Size pass: header length and value region length
/// 3. Allocate once, write every entry and its value
#[derive(Debug, Clone, Copy, Default)]
pub struct Builder {
    options: Options,
}

impl Builder {
    pub fn new(options: Options) -> Self {
        Builder { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Build from pairs in any order. Keys must be unique.
    pub fn build<K, V, I>(&self, pairs: I) -> Result<ByteMap>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoValue,
    {
        let mut entries = self.convert(pairs)?;
        entries.sort_unstable_by(|a, b| a.0.as_ref().cmp(b.0.as_ref()));
        if let Some(pair) = entries.windows(2).find(|w| w[0].0.as_ref() == w[1].0.as_ref()) {
            return Err(Error::DuplicateKey(pair[0].0.as_ref().to_owned()));
        }
        write_entries(&entries)
    }

    /// Build from pairs already in strictly ascending key order.
    ///
    /// The order is trusted unless `Options::verify_sorted` is set. Unsorted
    /// input that is not verified produces a map whose lookups are
    /// unreliable.
    pub fn build_sorted<K, V, I>(&self, pairs: I) -> Result<ByteMap>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoValue,
    {
        let entries = self.convert(pairs)?;
        if self.options.verify_sorted {
            verify_sorted(&entries)?;
        }
        write_entries(&entries)
    }

    pub fn from_map<K, V, S>(&self, map: &HashMap<K, V, S>) -> Result<ByteMap>
    where
        K: AsRef<str>,
        V: IntoValue + Clone,
        S: BuildHasher,
    {
        self.build(map.iter().map(|(k, v)| (key_str(k), v.clone())))
    }

    /// A `BTreeMap` over string keys iterates in byte order, so no sort pass
    /// is needed.
    pub fn from_btree_map<K, V>(&self, map: &BTreeMap<K, V>) -> Result<ByteMap>
    where
        K: AsRef<str> + Ord,
        V: IntoValue + Clone,
    {
        self.build_sorted(map.iter().map(|(k, v)| (key_str(k), v.clone())))
    }

    /// Build from parallel slices of sorted keys and their values.
    pub fn from_sorted_keys_and_values<K, V>(&self, keys: &[K], values: &[V]) -> Result<ByteMap>
    where
        K: AsRef<str>,
        V: IntoValue + Clone,
    {
        if keys.len() != values.len() {
            return Err(Error::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        self.build_sorted(keys.iter().map(key_str).zip(values.iter().cloned()))
    }

    pub fn from_floats<K, S>(&self, map: &HashMap<K, f64, S>) -> Result<ByteMap>
    where
        K: AsRef<str>,
        S: BuildHasher,
    {
        self.build(map.iter().map(|(k, v)| (key_str(k), Value::Float64(*v))))
    }

    pub fn from_sorted_keys_and_floats<K: AsRef<str>>(
        &self,
        keys: &[K],
        values: &[f64],
    ) -> Result<ByteMap> {
        self.from_sorted_keys_and_values(keys, values)
    }

    fn convert<K, V, I>(&self, pairs: I) -> Result<Vec<(K, Value)>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoValue,
    {
        pairs
            .into_iter()
            .map(|(key, value)| match value.into_value() {
                Ok(value) => Ok((key, value)),
                Err(unsupported) if self.options.strict_types => Err(Error::UnsupportedType {
                    type_name: unsupported.type_name,
                }),
                Err(unsupported) => {
                    debug!(
                        key = key.as_ref(),
                        type_name = unsupported.type_name,
                        "storing unsupported value as nil"
                    );
                    Ok((key, Value::Nil))
                }
            })
            .collect()
    }
}

/// Build with default options from pairs in any order.
pub fn build<K, V, I>(pairs: I) -> Result<ByteMap>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: IntoValue,
{
    Builder::default().build(pairs)
}

/// Build with default options from pairs in ascending key order.
pub fn build_sorted<K, V, I>(pairs: I) -> Result<ByteMap>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: IntoValue,
{
    Builder::default().build_sorted(pairs)
}

fn key_str<K: AsRef<str>>(key: &K) -> &str {
    key.as_ref()
}

fn verify_sorted<K: AsRef<str>>(entries: &[(K, Value)]) -> Result<()> {
    match entries.windows(2).find(|w| w[0].0.as_ref() >= w[1].0.as_ref()) {
        Some(w) => Err(Error::Unsorted {
            previous: w[0].0.as_ref().to_owned(),
            key: w[1].0.as_ref().to_owned(),
        }),
        None => Ok(()),
    }
}

/// Sizes of the two regions of a buffer about to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    header_len: usize,
    values_len: usize,
}

impl Layout {
    fn measure<K: AsRef<str>>(entries: &[(K, Value)]) -> Result<Self> {
        let mut header_len = 0;
        let mut values_len = 0;
        for (key, value) in entries {
            let key_len = key.as_ref().len();
            if key_len > MAX_KEY_LEN {
                return Err(Error::KeyTooLarge { len: key_len });
            }
            codec::validate(value)?;

            header_len += SIZE_KEY_LEN + key_len + SIZE_VALUE_TYPE;
            if !value.is_nil() {
                header_len += SIZE_VALUE_OFFSET;
            }
            values_len += codec::encoded_length(value);
        }

        let layout = Layout {
            header_len,
            values_len,
        };
        if layout.total() > u32::MAX as usize {
            return Err(Error::BufferTooLarge { len: layout.total() });
        }
        Ok(layout)
    }

    fn total(&self) -> usize {
        self.header_len + self.values_len
    }
}

fn write_entries<K: AsRef<str>>(entries: &[(K, Value)]) -> Result<ByteMap> {
    let layout = Layout::measure(entries)?;
    let mut buf = vec![0u8; layout.total()];

    let mut key_offset = 0;
    let mut value_offset = layout.header_len;
    for (key, value) in entries {
        let key = key.as_ref().as_bytes();

        // Serialize: key_len (2B) | key | tag (1B) | value_off (4B, non-Nil only)
        buf[key_offset..key_offset + SIZE_KEY_LEN].copy_from_slice(&(key.len() as u16).to_le_bytes());
        key_offset += SIZE_KEY_LEN;
        buf[key_offset..key_offset + key.len()].copy_from_slice(key);
        key_offset += key.len();

        let (tag, written) = codec::encode_value(&mut buf[value_offset..], value)?;
        buf[key_offset] = tag as u8;
        key_offset += SIZE_VALUE_TYPE;

        if !tag.is_nil() {
            buf[key_offset..key_offset + SIZE_VALUE_OFFSET]
                .copy_from_slice(&(value_offset as u32).to_le_bytes());
            key_offset += SIZE_VALUE_OFFSET;
            value_offset += written;
        }
    }
    debug_assert_eq!(key_offset, layout.header_len);
    debug_assert_eq!(value_offset, layout.total());

    trace!(
        entries = entries.len(),
        header_len = layout.header_len,
        values_len = layout.values_len,
        "built byte map"
    );
    Ok(ByteMap::from_bytes(buf))
}
