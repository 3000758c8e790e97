use std::cmp::Ordering;

/// The requested side of the merge-join between stored and requested keys.
///
/// Requested keys are sorted and deduplicated up front. Stored keys arrive in
/// ascending order, so each requested key is passed over at most once and
/// the whole join is a single linear pass over both sequences.
pub(crate) struct RequestCursor<'k> {
    keys: Vec<&'k [u8]>,
    pos: usize,
}

impl<'k> RequestCursor<'k> {
    pub fn new<K: AsRef<str>>(requested: &'k [K]) -> Self {
        let mut keys: Vec<&[u8]> = requested.iter().map(|k| k.as_ref().as_bytes()).collect();
        keys.sort_unstable();
        keys.dedup();
        RequestCursor { keys, pos: 0 }
    }

    /// No requested key is left to match.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.keys.len()
    }

    /// Advance past requested keys smaller than `candidate` and report
    /// whether the next one equals it. Requested keys that are skipped this
    /// way are not in the map and produce no output.
    ///
    /// A match consumes the requested key; stored keys are unique.
    pub fn matches(&mut self, candidate: &[u8]) -> bool {
        while let Some(key) = self.keys.get(self.pos) {
            match (*key).cmp(candidate) {
                Ordering::Less => self.pos += 1,
                Ordering::Equal => {
                    self.pos += 1;
                    return true;
                }
                Ordering::Greater => return false,
            }
        }
        false
    }
}
