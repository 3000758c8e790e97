/// Builder configuration.
///
/// ```
/// use bytemap::Options;
///
/// let opts = Options::default().with_strict_types(true);
/// assert!(opts.strict_types);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Fail with `Error::UnsupportedType` instead of storing values of
    /// unsupported types as Nil.
    pub strict_types: bool,
    /// Check that input passed to the sorted entry points is in strictly
    /// ascending key order. Unchecked unsorted input silently corrupts
    /// lookups on the resulting map.
    pub verify_sorted: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            strict_types: false,
            verify_sorted: cfg!(debug_assertions),
        }
    }
}

impl Options {
    pub fn with_strict_types(mut self, strict: bool) -> Self {
        self.strict_types = strict;
        self
    }

    pub fn with_verify_sorted(mut self, verify: bool) -> Self {
        self.verify_sorted = verify;
        self
    }
}
