//! # ByteMap
//!
//! An immutable map from string keys to scalar values, encoded as one
//! contiguous byte buffer.
//!
//! ## Core idea
//! Sorted key entries come first, each pointing at its value in a value
//! region that follows them. A reader can find one key and decode only its
//! value, and a producer can carve a subset (or an included/excluded pair)
//! out of a map by copying bytes instead of decoding and re-encoding.
//!
//! ```
//! use bytemap::{Value, build};
//!
//! # fn main() -> bytemap::Result<()> {
//! let map = build([
//!     ("a", Value::Bool(true)),
//!     ("b", Value::Int16(5)),
//!     ("c", Value::from("hi")),
//! ])?;
//! assert_eq!(map.get("b")?, Some(Value::Int16(5)));
//! assert_eq!(map.get("z")?, None);
//!
//! let sliced = map.slice(&["a", "c"])?;
//! assert_eq!(sliced.get("c")?, Some(Value::from("hi")));
//! assert_eq!(sliced.get("b")?, None);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod codec;
pub mod error;
pub mod map;
pub mod options;
pub mod projector;
pub mod reader;
pub mod types;

// Public re-exports for the top-level API
pub use builder::{Builder, build, build_sorted};
pub use codec::{IntoValue, Unsupported};
pub use error::{Error, Result};
pub use map::{ByteMap, ByteMapRef};
pub use options::Options;
pub use reader::{Entry, Iter};
pub use types::{Lookup, TypeTag, Value};
