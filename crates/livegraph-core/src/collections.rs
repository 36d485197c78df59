//! Hash collections keyed by series name.
//!
//! The registry resolves a name on every append-by-name call, so name-keyed
//! maps use AHash rather than the std SipHash default.

pub use ahash::{AHashMap as HashMap, RandomState};

/// Map from series name to `V`.
pub type NameMap<V> = HashMap<String, V>;

/// Create an empty name map sized for `capacity` entries.
pub fn name_map_with_capacity<V>(capacity: usize) -> NameMap<V> {
    HashMap::with_capacity(capacity)
}
