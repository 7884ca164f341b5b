//! The identifier↔index bijection every façade call passes through (`spec.md` §3, "IndexIdMap").

use core::hash::Hash;

use error_stack::{Report, ResultExt};
use indexmap::IndexSet;

use crate::error::{Error, Result};

/// A dense bijection between user-chosen identifiers `K` and contiguous indices `0..len()`.
///
/// Built once when a [`crate::graph::Graph`] is constructed and reused by every algorithm call
/// the façade dispatches; never mutated mid-call.
#[derive(Debug, Clone, Default)]
pub struct IndexIdMap<K> {
    ids: IndexSet<K>,
}

impl<K> IndexIdMap<K>
where
    K: Hash + Eq + Clone,
{
    /// Build the map from an ordered sequence of identifiers; position in the sequence becomes
    /// the index.
    pub fn from_ids<I: IntoIterator<Item = K>>(ids: I) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolve `id` to its index, failing with [`Error::NoSuchVertex`]-flavoured reports are the
    /// caller's responsibility to pick (vertex vs. edge) via [`Self::id_to_index_as`].
    pub fn id_to_index(&self, id: &K) -> Option<usize> {
        self.ids.get_index_of(id)
    }

    pub fn id_to_index_as(&self, id: &K, kind: Error) -> Result<usize> {
        self.id_to_index(id)
            .ok_or_else(|| Report::new(kind).attach_printable("identifier not present in graph"))
    }

    /// The inverse of [`Self::id_to_index`]; always defined for `index < len()`.
    pub fn index_to_id(&self, index: usize) -> Option<&K> {
        self.ids.get_index(index)
    }

    /// Like [`Self::index_to_id`] but for indices that may legitimately be absent (e.g. a `-1`
    /// sentinel normalised to `None` before reaching this call, or a stale index after removal).
    pub fn index_to_id_if_exist(&self, index: Option<usize>) -> Option<&K> {
        index.and_then(|i| self.index_to_id(i))
    }

    pub fn index_to_id_checked(&self, index: usize, kind: Error) -> Result<&K> {
        self.index_to_id(index)
            .ok_or_else(|| Report::new(kind).attach_printable("index out of range"))
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.ids.iter()
    }
}

/// Translate a `-1`/out-of-range sentinel index into "absent", never into an invalid identifier.
///
/// Used by every index→id result adaptor (`spec.md` §4.1): an algorithm's `-1` (unreached vertex,
/// unmatched endpoint, absent parent) must surface to callers of the generic façade as `None`,
/// not as a lookup failure.
#[must_use]
pub fn sentinel_to_option(index: isize) -> Option<usize> {
    if index < 0 {
        None
    } else {
        Some(index as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let map = IndexIdMap::from_ids(["a", "b", "c"]);
        assert_eq!(map.id_to_index(&"b"), Some(1));
        assert_eq!(map.index_to_id(1), Some(&"b"));
        assert_eq!(map.id_to_index(&"z"), None);
    }

    #[test]
    fn sentinel_translation() {
        assert_eq!(sentinel_to_option(-1), None);
        assert_eq!(sentinel_to_option(0), Some(0));
        assert_eq!(sentinel_to_option(4), Some(4));
    }
}
