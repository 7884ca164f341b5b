//! The generic façade pattern (`spec.md` §4.1): every algorithm module exposes exactly two entry
//! points per operation — one index-space (`fn compute(graph: &IndexGraph, ...)`) and one generic
//! (`fn compute_ids(graph: &Graph<V, E>, ...)`). This module holds the small amount of glue that
//! pattern shares across modules; the per-module adaptors themselves stay colocated with their
//! index-space implementation so the "generic call -> index call -> lift result" chain is visible
//! in one place per algorithm, the way the teacher keeps `Dijkstra`'s generic/index split inside
//! `dijkstra/mod.rs` rather than in a shared base class.

use core::hash::Hash;

use graph_core::{
    id::{sentinel_to_option, IndexIdMap},
    weight::{IndexedWeightFunction, WeightFunction},
};

pub use sentinel_to_option as sentinel;

/// Step 3 of §4.1: wrap a generic-identifier weight function `E -> f64` into an index-space
/// [`WeightFunction`] by composing with the edge id map. Thin re-export under the façade's name so
/// algorithm modules don't need to reach into `graph_core::weight` directly.
#[must_use]
pub fn index_weight_fn<'a, E, F>(
    edge_map: &'a IndexIdMap<E>,
    f: F,
) -> IndexedWeightFunction<'a, E, F>
where
    E: Hash + Eq + Clone,
    F: Fn(&E) -> f64,
{
    IndexedWeightFunction::new(edge_map, f)
}

/// Translate a `-1`/absent index *edge* option back to an identifier, step 5 of §4.1: an absent
/// index must surface as `None`, never as a failed lookup.
#[must_use]
pub fn lift_edge_id<E>(edge_map: &IndexIdMap<E>, e: Option<usize>) -> Option<&E> {
    e.and_then(|e| edge_map.index_to_id(e))
}

/// Translate a vertex index option back to an identifier; see [`lift_edge_id`].
#[must_use]
pub fn lift_vertex_id<V>(vertex_map: &IndexIdMap<V>, v: Option<usize>) -> Option<&V> {
    v.and_then(|v| vertex_map.index_to_id(v))
}

/// Lift a whole index-space edge list (e.g. a path, or a matching's edge set) to identifiers,
/// preserving order. Panics if an index is out of range for `edge_map`, which would indicate the
/// index-space algorithm and the map were built from different graphs.
#[must_use]
pub fn lift_edge_list<'a, E>(edge_map: &'a IndexIdMap<E>, edges: &[usize]) -> Vec<&'a E> {
    edges
        .iter()
        .map(|&e| {
            edge_map
                .index_to_id(e)
                .expect("edge index produced by the same graph the map was built from")
        })
        .collect()
}

/// A generic weight function is recognised as the cardinality singleton only when the caller
/// passes `None`; `graph_core::weight::replace_null_weight_func` already performs the
/// index-space half of this, this helper documents the façade-level contract: callers of the
/// generic entry points pass `Option<impl Fn(&E) -> f64>`, never a sentinel closure.
pub fn is_cardinality<W: WeightFunction>(w: &W) -> bool {
    w.is_cardinality()
}
