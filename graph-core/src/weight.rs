//! Weight functions (`spec.md` §3 "Weight function", §6 "WeightFunction (consumed)").

use core::hash::Hash;

use crate::id::IndexIdMap;

/// An index-space weight function, `e -> f64`.
///
/// Every SSSP/flow/matching/cycle kernel takes `&dyn WeightFunction` (or a generic `W: WeightFunction`)
/// rather than a closure directly, so the library can recognise the canonical
/// [`CardinalityWeightFunction`] singleton and switch to an unweighted fast path (§3).
pub trait WeightFunction {
    fn weight(&self, e: usize) -> f64;

    /// `true` for the canonical cardinality function; overridden only by
    /// [`CardinalityWeightFunction`]. Algorithms query this instead of downcasting.
    fn is_cardinality(&self) -> bool {
        false
    }
}

impl<F: Fn(usize) -> f64> WeightFunction for F {
    fn weight(&self, e: usize) -> f64 {
        self(e)
    }
}

/// The canonical "all edges cost 1" weight function (§3).
///
/// This is the semantic default when a caller supplies no weights at all; recognising this
/// singleton (rather than a closure that happens to always return `1.0`) is what lets the SSSP
/// builder dispatch to cardinality BFS (§4.4 dispatch table).
#[derive(Debug, Clone, Copy, Default)]
pub struct CardinalityWeightFunction;

impl WeightFunction for CardinalityWeightFunction {
    fn weight(&self, _e: usize) -> f64 {
        1.0
    }

    fn is_cardinality(&self) -> bool {
        true
    }
}

/// An index-space weight function over integers, used by the Dial/Goldberg/push-relabel integer
/// fast paths.
pub trait IntWeightFunction {
    fn weight_int(&self, e: usize) -> i64;
}

impl<F: Fn(usize) -> i64> IntWeightFunction for F {
    fn weight_int(&self, e: usize) -> i64 {
        self(e)
    }
}

/// `replaceNullWeightFunc`: normalise an optional user weight function to the cardinality
/// singleton (§6).
#[must_use]
pub fn replace_null_weight_func<W: WeightFunction>(w: Option<W>) -> WeightOrCardinality<W> {
    match w {
        Some(w) => WeightOrCardinality::Weighted(w),
        None => WeightOrCardinality::Cardinality(CardinalityWeightFunction),
    }
}

/// Either a caller-supplied weight function or the cardinality singleton; implements
/// [`WeightFunction`] so callers never need to match on it themselves.
pub enum WeightOrCardinality<W> {
    Weighted(W),
    Cardinality(CardinalityWeightFunction),
}

impl<W: WeightFunction> WeightFunction for WeightOrCardinality<W> {
    fn weight(&self, e: usize) -> f64 {
        match self {
            Self::Weighted(w) => w.weight(e),
            Self::Cardinality(c) => c.weight(e),
        }
    }

    fn is_cardinality(&self) -> bool {
        matches!(self, Self::Cardinality(_))
    }
}

/// Wraps a generic-identifier weight function `E -> f64` into an index-space [`WeightFunction`]
/// by composing with the edge [`IndexIdMap`] (§4.1 step 3).
pub struct IndexedWeightFunction<'a, E, F> {
    edge_map: &'a IndexIdMap<E>,
    inner: F,
}

impl<'a, E, F> IndexedWeightFunction<'a, E, F>
where
    E: Hash + Eq + Clone,
    F: Fn(&E) -> f64,
{
    pub fn new(edge_map: &'a IndexIdMap<E>, inner: F) -> Self {
        Self { edge_map, inner }
    }
}

impl<'a, E, F> WeightFunction for IndexedWeightFunction<'a, E, F>
where
    E: Hash + Eq + Clone,
    F: Fn(&E) -> f64,
{
    fn weight(&self, e: usize) -> f64 {
        let id = self
            .edge_map
            .index_to_id(e)
            .expect("index produced by the same graph the map was built from");
        (self.inner)(id)
    }
}
