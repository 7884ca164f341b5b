//! All-pairs shortest paths (`spec.md` §2 "ApspCore"): the full `n x n` distance matrix, a subset
//! variant restricted to a chosen set of sources, and construction from a batch of already-run
//! SSSP results. Peak memory is `O(n^2)` (`spec.md` §5), the one exception besides Blossom-V to
//! the library's otherwise `O(n+m)` budget.

use core::hash::Hash;

use graph_core::{
    error::Result,
    graph::{Graph, IndexGraph},
    weight::WeightFunction,
};

use crate::{
    path::IndexPath,
    sssp::{self, SsspResult},
};

/// Dense `n x n` (or `sources.len() x n` for the subset variant) distance matrix plus the
/// per-source [`SsspResult`] needed to reconstruct any path.
pub struct ApspResult {
    sources: Vec<usize>,
    per_source: Vec<SsspResult>,
}

impl ApspResult {
    #[must_use]
    pub fn sources(&self) -> &[usize] {
        &self.sources
    }

    /// Distance from `sources[i]` (or from `source` itself for [`Self::distance`]) to `v`.
    #[must_use]
    pub fn distance(&self, source: usize, v: usize) -> f64 {
        let i = self
            .source_index(source)
            .expect("source must be one of the sources this result was computed for");
        self.per_source[i].distance(v)
    }

    #[must_use]
    pub fn get_path(&self, graph: &IndexGraph, source: usize, target: usize) -> Option<IndexPath> {
        let i = self.source_index(source)?;
        self.per_source[i].get_path(graph, target)
    }

    #[must_use]
    pub fn sssp_from(&self, source: usize) -> Option<&SsspResult> {
        let i = self.source_index(source)?;
        Some(&self.per_source[i])
    }

    fn source_index(&self, source: usize) -> Option<usize> {
        self.sources.iter().position(|&s| s == source)
    }

    /// Build an APSP result directly from a batch of SSSP results the caller already computed
    /// (`spec.md` §2 "from-SSSP" variant), e.g. results reused from a previous per-vertex pass.
    #[must_use]
    pub fn from_sssp(sources: Vec<usize>, per_source: Vec<SsspResult>) -> Self {
        debug_assert_eq!(sources.len(), per_source.len());
        Self {
            sources,
            per_source,
        }
    }
}

/// Full all-pairs distances: run Dijkstra (or Bellman-Ford if `weight` can go negative, callers
/// pick the variant) from every vertex.
pub fn compute_all_pairs<W: WeightFunction>(
    graph: &IndexGraph,
    weight: &W,
    allow_negative: bool,
) -> Result<ApspResult> {
    compute_subset(graph, &(0..graph.num_vertices()).collect::<Vec<_>>(), weight, allow_negative)
}

/// The subset variant (`spec.md` §2): run SSSP only from the given `sources`, `O(|sources| * (m +
/// n log n))` instead of the full `O(n * (m + n log n))`.
pub fn compute_subset<W: WeightFunction>(
    graph: &IndexGraph,
    sources: &[usize],
    weight: &W,
    allow_negative: bool,
) -> Result<ApspResult> {
    let mut per_source = Vec::with_capacity(sources.len());
    for &s in sources {
        let result = if allow_negative {
            crate::sssp::bellman_ford_for_apsp(graph, s, weight)?
        } else {
            sssp::dijkstra_compute(graph, s, weight, false)?
        };
        per_source.push(result);
    }
    Ok(ApspResult::from_sssp(sources.to_vec(), per_source))
}

/// Generic-identifier all-pairs shortest paths (`spec.md` §4.1's façade pattern). The result stays
/// index-space, same as [`sssp::compute_ids`]'s does; callers resolve a source back to its own
/// identifier via `graph.vertex_id`.
pub fn compute_all_pairs_ids<V, E, F>(graph: &Graph<V, E>, weight: F, allow_negative: bool) -> Result<ApspResult>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
    F: Fn(&E) -> f64,
{
    let w = crate::facade::index_weight_fn(graph.edge_map(), weight);
    compute_all_pairs(graph.index_graph(), &w, allow_negative)
}

/// Generic-identifier subset APSP; `sources` are caller identifiers, resolved to indices here.
pub fn compute_subset_ids<V, E, F>(
    graph: &Graph<V, E>,
    sources: &[V],
    weight: F,
    allow_negative: bool,
) -> Result<ApspResult>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
    F: Fn(&E) -> f64,
{
    let indices = sources
        .iter()
        .map(|s| graph.vertex_index(s))
        .collect::<Result<Vec<_>>>()?;
    let w = crate::facade::index_weight_fn(graph.edge_map(), weight);
    compute_subset(graph.index_graph(), &indices, &w, allow_negative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_core::weight::CardinalityWeightFunction;

    #[test]
    fn all_pairs_distances_on_a_path() {
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 2)], true, false);
        let result = compute_all_pairs(&g, &CardinalityWeightFunction, false).unwrap();
        assert_eq!(result.distance(0, 2), 2.0);
        assert_eq!(result.distance(1, 0), f64::INFINITY);
    }

    #[test]
    fn subset_only_computes_requested_sources() {
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 2)], true, false);
        let result = compute_subset(&g, &[1], &CardinalityWeightFunction, false).unwrap();
        assert_eq!(result.sources(), &[1]);
        assert_eq!(result.distance(1, 2), 1.0);
    }

    #[test]
    fn generic_facade_resolves_sources_by_identifier() {
        let g: Graph<&str, &str> = Graph::from_edges(
            [("a", "b", "ab"), ("b", "c", "bc")],
            [],
            true,
            false,
        )
        .unwrap();
        let result = compute_subset_ids(&g, &["b"], |_: &&str| 1.0, false).unwrap();
        let b = g.vertex_index(&"b").unwrap();
        assert_eq!(result.sources(), &[b]);
    }
}
