//! Dijkstra's algorithm (`spec.md` §4.4).
//!
//! Uses [`IndexHeapDouble`]. Fails fast with [`Error::NegativeEdgeWeight`] the first time it
//! relaxes an edge of negative weight, rather than producing a silently-wrong distance.

use core::hash::Hash;

use error_stack::Report;
use graph_core::{
    containers::IndexHeapDouble,
    error::{Error, Result},
    graph::{Graph, IndexGraph},
    weight::WeightFunction,
};

use super::result::SsspResult;

/// Index-space Dijkstra from `source`, following `out_edges` (or `in_edges` for the backward
/// variant used internally by bidirectional search).
pub fn compute<W: WeightFunction>(
    graph: &IndexGraph,
    source: usize,
    weight: &W,
    backward: bool,
) -> Result<SsspResult> {
    let n = graph.num_vertices();
    let mut dist = vec![f64::INFINITY; n];
    let mut backtrack = vec![-1isize; n];
    let mut heap = IndexHeapDouble::new(n);

    dist[source] = 0.0;
    heap.insert(source, 0.0);

    while let Some(u) = heap.extract_min() {
        let du = heap.key(u);
        if du > dist[u] {
            continue;
        }
        let edges = if backward {
            graph.in_edges(u)
        } else {
            graph.out_edges(u)
        };
        for &e in edges {
            let ew = weight.weight(e);
            if ew < 0.0 {
                return Err(Report::new(Error::NegativeEdgeWeight)
                    .attach_printable(format!("edge {e} has weight {ew} < 0")));
            }
            let v = graph.edge_endpoint(e, u);
            let nd = du + ew;
            if !heap.is_inserted(v) && !heap.was_extracted(v) {
                dist[v] = nd;
                backtrack[v] = e as isize;
                heap.insert(v, nd);
            } else if heap.is_inserted(v) && nd < heap.key(v) {
                dist[v] = nd;
                backtrack[v] = e as isize;
                heap.decrease_key(v, nd);
            }
        }
    }

    Ok(SsspResult::new(source, dist, backtrack))
}

/// The generic façade entry point (`spec.md` §4.1): resolves `source` and wraps `weight` through
/// the edge id map before delegating to [`compute`].
pub fn compute_ids<V, E, F>(
    graph: &Graph<V, E>,
    source: &V,
    weight: F,
) -> Result<SsspResult>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
    F: Fn(&E) -> f64,
{
    let source_index = graph.vertex_index(source)?;
    let w = crate::facade::index_weight_fn(graph.edge_map(), weight);
    compute(graph.index_graph(), source_index, &w, false)
}

#[cfg(test)]
mod tests {
    use graph_core::weight::CardinalityWeightFunction;

    use super::*;

    /// `spec.md` §8 scenario 1: 4-node triangle plus a bypass.
    #[test]
    fn triangle_plus_bypass() {
        let g = IndexGraph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)], true, false);
        let w = |e: usize| [1.0, 1.0, 5.0, 1.0][e];
        let result = compute(&g, 0, &w, false).unwrap();
        assert_eq!(result.distances(), &[0.0, 1.0, 2.0, 3.0]);
        let path = result.get_path(&g, 3).unwrap();
        assert_eq!(path.vertices(&g), vec![0, 1, 2, 3]);
    }

    #[test]
    fn cardinality_weight_is_unit_cost() {
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 2)], true, false);
        let result = compute(&g, 0, &CardinalityWeightFunction, false).unwrap();
        assert_eq!(result.distances(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn negative_edge_weight_is_rejected() {
        let g = IndexGraph::from_edges(2, &[(0, 1)], true, false);
        let w = |_: usize| -1.0;
        let err = compute(&g, 0, &w, false).unwrap_err();
        assert!(matches!(err.current_context(), Error::NegativeEdgeWeight));
    }

    #[test]
    fn unreachable_vertex_has_infinite_distance() {
        let g = IndexGraph::from_edges(3, &[(0, 1)], true, false);
        let result = compute(&g, 0, &CardinalityWeightFunction, false).unwrap();
        assert!(!result.is_reachable(2));
    }
}
