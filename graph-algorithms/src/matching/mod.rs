//! Maximum (weight and cardinality) matching (`spec.md` §4.7, "the most complex component" —
//! Blossom-V core + bipartite/cardinality specialisations + dispatch).
//!
//! Four façade entry points, as `spec.md` §4.7 "Problem reduction" lays out: perfect/non-perfect
//! crossed with min/max (minimum is native to the caller via weight negation, integer-preserving
//! when weights are integral). Non-perfect general-graph maximum weight reduces to perfect by
//! vertex-doubling (see [`weighted_general::compute_maximum`]); the bipartite and cardinality
//! specialisations handle the non-perfect case directly instead, without the doubling trick.

mod bipartite;
mod cardinality;
mod result;
mod weighted_general;

pub use result::Matching;

use core::hash::Hash;
use std::collections::VecDeque;

use graph_core::{
    error::{Error, Result},
    graph::{Graph, IndexGraph},
    weight::WeightFunction,
};

use error_stack::Report;

/// Maximum cardinality matching, any graph shape (`spec.md` §4.7's cardinality specialisation).
pub fn maximum_cardinality(graph: &IndexGraph) -> Result<Matching> {
    cardinality::compute(graph)
}

/// Maximum weight matching. Detects bipartiteness and routes to the exact Hungarian
/// specialisation when it applies; otherwise falls back to the general-graph blossom solver in
/// [`weighted_general`].
pub fn maximum_weight<W: WeightFunction>(graph: &IndexGraph, weight: &W) -> Result<Matching> {
    if graph.is_directed() {
        return Err(Report::new(Error::GraphDirectionality)
            .attach_printable("matching requires an undirected graph"));
    }
    if weight.is_cardinality() {
        return maximum_cardinality(graph);
    }
    if let Some((left, right)) = detect_bipartition(graph) {
        bipartite::compute(graph, &left, &right, weight, false)
    } else {
        weighted_general::compute_maximum(graph, weight)
    }
}

/// Maximum weight *perfect* matching (`spec.md` §4.7 "Failure modes": `OddVertexCount` on an odd
/// vertex count, since no perfect matching can exist).
pub fn maximum_weight_perfect<W: WeightFunction>(graph: &IndexGraph, weight: &W) -> Result<Matching> {
    if graph.is_directed() {
        return Err(Report::new(Error::GraphDirectionality)
            .attach_printable("matching requires an undirected graph"));
    }
    let n = graph.num_vertices();
    if n % 2 != 0 {
        return Err(Report::new(Error::OddVertexCount)
            .attach_printable("a perfect matching needs an even number of vertices"));
    }
    if let Some((left, right)) = detect_bipartition(graph) {
        return bipartite::compute(graph, &left, &right, weight, true);
    }
    let m = weighted_general::compute_maximum_perfect(graph, weight)?;
    if !m.is_perfect() {
        return Err(Report::new(Error::OddVertexCount)
            .attach_printable("no perfect matching exists for this graph"));
    }
    Ok(m)
}

/// Maximum cardinality *perfect* matching.
pub fn maximum_cardinality_perfect(graph: &IndexGraph) -> Result<Matching> {
    let n = graph.num_vertices();
    if n % 2 != 0 {
        return Err(Report::new(Error::OddVertexCount)
            .attach_printable("a perfect matching needs an even number of vertices"));
    }
    let m = cardinality::compute(graph)?;
    if !m.is_perfect() {
        return Err(Report::new(Error::OddVertexCount)
            .attach_printable("no perfect matching exists for this graph"));
    }
    Ok(m)
}

/// Generic-identifier maximum cardinality matching (`spec.md` §4.1's façade pattern).
pub fn maximum_cardinality_ids<V, E>(graph: &Graph<V, E>) -> Result<Matching>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
{
    maximum_cardinality(graph.index_graph())
}

/// Generic-identifier maximum weight matching; `weight` is keyed by edge identifier.
pub fn maximum_weight_ids<V, E, F>(graph: &Graph<V, E>, weight: F) -> Result<Matching>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
    F: Fn(&E) -> f64,
{
    let w = crate::facade::index_weight_fn(graph.edge_map(), weight);
    maximum_weight(graph.index_graph(), &w)
}

/// Generic-identifier maximum weight perfect matching.
pub fn maximum_weight_perfect_ids<V, E, F>(graph: &Graph<V, E>, weight: F) -> Result<Matching>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
    F: Fn(&E) -> f64,
{
    let w = crate::facade::index_weight_fn(graph.edge_map(), weight);
    maximum_weight_perfect(graph.index_graph(), &w)
}

/// Generic-identifier maximum cardinality perfect matching.
pub fn maximum_cardinality_perfect_ids<V, E>(graph: &Graph<V, E>) -> Result<Matching>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
{
    maximum_cardinality_perfect(graph.index_graph())
}

/// Two-color the graph by BFS; `None` if an odd cycle makes it non-bipartite.
fn detect_bipartition(graph: &IndexGraph) -> Option<(Vec<usize>, Vec<usize>)> {
    let n = graph.num_vertices();
    let mut color = vec![-1i8; n];
    let mut left = Vec::new();
    let mut right = Vec::new();

    for start in 0..n {
        if color[start] != -1 {
            continue;
        }
        color[start] = 0;
        let mut queue = VecDeque::new();
        queue.push_back(start);
        while let Some(v) = queue.pop_front() {
            for &e in graph.out_edges(v) {
                let to = graph.edge_endpoint(e, v);
                if color[to] == -1 {
                    color[to] = 1 - color[v];
                    queue.push_back(to);
                } else if color[to] == color[v] {
                    return None;
                }
            }
        }
    }

    for v in 0..n {
        if color[v] == 0 {
            left.push(v);
        } else {
            right.push(v);
        }
    }
    Some((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_core::weight::CardinalityWeightFunction;

    #[test]
    fn five_cycle_maximum_weight_matches_cardinality_result() {
        let g = IndexGraph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)], false, false);
        let m = maximum_weight(&g, &CardinalityWeightFunction).unwrap();
        assert_eq!(m.size(), 2);
    }

    #[test]
    fn bipartite_square_prefers_the_heavier_diagonal() {
        // 0,1 left; 2,3 right. Edges: 0-2(1), 1-3(1), 0-3(10), 1-2(10).
        let g = IndexGraph::from_edges(4, &[(0, 2), (1, 3), (0, 3), (1, 2)], false, false);
        let w = |e: usize| [1.0, 1.0, 10.0, 10.0][e];
        let m = maximum_weight(&g, &w).unwrap();
        assert_eq!(m.total_weight(&g, w), 20.0);
        assert!(m.is_perfect());
    }

    #[test]
    fn odd_vertex_count_rejects_perfect_matching() {
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 2)], false, false);
        let err = maximum_cardinality_perfect(&g).unwrap_err();
        assert!(matches!(err.current_context(), Error::OddVertexCount));
    }

    #[test]
    fn directed_graph_is_rejected_by_weighted_facade() {
        let g = IndexGraph::from_edges(2, &[(0, 1)], true, false);
        let err = maximum_weight(&g, &CardinalityWeightFunction).unwrap_err();
        assert!(matches!(err.current_context(), Error::GraphDirectionality));
    }

    #[test]
    fn generic_facade_matches_on_string_identifiers() {
        let g: Graph<&str, &str> = Graph::from_edges(
            [("a", "b", "ab"), ("b", "c", "bc")],
            [],
            false,
            false,
        )
        .unwrap();
        let m = maximum_weight_ids(&g, |_: &&str| 1.0).unwrap();
        assert_eq!(m.size(), 1);
    }
}
