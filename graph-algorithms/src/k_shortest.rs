//! K-shortest paths (`spec.md` §4.6): Yen's algorithm with Lawler's deviation-index improvement,
//! reusing a single [`Bidirectional`] subroutine instance across all `k` iterations.
//!
//! `spec.md` §9 notes that the source carries three parallel variants of this algorithm; per the
//! Open Question resolution there (also recorded in `DESIGN.md`), this implements the first —
//! edge-list candidates plus an explicit deviation index — and does not expose the tree-of-nodes
//! rewrite as public API.

use core::hash::Hash;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use graph_core::{
    error::{Error, Result},
    graph::{Graph, IndexGraph},
    weight::WeightFunction,
};

use error_stack::Report;

use crate::{path::IndexPath, shortest_path_st::Bidirectional};

/// A candidate in Yen's priority queue: a full `s -> t` path plus the deviation index (Lawler's
/// `B`) it was spawned from. Ordered by ascending total weight, so a plain [`BinaryHeap`] (a
/// max-heap) yields the lightest candidate via the reversed [`Ord`] below.
#[derive(Debug, Clone)]
struct Candidate {
    weight: f64,
    path: IndexPath,
    deviation: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight
    }
}
impl Eq for Candidate {}
impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other.weight.partial_cmp(&self.weight).unwrap_or(Ordering::Equal)
    }
}

/// Run Yen's algorithm for up to `k` shortest simple paths from `s` to `t`.
///
/// Returns fewer than `k` paths if the graph doesn't have that many simple `s -> t` paths
/// (`spec.md` §8 scenario 2). Paths are returned in non-decreasing total-weight order
/// (`spec.md` §8 "k-SP monotonicity").
pub fn yen<W: WeightFunction>(
    graph: &IndexGraph,
    s: usize,
    t: usize,
    weight: &W,
    k: usize,
) -> Result<Vec<IndexPath>> {
    if k == 0 {
        return Err(Report::new(Error::IllegalArgument).attach_printable("k must be >= 1"));
    }

    let mut subroutine = Bidirectional::new(graph);
    let Some(first) = subroutine.search(s, t, weight)? else {
        return Ok(Vec::new());
    };

    // Parallel to `emitted`: the deviation index each path was discovered at, so the next round
    // only re-examines spur nodes from that point on (Lawler's improvement over plain Yen, which
    // would restart from index 0 every time).
    let mut emitted: Vec<IndexPath> = vec![first];
    let mut floors: Vec<usize> = vec![0];
    let mut candidates: BinaryHeap<Candidate> = BinaryHeap::new();

    while emitted.len() < k {
        let last = emitted.last().unwrap();
        let floor = *floors.last().unwrap();
        let last_vertices = last.vertices(graph);

        for j in floor..last.edges().len() {
            let spur_node = last_vertices[j];
            let root_edges = last.edges()[..j].to_vec();

            let masked_edges: Vec<usize> = emitted
                .iter()
                .filter(|p| p.edges().len() > j && p.edges()[..j] == root_edges[..])
                .map(|p| p.edges()[j])
                .collect();
            let masked_vertices = &last_vertices[..j];

            if let Some(spur) =
                search_masked(&mut subroutine, spur_node, t, weight, masked_vertices, &masked_edges)?
            {
                let mut edges = root_edges;
                edges.extend_from_slice(spur.edges());
                let candidate_path = IndexPath::new(s, t, edges);
                let w = candidate_path.total_weight(|e| weight.weight(e));
                candidates.push(Candidate {
                    weight: w,
                    path: candidate_path,
                    deviation: j,
                });
            }
        }

        let Some(next) = pop_next_unique(&mut candidates, &emitted) else {
            break;
        };
        crate::phase_event!(iteration = emitted.len(), weight = next.weight, "yen: emit candidate");
        floors.push(next.deviation);
        emitted.push(next.path);
    }

    Ok(emitted)
}

/// Generic-identifier Yen's algorithm (`spec.md` §4.1's façade pattern): resolves `s`/`t` to
/// indices and wraps `weight` before delegating to [`yen`]. The returned paths stay index-space,
/// same as [`Bidirectional::search`] does — callers walk them back to identifiers via
/// `graph.edge_id`/`graph.vertex_id`.
pub fn yen_ids<V, E, F>(
    graph: &Graph<V, E>,
    s: &V,
    t: &V,
    weight: F,
    k: usize,
) -> Result<Vec<IndexPath>>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
    F: Fn(&E) -> f64,
{
    let s_index = graph.vertex_index(s)?;
    let t_index = graph.vertex_index(t)?;
    let w = crate::facade::index_weight_fn(graph.edge_map(), weight);
    yen(graph.index_graph(), s_index, t_index, &w, k)
}

/// Pop candidates until one isn't a duplicate of an already-emitted path (two different spur
/// nodes can rediscover the same edge sequence), or the queue runs dry.
fn pop_next_unique(candidates: &mut BinaryHeap<Candidate>, emitted: &[IndexPath]) -> Option<Candidate> {
    while let Some(next) = candidates.pop() {
        if !emitted.iter().any(|p| p.edges() == next.path.edges()) {
            return Some(next);
        }
    }
    None
}

/// Re-run the bidirectional subroutine with `masked_vertices` and `masked_edges` forced to
/// infinite weight, so they're never selected (`spec.md` §4.6 step 3, "mask/unmask"). Reuses the
/// single long-lived [`Bidirectional`] instance `yen` built once for its first full path
/// (`spec.md` §4.6 "SP subroutine", §5 "long-lived instances"): `search` already clears only the
/// scratch indices the previous call dirtied, so calling it again here with a different mask is
/// exactly the "clear-only-dirty" reuse the spec calls for, not a fresh allocation per spur.
fn search_masked<W: WeightFunction>(
    subroutine: &mut Bidirectional<'_>,
    source: usize,
    target: usize,
    weight: &W,
    masked_vertices: &[usize],
    masked_edges: &[usize],
) -> Result<Option<IndexPath>> {
    if masked_vertices.contains(&source) {
        return Ok(None);
    }
    let graph = subroutine.graph();
    let masked_v: HashSet<usize> = masked_vertices.iter().copied().collect();
    let masked_e: HashSet<usize> = masked_edges.iter().copied().collect();
    let masked_weight = |e: usize| {
        let (u, v) = (graph.edge_source(e), graph.edge_target(e));
        if masked_e.contains(&e) || masked_v.contains(&u) || masked_v.contains(&v) {
            f64::INFINITY
        } else {
            weight.weight(e)
        }
    };
    let result = subroutine.search(source, target, &masked_weight)?;
    Ok(result.filter(|p| p.edges().iter().all(|&e| masked_weight(e).is_finite())))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `spec.md` §8 scenario 2: diamond `s-a-t` (3), `s-b-t` (3), no third simple path.
    #[test]
    fn yen_on_a_diamond_returns_two_paths() {
        // vertices: s=0, a=1, b=2, t=3
        let g = IndexGraph::from_edges(4, &[(0, 1), (0, 2), (1, 3), (2, 3)], false, false);
        let w = |e: usize| [1.0, 2.0, 2.0, 1.0][e];
        let paths = yen(&g, 0, 3, &w, 3).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].total_weight(w), 3.0);
        assert_eq!(paths[1].total_weight(w), 3.0);
        for window in paths.windows(2) {
            assert!(window[0].total_weight(w) <= window[1].total_weight(w));
        }
    }

    #[test]
    fn yen_returns_single_path_when_k_is_one() {
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 2)], true, false);
        let paths = yen(&g, 0, 2, &graph_core::weight::CardinalityWeightFunction, 1).unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn yen_rejects_k_zero() {
        let g = IndexGraph::from_edges(2, &[(0, 1)], true, false);
        let err = yen(&g, 0, 1, &graph_core::weight::CardinalityWeightFunction, 0).unwrap_err();
        assert!(matches!(err.current_context(), Error::IllegalArgument));
    }

    #[test]
    fn yen_on_a_square_finds_second_path_longer_than_first() {
        // 0 -> 1 -> 3 (weight 2), 0 -> 2 -> 3 (weight 4)
        let g = IndexGraph::from_edges(4, &[(0, 1), (1, 3), (0, 2), (2, 3)], true, false);
        let w = |e: usize| [1.0, 1.0, 2.0, 2.0][e];
        let paths = yen(&g, 0, 3, &w, 2).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].edges(), &[0, 1]);
        assert_eq!(paths[1].edges(), &[2, 3]);
    }

    #[test]
    fn generic_facade_resolves_endpoints_by_identifier() {
        let g: Graph<&str, &str> = Graph::from_edges(
            [("s", "t", "direct")],
            [],
            true,
            false,
        )
        .unwrap();
        let paths = yen_ids(&g, &"s", &"t", |_: &&str| 1.0, 1).unwrap();
        assert_eq!(paths.len(), 1);
    }
}
