//! Bellman-Ford (`spec.md` §4.4): selected for real-valued negative weights. Detects a negative
//! cycle and surfaces it through [`Error::NegativeCycle`] carrying the cycle itself, rather than
//! by altering the normal return value.

use error_stack::Report;
use graph_core::{
    error::{Error, Result},
    graph::IndexGraph,
    weight::WeightFunction,
};

use super::result::SsspResult;
use crate::path::IndexPath;

/// A negative cycle found while relaxing; attached to the [`Error::NegativeCycle`] report.
#[derive(Debug, Clone)]
pub struct NegativeCycle {
    pub edges: Vec<usize>,
}

impl core::fmt::Display for NegativeCycle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "negative cycle over {} edges", self.edges.len())
    }
}

pub fn compute<W: WeightFunction>(
    graph: &IndexGraph,
    source: usize,
    weight: &W,
) -> Result<SsspResult> {
    let n = graph.num_vertices();
    let mut dist = vec![f64::INFINITY; n];
    let mut backtrack = vec![-1isize; n];
    dist[source] = 0.0;

    let mut last_relaxed = usize::MAX;
    for _ in 0..n {
        last_relaxed = usize::MAX;
        for e in graph.edges() {
            let u = graph.edge_source(e);
            if dist[u].is_infinite() {
                continue;
            }
            let v = graph.edge_target(e);
            let nd = dist[u] + weight.weight(e);
            if nd < dist[v] {
                dist[v] = nd;
                backtrack[v] = e as isize;
                last_relaxed = v;
            }
            if !graph.is_directed() {
                let (u2, v2) = (v, u);
                if dist[u2].is_finite() {
                    let nd2 = dist[u2] + weight.weight(e);
                    if nd2 < dist[v2] {
                        dist[v2] = nd2;
                        backtrack[v2] = e as isize;
                        last_relaxed = v2;
                    }
                }
            }
        }
        if last_relaxed == usize::MAX {
            break;
        }
    }

    if last_relaxed != usize::MAX {
        // One more relaxation round still makes progress: `last_relaxed` lies on or downstream of
        // a negative cycle. Walk `backtrack` n steps to land inside the cycle, then walk again to
        // recover it.
        let mut v = last_relaxed;
        for _ in 0..n {
            v = cycle_predecessor(graph, &backtrack, v);
        }
        let start = v;
        let mut edges = Vec::new();
        loop {
            let e = backtrack[v] as usize;
            edges.push(e);
            v = cycle_predecessor(graph, &backtrack, v);
            if v == start {
                break;
            }
        }
        edges.reverse();
        return Err(Report::new(Error::NegativeCycle)
            .attach_printable(NegativeCycle { edges }));
    }

    Ok(SsspResult::new(source, dist, backtrack))
}

fn cycle_predecessor(graph: &IndexGraph, backtrack: &[isize], v: usize) -> usize {
    let e = backtrack[v] as usize;
    if graph.is_directed() {
        graph.edge_source(e)
    } else {
        graph.edge_endpoint(e, v)
    }
}

/// Helper shared with the path type: the cycle as an [`IndexPath`] from/to the same vertex, for
/// callers that want to print it the way they print any other path.
#[must_use]
pub fn cycle_as_path(start: usize, cycle: &NegativeCycle) -> IndexPath {
    IndexPath::new(start, start, cycle.edges.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_dijkstra_on_nonnegative_graph() {
        let g = IndexGraph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)], true, false);
        let w = |e: usize| [1.0, 1.0, 5.0, 1.0][e];
        let result = compute(&g, 0, &w).unwrap();
        assert_eq!(result.distances(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn negative_edge_without_cycle_is_fine() {
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 2), (0, 2)], true, false);
        let w = |e: usize| [1.0, -5.0, 10.0][e];
        let result = compute(&g, 0, &w).unwrap();
        assert_eq!(result.distance(2), -4.0);
    }

    #[test]
    fn negative_cycle_is_detected() {
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 2), (2, 0)], true, false);
        let w = |_: usize| -1.0;
        let err = compute(&g, 0, &w).unwrap_err();
        assert!(matches!(err.current_context(), Error::NegativeCycle));
    }
}
