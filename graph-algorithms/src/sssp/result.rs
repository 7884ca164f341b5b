//! The common SSSP result structure (`spec.md` §4.4): `distances[n]`, `backtrack[n]` (edge used to
//! reach each vertex, absent at the source or at an unreached vertex). Every SSSP implementation
//! (Dijkstra, Dial, Bellman-Ford, Goldberg, DAG/cardinality) writes into this one shape.

use graph_core::graph::IndexGraph;

use crate::path::IndexPath;

/// Index-space result of a single-source shortest path computation.
#[derive(Debug, Clone)]
pub struct SsspResult {
    source: usize,
    distances: Vec<f64>,
    backtrack: Vec<isize>,
}

impl SsspResult {
    #[must_use]
    pub fn new(source: usize, distances: Vec<f64>, backtrack: Vec<isize>) -> Self {
        Self {
            source,
            distances,
            backtrack,
        }
    }

    #[must_use]
    pub fn source(&self) -> usize {
        self.source
    }

    /// `f64::INFINITY` for vertices not reachable from the source.
    #[must_use]
    pub fn distance(&self, v: usize) -> f64 {
        self.distances[v]
    }

    #[must_use]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// The edge used to reach `v` on the shortest-path tree, or `None` at the source or at an
    /// unreached vertex.
    #[must_use]
    pub fn backtrack_edge(&self, v: usize) -> Option<usize> {
        let e = self.backtrack[v];
        if e < 0 {
            None
        } else {
            Some(e as usize)
        }
    }

    #[must_use]
    pub fn is_reachable(&self, v: usize) -> bool {
        self.distances[v].is_finite()
    }

    /// Reconstruct the shortest path from the source to `target` by walking `backtrack`
    /// (`spec.md` §4.4 "Path reconstruction"). `None` if `target` is unreachable.
    #[must_use]
    pub fn get_path(&self, graph: &IndexGraph, target: usize) -> Option<IndexPath> {
        if !self.is_reachable(target) {
            return None;
        }
        let mut edges = Vec::new();
        let mut cur = target;
        while cur != self.source {
            let e = self.backtrack_edge(cur).expect("reachable non-source vertex has a backtrack edge");
            edges.push(e);
            cur = if graph.is_directed() {
                graph.edge_source(e)
            } else {
                graph.edge_endpoint(e, cur)
            };
        }
        edges.reverse();
        Some(IndexPath::new(self.source, target, edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_reconstruction_on_a_chain() {
        let g = IndexGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3)], true, false);
        let result = SsspResult::new(0, vec![0.0, 1.0, 2.0, 3.0], vec![-1, 0, 1, 2]);
        let path = result.get_path(&g, 3).unwrap();
        assert_eq!(path.edges(), &[0, 1, 2]);
    }

    #[test]
    fn unreachable_target_has_no_path() {
        let g = IndexGraph::from_edges(2, &[], true, false);
        let result = SsspResult::new(0, vec![0.0, f64::INFINITY], vec![-1, -1]);
        assert!(result.get_path(&g, 1).is_none());
    }
}
