//! The matching result type (`spec.md` §3 "Matchings"): two equivalent views over one
//! `matched[v] = e` array.

use graph_core::graph::IndexGraph;

/// A matching: `matched(v)` gives the edge covering `v`, or `None` if `v` is exposed.
#[derive(Debug, Clone)]
pub struct Matching {
    matched: Vec<isize>,
}

impl Matching {
    #[must_use]
    pub fn new(matched: Vec<isize>) -> Self {
        Self { matched }
    }

    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.matched.len()
    }

    #[must_use]
    pub fn matched_edge(&self, v: usize) -> Option<usize> {
        graph_core::id::sentinel_to_option(self.matched[v])
    }

    #[must_use]
    pub fn is_matched(&self, v: usize) -> bool {
        self.matched[v] >= 0
    }

    /// The edge set view (`spec.md` §3): derived lazily by scanning for the endpoint with the
    /// smaller index, so each matched pair is counted once regardless of edge direction.
    #[must_use]
    pub fn edges(&self, graph: &IndexGraph) -> Vec<usize> {
        let mut out = Vec::new();
        for v in 0..self.matched.len() {
            if let Some(e) = self.matched_edge(v) {
                let other = graph.edge_endpoint(e, v);
                if v < other {
                    out.push(e);
                }
            }
        }
        out
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.matched.iter().filter(|&&e| e >= 0).count() / 2
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.matched.iter().all(|&e| e >= 0)
    }

    #[must_use]
    pub fn total_weight(&self, graph: &IndexGraph, weight: impl Fn(usize) -> f64) -> f64 {
        self.edges(graph).iter().map(|&e| weight(e)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_counts_each_pair_once() {
        let g = IndexGraph::from_edges(4, &[(0, 1), (2, 3)], false, false);
        let m = Matching::new(vec![0, 0, 1, 1]);
        let mut edges = m.edges(&g);
        edges.sort_unstable();
        assert_eq!(edges, vec![0, 1]);
        assert_eq!(m.size(), 2);
        assert!(m.is_perfect());
    }

    #[test]
    fn exposed_vertex_is_not_perfect() {
        let g = IndexGraph::from_edges(3, &[(0, 1)], false, false);
        let m = Matching::new(vec![0, 0, -1]);
        assert!(!m.is_perfect());
        assert_eq!(m.size(), 1);
        assert_eq!(m.matched_edge(2), None);
    }
}
