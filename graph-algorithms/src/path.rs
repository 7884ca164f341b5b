//! Path results (`spec.md` §3 "Paths"): `(source, target, edges[])` with the well-formedness
//! invariants every shortest-path kernel's output satisfies.

use core::hash::Hash;

use graph_core::{graph::IndexGraph, id::IndexIdMap};

/// An index-space walk from `source` to `target`.
///
/// Invariants (`spec.md` §3, §8 "Path well-formedness"): consecutive edges share an endpoint; in
/// directed graphs successive edges are strictly head-to-tail; `is_simple` iff all intermediate
/// vertices are distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexPath {
    source: usize,
    target: usize,
    edges: Vec<usize>,
}

impl IndexPath {
    #[must_use]
    pub fn new(source: usize, target: usize, edges: Vec<usize>) -> Self {
        Self {
            source,
            target,
            edges,
        }
    }

    #[must_use]
    pub fn source(&self) -> usize {
        self.source
    }

    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    #[must_use]
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The vertex sequence `source, v1, v2, ..., target`, derived by walking `edges` with
    /// `edge_endpoint`.
    #[must_use]
    pub fn vertices(&self, graph: &IndexGraph) -> Vec<usize> {
        let mut vs = Vec::with_capacity(self.edges.len() + 1);
        let mut cur = self.source;
        vs.push(cur);
        for &e in &self.edges {
            cur = graph.edge_endpoint(e, cur);
            vs.push(cur);
        }
        vs
    }

    /// Total weight under `weight`.
    #[must_use]
    pub fn total_weight(&self, weight: impl Fn(usize) -> f64) -> f64 {
        self.edges.iter().map(|&e| weight(e)).sum()
    }

    /// `true` iff all intermediate vertices (i.e. excluding `source`/`target` themselves, though a
    /// path revisiting `source` or `target` mid-walk is also non-simple) are distinct.
    #[must_use]
    pub fn is_simple(&self, graph: &IndexGraph) -> bool {
        let vs = self.vertices(graph);
        let mut seen = std::collections::HashSet::with_capacity(vs.len());
        vs.iter().all(|v| seen.insert(*v))
    }

    /// `true` iff every consecutive pair of edges shares an endpoint and, for directed graphs,
    /// each edge's source is the previous edge's target.
    #[must_use]
    pub fn is_well_formed(&self, graph: &IndexGraph) -> bool {
        if self.edges.is_empty() {
            return self.source == self.target;
        }
        let mut cur = self.source;
        for &e in &self.edges {
            if graph.is_directed() {
                if graph.edge_source(e) != cur {
                    return false;
                }
                cur = graph.edge_target(e);
            } else {
                if graph.edge_source(e) != cur && graph.edge_target(e) != cur {
                    return false;
                }
                cur = graph.edge_endpoint(e, cur);
            }
        }
        cur == self.target
    }
}

/// The generic, identifier-space view of an [`IndexPath`] (`spec.md` §4.1 step 5): every query
/// lazily translates through the id maps, and absent edges (there are none on a well-formed path)
/// would surface as `None` rather than a bogus identifier.
pub struct Path<'a, V, E> {
    index: IndexPath,
    vertex_map: &'a IndexIdMap<V>,
    edge_map: &'a IndexIdMap<E>,
}

impl<'a, V, E> Path<'a, V, E>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
{
    #[must_use]
    pub fn new(
        index: IndexPath,
        vertex_map: &'a IndexIdMap<V>,
        edge_map: &'a IndexIdMap<E>,
    ) -> Self {
        Self {
            index,
            vertex_map,
            edge_map,
        }
    }

    #[must_use]
    pub fn index_path(&self) -> &IndexPath {
        &self.index
    }

    #[must_use]
    pub fn source(&self) -> &V {
        self.vertex_map
            .index_to_id(self.index.source())
            .expect("source index valid for this graph's vertex map")
    }

    #[must_use]
    pub fn target(&self) -> &V {
        self.vertex_map
            .index_to_id(self.index.target())
            .expect("target index valid for this graph's vertex map")
    }

    #[must_use]
    pub fn edges(&self) -> Vec<&E> {
        crate::facade::lift_edge_list(self.edge_map, self.index.edges())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_with_bypass() -> IndexGraph {
        IndexGraph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)], true, false)
    }

    #[test]
    fn well_formed_directed_path() {
        let g = triangle_with_bypass();
        let p = IndexPath::new(0, 3, vec![0, 1, 3]);
        assert!(p.is_well_formed(&g));
        assert!(p.is_simple(&g));
        assert_eq!(p.vertices(&g), vec![0, 1, 2, 3]);
    }

    #[test]
    fn non_simple_path_revisits_a_vertex() {
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 0), (0, 2)], true, false);
        let p = IndexPath::new(0, 2, vec![0, 1, 2]);
        assert!(p.is_well_formed(&g));
        assert!(!p.is_simple(&g));
    }
}
