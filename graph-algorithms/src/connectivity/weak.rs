//! Weakly connected components via union-find (`spec.md` §2's Connectivity row; see
//! `SPEC_FULL.md`'s supplement note).

use graph_core::{containers::UnionFind, graph::IndexGraph};

/// `component[v]` is a canonical representative vertex shared by every vertex in `v`'s weakly
/// connected component.
pub fn compute(graph: &IndexGraph) -> Vec<usize> {
    let n = graph.num_vertices();
    let mut uf = UnionFind::new(n);
    for e in 0..graph.num_edges() {
        uf.union(graph.edge_source(e), graph.edge_target(e));
    }
    (0..n).map(|v| uf.find(v)).collect()
}

/// Number of distinct weakly connected components.
#[must_use]
pub fn count(components: &[usize]) -> usize {
    let mut seen = std::collections::HashSet::new();
    components.iter().filter(|&&c| seen.insert(c)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_disjoint_edges_are_two_components() {
        let g = IndexGraph::from_edges(4, &[(0, 1), (2, 3)], true, false);
        let components = compute(&g);
        assert_eq!(components[0], components[1]);
        assert_eq!(components[2], components[3]);
        assert_ne!(components[0], components[2]);
        assert_eq!(count(&components), 2);
    }

    #[test]
    fn isolated_vertex_is_its_own_component() {
        let g = IndexGraph::from_edges(3, &[(0, 1)], true, false);
        let components = compute(&g);
        assert_eq!(count(&components), 2);
        assert_ne!(components[2], components[0]);
    }
}
