//! Biconnected components and articulation points via low-link DFS (`spec.md` §2's Connectivity
//! row; see `SPEC_FULL.md`'s supplement note). Undirected graphs only.

use graph_core::graph::IndexGraph;

/// One maximal 2-connected subgraph, as its edge set.
#[derive(Debug, Clone)]
pub struct BiconnectedComponent {
    edges: Vec<usize>,
}

impl BiconnectedComponent {
    #[must_use]
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }
}

/// Biconnected components plus the set of articulation points, found with one low-link DFS: a
/// vertex `v` below the root is an articulation point iff some child `c` has
/// `low_link[c] >= disc[v]`; every time that test fires (or the DFS finishes an edge back to the
/// root), the edges accumulated on the component stack since that child was pushed form one
/// biconnected component.
pub fn compute(graph: &IndexGraph) -> (Vec<BiconnectedComponent>, Vec<bool>) {
    let n = graph.num_vertices();
    let mut disc = vec![usize::MAX; n];
    let mut low = vec![0usize; n];
    let mut is_articulation = vec![false; n];
    let mut components = Vec::new();
    let mut timer = 0usize;

    for root in 0..n {
        if disc[root] != usize::MAX {
            continue;
        }
        dfs(graph, root, &mut disc, &mut low, &mut is_articulation, &mut components, &mut timer);
    }

    (components, is_articulation)
}

#[allow(clippy::too_many_arguments)]
fn dfs(
    graph: &IndexGraph,
    root: usize,
    disc: &mut [usize],
    low: &mut [usize],
    is_articulation: &mut [bool],
    components: &mut Vec<BiconnectedComponent>,
    timer: &mut usize,
) {
    // (vertex, parent_edge, position in out_edges still to explore)
    let mut frames: Vec<(usize, isize, usize)> = vec![(root, -1, 0)];
    let mut edge_stack: Vec<usize> = Vec::new();
    let mut root_children = 0usize;

    disc[root] = *timer;
    low[root] = *timer;
    *timer += 1;

    while let Some(&(v, parent_edge, pos)) = frames.last() {
        let out = graph.out_edges(v);
        if pos < out.len() {
            let e = out[pos];
            frames.last_mut().unwrap().2 += 1;
            if parent_edge == e as isize {
                continue;
            }
            let w = graph.edge_endpoint(e, v);
            if disc[w] == usize::MAX {
                edge_stack.push(e);
                disc[w] = *timer;
                low[w] = *timer;
                *timer += 1;
                if v == root {
                    root_children += 1;
                }
                frames.push((w, e as isize, 0));
            } else if disc[w] < disc[v] {
                edge_stack.push(e);
                low[v] = low[v].min(disc[w]);
            }
        } else {
            frames.pop();
            if let Some(&(parent, _, _)) = frames.last() {
                low[parent] = low[parent].min(low[v]);
                let parent_is_root = parent == root;
                if (parent_is_root && root_children >= 1) || (!parent_is_root && low[v] >= disc[parent]) {
                    if !parent_is_root {
                        is_articulation[parent] = true;
                    }
                    let mut comp_edges = Vec::new();
                    while let Some(&top) = edge_stack.last() {
                        let (tu, tv) = (graph.edge_source(top), graph.edge_target(top));
                        comp_edges.push(top);
                        edge_stack.pop();
                        if (tu == parent || tv == parent) && (tu == v || tv == v) {
                            break;
                        }
                    }
                    components.push(BiconnectedComponent { edges: comp_edges });
                }
            }
        }
    }
    if root_children > 1 {
        is_articulation[root] = true;
    }
    if !edge_stack.is_empty() {
        components.push(BiconnectedComponent { edges: edge_stack });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_vertex_between_two_triangles_is_an_articulation_point() {
        // triangle 0-1-2, triangle 2-3-4, shared vertex 2.
        let g = IndexGraph::from_edges(
            5,
            &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)],
            false,
            false,
        );
        let (components, articulation) = compute(&g);
        assert!(articulation[2]);
        assert!(!articulation[0]);
        assert_eq!(components.len(), 2);
    }

    #[test]
    fn single_cycle_has_no_articulation_points() {
        let g = IndexGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)], false, false);
        let (components, articulation) = compute(&g);
        assert!(articulation.iter().all(|&a| !a));
        assert_eq!(components.len(), 1);
    }
}
