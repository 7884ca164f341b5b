//! k-core decomposition (`spec.md` §4.12): the Batagelj-Zaversnik bucket-sort algorithm, `O(n+m)`.
//!
//! `coreNumber(v)` is the largest `k` such that `v` belongs to some subgraph in which every vertex
//! has degree `>= k` (`spec.md` §8 "k-core monotonicity": `coreNumber` is monotone non-increasing
//! as `k` increases, and the `k`-core is exactly `{ v : coreNumber(v) >= k }`).

use core::hash::Hash;

use graph_core::graph::{Graph, IndexGraph};

/// Which edges count toward a vertex's degree for core-number purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    Out,
    In,
    /// Out-degree plus in-degree on a directed graph; on an undirected graph `out_edges` and
    /// `in_edges` already coincide, so this is the same as [`EdgeDirection::Out`].
    All,
}

fn vertex_degree(graph: &IndexGraph, v: usize, direction: EdgeDirection) -> usize {
    match direction {
        EdgeDirection::Out => graph.out_degree(v),
        EdgeDirection::In => graph.in_degree(v),
        EdgeDirection::All => {
            if graph.is_directed() {
                graph.out_degree(v) + graph.in_degree(v)
            } else {
                graph.out_degree(v)
            }
        }
    }
}

fn neighbors(graph: &IndexGraph, v: usize, direction: EdgeDirection) -> Vec<usize> {
    let mut out = Vec::new();
    match direction {
        EdgeDirection::Out => out.extend(graph.out_edges(v).iter().map(|&e| graph.edge_endpoint(e, v))),
        EdgeDirection::In => out.extend(graph.in_edges(v).iter().map(|&e| graph.edge_endpoint(e, v))),
        EdgeDirection::All => {
            out.extend(graph.out_edges(v).iter().map(|&e| graph.edge_endpoint(e, v)));
            if graph.is_directed() {
                out.extend(graph.in_edges(v).iter().map(|&e| graph.edge_endpoint(e, v)));
            }
        }
    }
    out
}

/// `core_number(v)` for every vertex, computed by repeatedly peeling the minimum-degree vertex:
/// bucket vertices by degree, then for each vertex `u` taken in non-decreasing degree order, pull
/// every higher-degree neighbour one bucket down. The final bucket position is the core number.
#[must_use]
pub fn compute(graph: &IndexGraph, direction: EdgeDirection) -> Vec<usize> {
    let n = graph.num_vertices();
    if n == 0 {
        return Vec::new();
    }

    let mut degree: Vec<usize> = (0..n).map(|v| vertex_degree(graph, v, direction)).collect();
    let max_degree = degree.iter().copied().max().unwrap_or(0);

    // bucket_start[d] is the stable starting offset of degree-d vertices in `vert`.
    let mut bucket_count = vec![0usize; max_degree + 1];
    for &d in &degree {
        bucket_count[d] += 1;
    }
    let mut bucket_start = vec![0usize; max_degree + 1];
    for d in 1..=max_degree {
        bucket_start[d] = bucket_start[d - 1] + bucket_count[d - 1];
    }

    let mut vert = vec![0usize; n];
    let mut pos = vec![0usize; n];
    let mut cursor = bucket_start.clone();
    for v in 0..n {
        let d = degree[v];
        pos[v] = cursor[d];
        vert[pos[v]] = v;
        cursor[d] += 1;
    }

    for i in 0..n {
        let v = vert[i];
        for u in neighbors(graph, v, direction) {
            if degree[u] > degree[v] {
                let du = degree[u];
                let pu = pos[u];
                let pw = bucket_start[du];
                let w = vert[pw];
                if u != w {
                    vert[pu] = w;
                    pos[w] = pu;
                    vert[pw] = u;
                    pos[u] = pw;
                }
                bucket_start[du] += 1;
                degree[u] -= 1;
            }
        }
    }

    degree
}

/// Generic-identifier k-core decomposition (`spec.md` §4.1's façade pattern). Core numbers stay
/// index-space, same shape as [`compute`]'s output; callers resolve a vertex's core number via
/// `core_numbers[graph.vertex_index(&id)?]`.
#[must_use]
pub fn compute_ids<V, E>(graph: &Graph<V, E>, direction: EdgeDirection) -> Vec<usize>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
{
    compute(graph.index_graph(), direction)
}

/// The vertex set of the `k`-core: `{ v : coreNumber(v) >= k }` (`spec.md` §4.12).
#[must_use]
pub fn k_core(core_numbers: &[usize], k: usize) -> Vec<usize> {
    (0..core_numbers.len()).filter(|&v| core_numbers[v] >= k).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_a_2_core() {
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 2), (2, 0)], false, false);
        let core = compute(&g, EdgeDirection::Out);
        assert_eq!(core, vec![2, 2, 2]);
    }

    #[test]
    fn pendant_vertex_has_core_number_one() {
        // triangle 0-1-2 plus a pendant 3 hanging off 2.
        let g = IndexGraph::from_edges(4, &[(0, 1), (1, 2), (2, 0), (2, 3)], false, false);
        let core = compute(&g, EdgeDirection::Out);
        assert_eq!(core, vec![2, 2, 2, 1]);
        assert_eq!(k_core(&core, 2), vec![0, 1, 2]);
    }

    #[test]
    fn isolated_vertex_has_core_number_zero() {
        let g = IndexGraph::with_vertices(1, false, false);
        assert_eq!(compute(&g, EdgeDirection::Out), vec![0]);
    }

    #[test]
    fn two_triangles_joined_by_a_bridge_keep_their_own_core_numbers() {
        // 0-1-2 triangle, 3-4-5 triangle, bridge 2-3. The bridge doesn't raise anyone's core.
        let g = IndexGraph::from_edges(
            6,
            &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)],
            false,
            false,
        );
        let core = compute(&g, EdgeDirection::Out);
        assert_eq!(core, vec![2, 2, 2, 2, 2, 2]);
    }

    #[test]
    fn generic_facade_matches_index_space_result() {
        let g: Graph<&str, &str> = Graph::from_edges(
            [("a", "b", "ab"), ("b", "c", "bc"), ("c", "a", "ca")],
            [],
            false,
            false,
        )
        .unwrap();
        assert_eq!(compute_ids(&g, EdgeDirection::Out), vec![2, 2, 2]);
    }
}
