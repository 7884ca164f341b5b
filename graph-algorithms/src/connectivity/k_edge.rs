//! k-edge-connected components via Wang's randomised divide-and-conquer (`spec.md` §4.8): the
//! maximal subsets of vertices such that every pair needs at least `k` edge-disjoint paths
//! between them. A min-cut between a random pair of vertices, recorded as an auxiliary edge,
//! recursively shrinks the candidate set on each side of the cut until an auxiliary tree spans the
//! whole (weakly connected) component; the k-edge-connected components are then the connected
//! pieces of that tree once every auxiliary edge weighing less than `k` is removed.

use std::collections::HashMap;

use graph_core::{graph::IndexGraph, rng::RandomSource, weight::CardinalityWeightFunction};

use crate::min_cut;

use super::weak;

/// `component[v]` is an id shared by every vertex in `v`'s maximal `k`-edge-connected subgraph.
#[must_use]
pub fn compute(graph: &IndexGraph, k: usize, rng: &mut impl RandomSource) -> Vec<usize> {
    let n = graph.num_vertices();
    if n == 0 {
        return Vec::new();
    }

    let mut aux_edges: Vec<(usize, usize, f64)> = Vec::new();

    let weak_component = weak::compute(graph);
    let mut by_weak: HashMap<usize, Vec<usize>> = HashMap::new();
    for v in 0..n {
        by_weak.entry(weak_component[v]).or_default().push(v);
    }

    for mut range in by_weak.into_values() {
        if range.len() < 2 {
            continue;
        }
        let root = range[rng.next_usize(range.len())];
        divide(graph, &mut range, root, &mut aux_edges, rng);
    }

    let mut aux_adj: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    for &(u, v, w) in &aux_edges {
        aux_adj[u].push((v, w));
        aux_adj[v].push((u, w));
    }

    let mut component = vec![usize::MAX; n];
    let mut next_id = 0usize;
    for start in 0..n {
        if component[start] != usize::MAX {
            continue;
        }
        let id = next_id;
        next_id += 1;
        let mut stack = vec![start];
        component[start] = id;
        while let Some(v) = stack.pop() {
            for &(u, w) in &aux_adj[v] {
                if component[u] == usize::MAX && w >= k as f64 {
                    component[u] = id;
                    stack.push(u);
                }
            }
        }
    }

    component
}

/// Recursive divide (`spec.md` §4.8): pick a random sink, compute the min cut from `source`,
/// record an auxiliary edge weighted by the cut's value, then recurse on each side.
fn divide(
    graph: &IndexGraph,
    range: &mut [usize],
    source: usize,
    aux_edges: &mut Vec<(usize, usize, f64)>,
    rng: &mut impl RandomSource,
) {
    if range.len() < 2 {
        return;
    }
    let sink = loop {
        let candidate = range[rng.next_usize(range.len())];
        if candidate != source {
            break candidate;
        }
    };

    let (forward_weight, source_side) = st_cut(graph, source, sink);
    let weight = if graph.is_directed() {
        let (backward_weight, _) = st_cut(graph, sink, source);
        forward_weight.min(backward_weight)
    } else {
        forward_weight
    };

    if weight > 0.0 {
        aux_edges.push((source, sink, weight));
    }

    // recursion always partitions by the forward cut's reachable set: it separates source from
    // sink regardless of which direction turned out lighter.
    let mut lo = 0usize;
    let mut hi = range.len();
    while lo < hi {
        if source_side[range[lo]] {
            lo += 1;
        } else {
            hi -= 1;
            range.swap(lo, hi);
        }
    }
    let (left, right) = range.split_at_mut(lo);
    if left.len() >= 2 {
        divide(graph, left, source, aux_edges, rng);
    }
    if right.len() >= 2 {
        divide(graph, right, sink, aux_edges, rng);
    }
}

/// Min `source`-`sink` cut weight plus the source-side reachable set, over a doubled directed
/// network so an undirected edge carries unit capacity in both directions.
fn st_cut(graph: &IndexGraph, source: usize, sink: usize) -> (f64, Vec<bool>) {
    let n = graph.num_vertices();
    let mut pairs = Vec::with_capacity(graph.num_edges() * 2);
    for e in 0..graph.num_edges() {
        let u = graph.edge_source(e);
        let v = graph.edge_target(e);
        pairs.push((u, v));
        if !graph.is_directed() {
            pairs.push((v, u));
        }
    }
    let directed = IndexGraph::from_edges(n, &pairs, true, graph.is_allow_self_edges());
    let cut = min_cut::st_min_cut(&directed, source, sink, &CardinalityWeightFunction)
        .expect("source != sink is enforced by the caller");
    let side = (0..n).map(|v| cut.is_source_side(v)).collect();
    (cut.weight(), side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_core::rng::Seeded;

    #[test]
    fn two_triangles_joined_by_a_single_edge_split_at_k_two() {
        // 0-1-2 triangle, 3-4-5 triangle, bridge 2-3. The bridge is a 1-edge cut, so at k=2 the
        // two triangles land in different components.
        let g = IndexGraph::from_edges(
            6,
            &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)],
            false,
            false,
        );
        let mut rng = Seeded::from_seed(11);
        let component = compute(&g, 2, &mut rng);
        assert_eq!(component[0], component[1]);
        assert_eq!(component[1], component[2]);
        assert_eq!(component[3], component[4]);
        assert_eq!(component[4], component[5]);
        assert_ne!(component[0], component[3]);
    }

    #[test]
    fn a_single_cycle_is_2_edge_connected() {
        let g = IndexGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)], false, false);
        let mut rng = Seeded::from_seed(3);
        let component = compute(&g, 2, &mut rng);
        assert!(component.iter().all(|&c| c == component[0]));
    }

    #[test]
    fn isolated_vertices_are_singleton_components() {
        let g = IndexGraph::with_vertices(3, false, false);
        let mut rng = Seeded::from_seed(5);
        let component = compute(&g, 1, &mut rng);
        assert_ne!(component[0], component[1]);
        assert_ne!(component[1], component[2]);
    }
}
