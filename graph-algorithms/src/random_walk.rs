//! Random walks (`spec.md` §3 "Supplemented features"): a uniform-choice walk over whichever
//! seeded [`RandomSource`] the caller supplies (`spec.md` §5's randomness capability).

use core::hash::Hash;

use graph_core::{
    error::Result,
    graph::{Graph, IndexGraph},
    rng::RandomSource,
};

/// Walk from `start` for up to `steps` hops, choosing uniformly among `out_edges(v)` at each
/// vertex. Stops early (returning a shorter path) if it reaches a vertex with no outgoing edges.
#[must_use]
pub fn walk(graph: &IndexGraph, start: usize, steps: usize, rng: &mut impl RandomSource) -> Vec<usize> {
    let mut path = Vec::with_capacity(steps + 1);
    path.push(start);
    let mut v = start;
    for _ in 0..steps {
        let out = graph.out_edges(v);
        if out.is_empty() {
            break;
        }
        let e = out[rng.next_usize(out.len())];
        v = graph.edge_endpoint(e, v);
        path.push(v);
    }
    path
}

/// Generic-identifier random walk (`spec.md` §4.1's façade pattern). The returned walk stays
/// index-space, same as [`walk`]'s does; callers translate each step back via `graph.vertex_id`.
pub fn walk_ids<V, E>(graph: &Graph<V, E>, start: &V, steps: usize, rng: &mut impl RandomSource) -> Result<Vec<usize>>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
{
    let start_index = graph.vertex_index(start)?;
    Ok(walk(graph.index_graph(), start_index, steps, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_core::rng::Seeded;

    #[test]
    fn stops_early_at_a_dead_end() {
        let g = IndexGraph::from_edges(2, &[(0, 1)], true, false);
        let mut rng = Seeded::from_seed(1);
        let path = walk(&g, 0, 10, &mut rng);
        assert_eq!(path, vec![0, 1]);
    }

    #[test]
    fn never_steps_further_than_requested() {
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 2), (2, 0)], true, false);
        let mut rng = Seeded::from_seed(7);
        let path = walk(&g, 0, 4, &mut rng);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn isolated_start_is_a_walk_of_length_zero() {
        let g = IndexGraph::with_vertices(1, true, false);
        let mut rng = Seeded::from_seed(2);
        let path = walk(&g, 0, 5, &mut rng);
        assert_eq!(path, vec![0]);
    }

    #[test]
    fn generic_facade_resolves_start_by_identifier() {
        let g: Graph<&str, &str> = Graph::from_edges(
            [("a", "b", "ab")],
            [],
            true,
            false,
        )
        .unwrap();
        let mut rng = Seeded::from_seed(4);
        let path = walk_ids(&g, &"a", 3, &mut rng).unwrap();
        let a = g.vertex_index(&"a").unwrap();
        assert_eq!(path[0], a);
    }
}
