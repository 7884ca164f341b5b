//! Cardinality SSSP (`spec.md` §4.4): plain BFS, selected whenever the weight function is the
//! [`CardinalityWeightFunction`] singleton regardless of what else the builder knows.

use graph_core::{error::Result, graph::IndexGraph, traversal::{Bfs, Direction}};

use super::result::SsspResult;

pub fn compute(graph: &IndexGraph, source: usize) -> Result<SsspResult> {
    let n = graph.num_vertices();
    let mut dist = vec![f64::INFINITY; n];
    let mut backtrack = vec![-1isize; n];
    dist[source] = 0.0;

    let mut bfs = Bfs::new(graph, Direction::Forward, &[source]);
    while let Some(v) = bfs.next() {
        dist[v] = f64::from(bfs.layer());
        backtrack[v] = bfs.last_edge().map_or(-1, |e| e as isize);
    }

    Ok(SsspResult::new(source, dist, backtrack))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_edge_count() {
        let g = IndexGraph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)], true, false);
        let result = compute(&g, 0).unwrap();
        assert_eq!(result.distances(), &[0.0, 1.0, 1.0, 2.0]);
    }
}
