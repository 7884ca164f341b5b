//! Dial's algorithm (`spec.md` §4.4): bucket-queue SSSP for non-negative integer weights with a
//! bounded maximum distance, `O(n + m + maxDist)`.

use graph_core::{error::Result, graph::IndexGraph, weight::IntWeightFunction};

use super::result::SsspResult;

/// Index-space Dial's algorithm. `max_distance` bounds the buckets array; callers (the builder,
/// `spec.md` §4.4 dispatch table) are expected to have already checked `maxDist < 2^31` and that
/// bucket work beats Dijkstra's before choosing this path.
pub fn compute<W: IntWeightFunction>(
    graph: &IndexGraph,
    source: usize,
    weight: &W,
    max_distance: u64,
) -> Result<SsspResult> {
    let n = graph.num_vertices();
    let mut dist = vec![i64::MAX; n];
    let mut backtrack = vec![-1isize; n];
    let mut done = vec![false; n];

    dist[source] = 0;
    let num_buckets = max_distance as usize + 1;
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); num_buckets];
    buckets[0].push(source);

    for d in 0..num_buckets {
        // A vertex can appear in multiple buckets as its tentative distance improves; skip stale
        // entries and already-finalised vertices.
        while let Some(u) = buckets[d].pop() {
            if done[u] || dist[u] != d as i64 {
                continue;
            }
            done[u] = true;
            for &e in graph.out_edges(u) {
                let ew = weight.weight_int(e);
                debug_assert!(ew >= 0, "Dial requires non-negative integer weights");
                let v = graph.edge_endpoint(e, u);
                if done[v] {
                    continue;
                }
                let nd = dist[u] + ew;
                if nd < dist[v] {
                    dist[v] = nd;
                    backtrack[v] = e as isize;
                    let bucket = nd as usize;
                    if bucket < num_buckets {
                        buckets[bucket].push(v);
                    }
                }
            }
        }
    }

    let distances = dist
        .into_iter()
        .map(|d| if d == i64::MAX { f64::INFINITY } else { d as f64 })
        .collect();
    Ok(SsspResult::new(source, distances, backtrack))
}

/// `dialWork = n + m + maxDist`, `dijkstraWork = m + n*log2(n)` (`spec.md` §4.4 dispatch table).
#[must_use]
pub fn dial_beats_dijkstra(n: usize, m: usize, max_distance: u64) -> bool {
    let dial_work = n as f64 + m as f64 + max_distance as f64;
    let dijkstra_work = m as f64 + (n as f64) * (n.max(2) as f64).log2();
    dial_work < dijkstra_work
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_dijkstra_on_small_integer_graph() {
        let g = IndexGraph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)], true, false);
        let w = |e: usize| [1i64, 1, 5, 1][e];
        let result = compute(&g, 0, &w, 10).unwrap();
        assert_eq!(result.distances(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn dial_preferred_for_small_bounded_weights() {
        assert!(dial_beats_dijkstra(1000, 1000, 5));
        assert!(!dial_beats_dijkstra(1000, 1000, 10_000_000));
    }
}
