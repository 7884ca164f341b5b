//! Minimum-mean cycle via Howard's policy iteration (`spec.md` §4.9, "CycleCore" in §2's
//! component table).
//!
//! The mean weight of a cycle is its total weight divided by its length; the minimum-mean cycle
//! is the one minimising that ratio over every cycle in the graph. Self-loops are their own
//! 1-vertex cycle and are checked directly; every other candidate lives inside a single strongly
//! connected component, so the search runs once per nontrivial SCC.

use core::hash::Hash;
use std::collections::{HashMap, VecDeque};

use graph_core::{
    graph::{Graph, IndexGraph},
    weight::WeightFunction,
};

use crate::connectivity::strong;

const EPS: f64 = 1e-4;

/// A cycle together with its mean weight (`spec.md` §8 "Min-mean-cycle optimality").
#[derive(Debug, Clone)]
pub struct MinMeanCycle {
    mean: f64,
    edges: Vec<usize>,
}

impl MinMeanCycle {
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[must_use]
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }
}

/// The cycle of minimum mean weight in the whole graph, or `None` if the graph is acyclic.
#[must_use]
pub fn compute<W: WeightFunction>(graph: &IndexGraph, weight: &W) -> Option<MinMeanCycle> {
    let mut best: Option<MinMeanCycle> = None;
    let mut consider = |candidate: MinMeanCycle, best: &mut Option<MinMeanCycle>| {
        if best.as_ref().map_or(true, |b| candidate.mean < b.mean) {
            *best = Some(candidate);
        }
    };

    if graph.is_allow_self_edges() {
        for e in 0..graph.num_edges() {
            if graph.edge_source(e) == graph.edge_target(e) {
                let w = weight.weight(e);
                consider(MinMeanCycle { mean: w, edges: vec![e] }, &mut best);
            }
        }
    }

    let component = strong::compute(graph);
    let num_components = component.iter().copied().max().map_or(0, |m| m + 1);

    for comp in 0..num_components {
        let locals: Vec<usize> = (0..graph.num_vertices()).filter(|&v| component[v] == comp).collect();
        if locals.len() < 2 {
            continue;
        }
        if let Some(found) = policy_iteration(graph, weight, &locals) {
            consider(found, &mut best);
        }
    }

    best
}

/// Generic-identifier minimum-mean cycle (`spec.md` §4.1's façade pattern). The returned cycle's
/// edges stay index-space, same as [`compute`]'s does.
#[must_use]
pub fn compute_ids<V, E, F>(graph: &Graph<V, E>, weight: F) -> Option<MinMeanCycle>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
    F: Fn(&E) -> f64,
{
    let w = crate::facade::index_weight_fn(graph.edge_map(), weight);
    compute(graph.index_graph(), &w)
}

/// Howard's policy iteration restricted to one strongly connected component, addressed by local
/// indices `0..locals.len()` for cache-friendly bookkeeping.
fn policy_iteration<W: WeightFunction>(graph: &IndexGraph, weight: &W, locals: &[usize]) -> Option<MinMeanCycle> {
    let k = locals.len();
    let mut local_of = HashMap::with_capacity(k);
    for (i, &v) in locals.iter().enumerate() {
        local_of.insert(v, i);
    }

    let mut arcs: Vec<(usize, usize, f64, usize)> = Vec::new();
    for e in 0..graph.num_edges() {
        let s = graph.edge_source(e);
        let t = graph.edge_target(e);
        if s == t {
            continue;
        }
        let (Some(&ls), Some(&lt)) = (local_of.get(&s), local_of.get(&t)) else {
            continue;
        };
        let w = weight.weight(e);
        arcs.push((ls, lt, w, e));
        if !graph.is_directed() {
            arcs.push((lt, ls, w, e));
        }
    }
    if arcs.is_empty() {
        return None;
    }

    let mut y = vec![f64::INFINITY; k];
    let mut policy: Vec<Option<(usize, f64, usize)>> = vec![None; k];
    for &(u, v, w, e) in &arcs {
        if w < y[u] {
            y[u] = w;
            policy[u] = Some((v, w, e));
        }
    }
    if policy.iter().any(Option::is_none) {
        // a vertex with no internal out-arc can't be in the SCC's induced subgraph; shouldn't
        // happen for a genuine SCC of size >= 2, but bail out rather than panic.
        return None;
    }

    loop {
        let (best_mean, best_vertex) = find_best_policy_cycle(&policy, k)?;
        crate::phase_event!(best_mean, best_vertex, "howard: policy improvement");

        let mut reverse: Vec<Vec<usize>> = vec![Vec::new(); k];
        for u in 0..k {
            if let Some((v, _, _)) = policy[u] {
                reverse[v].push(u);
            }
        }
        let mut visited = vec![false; k];
        let mut queue = VecDeque::new();
        visited[best_vertex] = true;
        queue.push_back(best_vertex);
        while let Some(v) = queue.pop_front() {
            for &u in &reverse[v] {
                if visited[u] {
                    continue;
                }
                visited[u] = true;
                let (_, w, _) = policy[u].unwrap();
                y[u] += w - best_mean;
                queue.push_back(u);
            }
        }

        let mut improved = false;
        for &(u, v, w, e) in &arcs {
            let candidate = y[v] + w - best_mean;
            if candidate < y[u] - EPS {
                y[u] = candidate;
                policy[u] = Some((v, w, e));
                improved = true;
            }
        }
        if !improved {
            return Some(reconstruct_cycle(&policy, best_vertex, k));
        }
    }
}

fn find_best_policy_cycle(policy: &[Option<(usize, f64, usize)>], k: usize) -> Option<(f64, usize)> {
    let mut visit_iter = vec![0usize; k];
    let mut order = vec![0usize; k];
    let mut current_iter = 0usize;
    let mut best: Option<(f64, usize)> = None;

    for start in 0..k {
        if visit_iter[start] != 0 {
            continue;
        }
        current_iter += 1;
        let mut path = Vec::new();
        let mut v = start;
        while visit_iter[v] == 0 {
            visit_iter[v] = current_iter;
            order[v] = path.len();
            path.push(v);
            v = policy[v].unwrap().0;
        }
        if visit_iter[v] == current_iter {
            let cycle = &path[order[v]..];
            let total: f64 = cycle.iter().map(|&u| policy[u].unwrap().1).sum();
            let mean = total / cycle.len() as f64;
            if best.map_or(true, |(bm, _)| mean < bm) {
                best = Some((mean, v));
            }
        }
    }
    best
}

fn reconstruct_cycle(policy: &[Option<(usize, f64, usize)>], start: usize, k: usize) -> MinMeanCycle {
    let mut seen_pos = HashMap::new();
    let mut v = start;
    let mut seq = Vec::new();
    loop {
        if let Some(&pos) = seen_pos.get(&v) {
            let cycle = &seq[pos..];
            let edges: Vec<usize> = cycle.iter().map(|&u: &usize| policy[u].unwrap().2).collect();
            let total: f64 = cycle.iter().map(|&u: &usize| policy[u].unwrap().1).sum();
            return MinMeanCycle { mean: total / cycle.len() as f64, edges };
        }
        if seq.len() > k {
            v = start;
            seen_pos.clear();
            seq.clear();
            continue;
        }
        seen_pos.insert(v, seq.len());
        seq.push(v);
        v = policy[v].unwrap().0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_loop_is_its_own_cycle() {
        let g = IndexGraph::from_edges(2, &[(0, 0), (0, 1)], true, true);
        let w = |e: usize| [-3.0, 1.0][e];
        let found = compute(&g, &w).unwrap();
        assert_eq!(found.mean(), -3.0);
        assert_eq!(found.edges(), &[0]);
    }

    #[test]
    fn acyclic_graph_has_no_minimum_mean_cycle() {
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 2)], true, false);
        let w = graph_core::weight::CardinalityWeightFunction;
        assert!(compute(&g, &w).is_none());
    }

    #[test]
    fn triangle_mean_is_the_average_edge_weight() {
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 2), (2, 0)], true, false);
        let w = |e: usize| [3.0, 3.0, 3.0][e];
        let found = compute(&g, &w).unwrap();
        assert!((found.mean() - 3.0).abs() < 1e-6);
        assert_eq!(found.edges().len(), 3);
    }

    /// Two directed cycles sharing a vertex: a cheap 2-cycle and an expensive 3-cycle. The
    /// minimum mean must be the cheap one, not an average across both.
    #[test]
    fn prefers_the_cheaper_of_two_cycles_through_a_shared_vertex() {
        let g = IndexGraph::from_edges(
            4,
            &[(0, 1), (1, 0), (1, 2), (2, 3), (3, 1)],
            true,
            false,
        );
        let w = |e: usize| [1.0, 1.0, 10.0, 10.0, 10.0][e];
        let found = compute(&g, &w).unwrap();
        assert!((found.mean() - 1.0).abs() < 1e-6);
    }

    /// `spec.md` §8 scenario 6: min-mean cycle `0->1->2->0` has mean 2, beating the `1<->3` 2-cycle
    /// of mean 5.
    #[test]
    fn scenario_six_prefers_the_triangle_over_the_heavier_two_cycle() {
        let g = IndexGraph::from_edges(
            4,
            &[(0, 1), (1, 2), (2, 0), (1, 3), (3, 1)],
            true,
            false,
        );
        let w = |e: usize| [2.0, 2.0, 2.0, 5.0, 5.0][e];
        let found = compute(&g, &w).unwrap();
        assert!((found.mean() - 2.0).abs() < 1e-6);
        assert_eq!(found.edges().len(), 3);
    }

    #[test]
    fn generic_facade_matches_index_space_result() {
        let g: Graph<&str, &str> = Graph::from_edges(
            [("a", "b", "ab"), ("b", "c", "bc"), ("c", "a", "ca")],
            [],
            true,
            false,
        )
        .unwrap();
        let w = |edge: &&str| match *edge {
            "ab" => 3.0,
            "bc" => 3.0,
            _ => 3.0,
        };
        let found = compute_ids(&g, w).unwrap();
        assert!((found.mean() - 3.0).abs() < 1e-6);
        assert_eq!(found.edges().len(), 3);
    }
}
