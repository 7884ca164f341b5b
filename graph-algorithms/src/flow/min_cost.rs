//! Min-cost flow via successive shortest augmenting paths with Johnson potentials (`spec.md`
//! §4.11's reduced problem, after the lower-bound/supply reduction in [`super::reduction`] has
//! collapsed everything to a single super-source/super-sink min-cost *max*-flow).
//!
//! One Bellman-Ford pass establishes initial potentials (tolerating the negative-cost edges a
//! supply reduction introduces); every augmentation after that reruns Dijkstra over non-negative
//! reduced costs and folds the shortest-path distances back into the potentials, the same
//! Bellman-Ford-then-Dijkstra handoff `sssp::goldberg` uses for negative integer weights.

use std::collections::BinaryHeap;
use std::cmp::Ordering;

use graph_core::{
    error::{Error, Result},
    graph::IndexGraph,
    weight::WeightFunction,
};

use error_stack::Report;

use super::result::FlowResult;

const EPS: f64 = 1e-9;

struct Network {
    n: usize,
    from: Vec<usize>,
    to: Vec<usize>,
    cap: Vec<f64>,
    cost: Vec<f64>,
    original_cap: Vec<f64>,
    out_arcs: Vec<Vec<usize>>,
}

impl Network {
    fn build<C: WeightFunction, K: WeightFunction>(graph: &IndexGraph, capacity: &C, cost: &K) -> Self {
        let n = graph.num_vertices();
        let m = graph.num_edges();
        let mut from = Vec::with_capacity(2 * m);
        let mut to = Vec::with_capacity(2 * m);
        let mut cap = Vec::with_capacity(2 * m);
        let mut carr = Vec::with_capacity(2 * m);
        let mut original_cap = Vec::with_capacity(m);
        let mut out_arcs = vec![Vec::new(); n];

        for e in 0..m {
            let u = graph.edge_source(e);
            let v = graph.edge_target(e);
            let c = capacity.weight(e).max(0.0);
            let w = cost.weight(e);
            original_cap.push(c);

            let fwd = from.len();
            from.push(u);
            to.push(v);
            cap.push(c);
            carr.push(w);
            out_arcs[u].push(fwd);

            let bwd = from.len();
            from.push(v);
            to.push(u);
            cap.push(0.0);
            carr.push(-w);
            out_arcs[v].push(bwd);
        }

        Self {
            n,
            from,
            to,
            cap,
            cost: carr,
            original_cap,
            out_arcs,
        }
    }
}

#[derive(PartialEq)]
struct HeapEntry {
    dist: f64,
    vertex: usize,
}
impl Eq for HeapEntry {}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.dist.partial_cmp(&self.dist).unwrap_or(Ordering::Equal)
    }
}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bellman-Ford shortest distances from `source` over arcs with positive residual capacity,
/// used once to seed potentials. Errors if a negative cycle survives among those arcs (it
/// shouldn't, for a correctly-built reduction: only forward arcs carry nonzero residual capacity
/// at this point, and their costs come from the caller's acyclic supply structure).
fn bellman_ford_potentials(net: &Network, source: usize) -> Result<Vec<f64>> {
    let mut dist = vec![f64::INFINITY; net.n];
    dist[source] = 0.0;
    for _ in 0..net.n {
        let mut changed = false;
        for u in 0..net.n {
            if dist[u].is_infinite() {
                continue;
            }
            for &arc in &net.out_arcs[u] {
                if net.cap[arc] <= EPS {
                    continue;
                }
                let v = net.to[arc];
                let nd = dist[u] + net.cost[arc];
                if nd < dist[v] - EPS {
                    dist[v] = nd;
                    changed = true;
                }
            }
        }
        if !changed {
            return Ok(dist.into_iter().map(|d| if d.is_infinite() { 0.0 } else { d }).collect());
        }
    }
    Err(Report::new(Error::NegativeCycle)
        .attach_printable("min-cost flow reduction contains a negative cost cycle"))
}

/// Dijkstra over reduced costs `cost[arc] + potential[from] - potential[to] >= 0`. Returns
/// distances (in reduced-cost space) and the arc used to reach each vertex.
fn dijkstra_reduced(net: &Network, source: usize, potential: &[f64]) -> (Vec<f64>, Vec<isize>) {
    let mut dist = vec![f64::INFINITY; net.n];
    let mut parent_arc = vec![-1isize; net.n];
    let mut visited = vec![false; net.n];
    dist[source] = 0.0;
    let mut heap = BinaryHeap::new();
    heap.push(HeapEntry { dist: 0.0, vertex: source });

    while let Some(HeapEntry { dist: d, vertex: u }) = heap.pop() {
        if visited[u] {
            continue;
        }
        visited[u] = true;
        if d > dist[u] + EPS {
            continue;
        }
        for &arc in &net.out_arcs[u] {
            if net.cap[arc] <= EPS {
                continue;
            }
            let v = net.to[arc];
            let reduced = net.cost[arc] + potential[u] - potential[v];
            let nd = dist[u] + reduced.max(0.0);
            if nd < dist[v] - EPS {
                dist[v] = nd;
                parent_arc[v] = arc as isize;
                heap.push(HeapEntry { dist: nd, vertex: v });
            }
        }
    }
    (dist, parent_arc)
}

/// Min-cost max-flow from `source` to `sink` (`spec.md` §4.11's reduced, lower-bound-free
/// problem). Returns the flow result, the total flow value, and its total cost.
pub fn compute<C: WeightFunction, K: WeightFunction>(
    graph: &IndexGraph,
    source: usize,
    sink: usize,
    capacity: &C,
    cost: &K,
) -> Result<(FlowResult, f64, f64)> {
    let mut net = Network::build(graph, capacity, cost);
    let mut potential = bellman_ford_potentials(&net, source)?;

    let mut total_flow = 0.0;
    let mut total_cost = 0.0;

    loop {
        let (dist, parent_arc) = dijkstra_reduced(&net, source, &potential);
        if dist[sink].is_infinite() {
            break;
        }
        for v in 0..net.n {
            if dist[v].is_finite() {
                potential[v] += dist[v];
            }
        }

        let mut bottleneck = f64::INFINITY;
        let mut v = sink;
        while v != source {
            let arc = parent_arc[v] as usize;
            bottleneck = bottleneck.min(net.cap[arc]);
            v = net.from[arc];
        }
        if bottleneck <= EPS {
            break;
        }

        let mut path_cost = 0.0;
        let mut v = sink;
        while v != source {
            let arc = parent_arc[v] as usize;
            path_cost += net.cost[arc];
            net.cap[arc] -= bottleneck;
            net.cap[arc ^ 1] += bottleneck;
            v = net.from[arc];
        }

        total_flow += bottleneck;
        total_cost += bottleneck * path_cost;
    }

    let mut flow = Vec::with_capacity(net.original_cap.len());
    for e in 0..net.original_cap.len() {
        flow.push(net.cap[2 * e + 1]);
    }

    Ok((FlowResult::new(flow, net.original_cap, total_flow), total_flow, total_cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_through_the_cheaper_of_two_equal_capacity_paths() {
        // s->a->t (cost 1 each), s->b->t (cost 5 each), all capacities 1.
        let g = IndexGraph::from_edges(4, &[(0, 1), (1, 3), (0, 2), (2, 3)], true, false);
        let cap = |_: usize| 1.0;
        let cost = |e: usize| [1.0, 1.0, 5.0, 5.0][e];
        let (_, flow, total_cost) = compute(&g, 0, 3, &cap, &cost).unwrap();
        assert_eq!(flow, 2.0);
        assert_eq!(total_cost, 2.0 + 10.0);
    }

    #[test]
    fn single_edge_costed_flow() {
        let g = IndexGraph::from_edges(2, &[(0, 1)], true, false);
        let cap = |_: usize| 3.0;
        let cost = |_: usize| 2.0;
        let (result, flow, total_cost) = compute(&g, 0, 1, &cap, &cost).unwrap();
        assert_eq!(flow, 3.0);
        assert_eq!(total_cost, 6.0);
        assert_eq!(result.flow(0), 3.0);
    }
}
