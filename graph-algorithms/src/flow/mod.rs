//! Flow algorithms (`spec.md` §4.10 "Max-Flow: Push-Relabel with Dynamic Trees", §4.11 "Min-Cost
//! Flow Reductions").

mod min_cost;
mod push_relabel;
mod result;

pub use result::FlowResult;

use core::hash::Hash;

use graph_core::{
    error::Result,
    graph::{Graph, IndexGraph},
    weight::WeightFunction,
};

/// Maximum flow from `source` to `sink` (`spec.md` §4.10).
pub fn max_flow<W: WeightFunction>(
    graph: &IndexGraph,
    source: usize,
    sink: usize,
    capacity: &W,
) -> Result<(FlowResult, f64)> {
    push_relabel::compute(graph, source, sink, capacity)
}

/// Min-cost max-flow from `source` to `sink` with no lower bounds or vertex supplies (`spec.md`
/// §4.11's already-reduced problem).
pub fn min_cost_max_flow<C: WeightFunction, K: WeightFunction>(
    graph: &IndexGraph,
    source: usize,
    sink: usize,
    capacity: &C,
    cost: &K,
) -> Result<(FlowResult, f64, f64)> {
    min_cost::compute(graph, source, sink, capacity, cost)
}

/// Generic-identifier maximum flow (`spec.md` §4.1's façade pattern).
pub fn max_flow_ids<V, E, C>(
    graph: &Graph<V, E>,
    source: &V,
    sink: &V,
    capacity: C,
) -> Result<(FlowResult, f64)>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
    C: Fn(&E) -> f64,
{
    let source_index = graph.vertex_index(source)?;
    let sink_index = graph.vertex_index(sink)?;
    let cap = crate::facade::index_weight_fn(graph.edge_map(), capacity);
    max_flow(graph.index_graph(), source_index, sink_index, &cap)
}

/// Generic-identifier min-cost max-flow.
pub fn min_cost_max_flow_ids<V, E, C, K>(
    graph: &Graph<V, E>,
    source: &V,
    sink: &V,
    capacity: C,
    cost: K,
) -> Result<(FlowResult, f64, f64)>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
    C: Fn(&E) -> f64,
    K: Fn(&E) -> f64,
{
    let source_index = graph.vertex_index(source)?;
    let sink_index = graph.vertex_index(sink)?;
    let cap = crate::facade::index_weight_fn(graph.edge_map(), capacity);
    let cst = crate::facade::index_weight_fn(graph.edge_map(), cost);
    min_cost_max_flow(graph.index_graph(), source_index, sink_index, &cap, &cst)
}

/// One vertex's supply (positive), demand (negative), or balance (zero) in the min-cost-flow
/// supply/demand model (`spec.md` §4.11).
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexSupply {
    pub vertex: usize,
    pub supply: f64,
}

/// Per-edge lower bound paired with its existing capacity (`spec.md` §4.11 "lower bounds").
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerBound {
    pub edge: usize,
    pub lower: f64,
}

/// Reduce a min-cost-flow instance with per-edge lower bounds and per-vertex supplies/demands to
/// a plain min-cost max-flow between a synthetic super-source and super-sink (`spec.md` §4.11):
///
/// - every edge's capacity shrinks by its lower bound, and `lower(e)` becomes a forced supply at
///   `target(e)` / demand at `source(e)`;
/// - the super-source connects to every vertex with positive net supply (capacity = that supply);
/// - the super-sink connects from every vertex with positive net demand (capacity = that demand);
/// - edges are otherwise carried over unchanged, including the caller's own `source`/`sink` if
///   this is a flow (not circulation) problem — the caller passes those through to
///   [`min_cost_max_flow`] on the returned graph as ordinary extra supply/demand of `max_supply`.
///
/// Returns the extended graph, the edge-capacity array to feed the solver, the super source and
/// sink indices, and an edge remapping so lower bounds can be added back onto the original edges'
/// reported flow (`flow(e) = reduced_flow(e) + lower(e)`).
pub struct ReducedInstance {
    pub graph: IndexGraph,
    pub capacity: Vec<f64>,
    pub cost: Vec<f64>,
    pub super_source: usize,
    pub super_sink: usize,
    pub lower_bounds: Vec<f64>,
}

pub fn reduce_with_lower_bounds_and_supplies(
    graph: &IndexGraph,
    capacity: &impl WeightFunction,
    cost: &impl WeightFunction,
    lower_bounds: &[LowerBound],
    supplies: &[VertexSupply],
) -> ReducedInstance {
    let n = graph.num_vertices();
    let m = graph.num_edges();
    let super_source = n;
    let super_sink = n + 1;

    let mut lower = vec![0.0; m];
    for lb in lower_bounds {
        lower[lb.edge] = lb.lower;
    }

    let mut net_supply = vec![0.0; n];
    for s in supplies {
        net_supply[s.vertex] += s.supply;
    }
    for e in 0..m {
        if lower[e] == 0.0 {
            continue;
        }
        let u = graph.edge_source(e);
        let v = graph.edge_target(e);
        net_supply[u] -= lower[e];
        net_supply[v] += lower[e];
    }

    let mut edges = Vec::with_capacity(m + n);
    let mut new_capacity = Vec::with_capacity(m + n);
    let mut new_cost = Vec::with_capacity(m + n);

    for e in 0..m {
        edges.push((graph.edge_source(e), graph.edge_target(e)));
        new_capacity.push((capacity.weight(e) - lower[e]).max(0.0));
        new_cost.push(cost.weight(e));
    }

    for v in 0..n {
        if net_supply[v] > 0.0 {
            edges.push((super_source, v));
            new_capacity.push(net_supply[v]);
            new_cost.push(0.0);
        } else if net_supply[v] < 0.0 {
            edges.push((v, super_sink));
            new_capacity.push(-net_supply[v]);
            new_cost.push(0.0);
        }
    }

    let extended = IndexGraph::from_edges(n + 2, &edges, true, false);

    ReducedInstance {
        graph: extended,
        capacity: new_capacity,
        cost: new_cost,
        super_source,
        super_sink,
        lower_bounds: lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_bound_forces_minimum_supply_through_a_vertex() {
        // s -> v -> t, lower bound 2 on s->v, capacity 5; expect the reduction to force at least
        // 2 units of supply from the super-source side of v's balance.
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 2)], true, false);
        let cap = |e: usize| [5.0, 5.0][e];
        let cost = |_: usize| 0.0;
        let reduced = reduce_with_lower_bounds_and_supplies(
            &g,
            &cap,
            &cost,
            &[LowerBound { edge: 0, lower: 2.0 }],
            &[],
        );
        assert_eq!(reduced.capacity[0], 3.0);
        assert_eq!(reduced.graph.num_vertices(), 5);
    }

    #[test]
    fn generic_facade_resolves_source_and_sink_by_identifier() {
        let g: Graph<&str, &str> = Graph::from_edges(
            [("s", "t", "st")],
            [],
            true,
            false,
        )
        .unwrap();
        let (_, value) = max_flow_ids(&g, &"s", &"t", |_: &&str| 4.0).unwrap();
        assert_eq!(value, 4.0);
    }
}
