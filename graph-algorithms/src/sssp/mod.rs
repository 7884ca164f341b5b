//! Single-source shortest paths (`spec.md` §4.4, "SsspCore" in §2's component table).

mod bellman_ford;
mod builder;
mod cardinality;
mod dag;
mod dial;
mod dijkstra;
mod goldberg;
mod result;

pub use bellman_ford::{cycle_as_path, NegativeCycle};
pub use builder::{Algorithm, SsspBuilder};
pub use result::SsspResult;

// Re-export the index-space kernels under their own names for callers that want to bypass the
// dispatch table and pick an algorithm directly (e.g. the bidirectional subroutine in
// `shortest_path_st`, which always wants plain Dijkstra regardless of what the builder would
// choose).
pub use bellman_ford::compute as bellman_ford_for_apsp;
pub use cardinality::compute as cardinality_bfs;
pub use dag::{compute as dag_relax, topological_order};
pub use dial::compute as dial_compute;
pub use dijkstra::compute as dijkstra_compute;
pub use goldberg::compute as goldberg_compute;

use core::hash::Hash;

use graph_core::{error::Result, graph::Graph, weight::WeightFunction};

/// The generic façade entry point (`spec.md` §4.1): resolve `source`, wrap the weight function,
/// and delegate to the dispatch table. Integer-weight kernels are only reachable here when the
/// caller also supplies `int_weight`; callers that know they only ever have real weights can use
/// [`dijkstra_compute`]/[`bellman_ford`] directly in index space instead.
pub fn compute_ids<V, E, F>(
    graph: &Graph<V, E>,
    source: &V,
    builder: SsspBuilder,
    weight: F,
) -> Result<SsspResult>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
    F: Fn(&E) -> f64,
{
    let source_index = graph.vertex_index(source)?;
    let w = crate::facade::index_weight_fn(graph.edge_map(), weight);
    let int_w = |e: usize| w.weight(e) as i64;
    builder.solve(graph.index_graph(), source_index, &w, &int_w)
}
