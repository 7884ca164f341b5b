//! DAG shortest paths (`spec.md` §4.4): topological relaxation, selected when the builder knows
//! the input is acyclic. One linear pass after a Kahn topological sort; negative weights are fine
//! here since there are no cycles to go unstable on.

use graph_core::{
    error::{Error, Result},
    graph::IndexGraph,
    weight::WeightFunction,
};

use error_stack::Report;

use super::result::SsspResult;

/// Kahn's algorithm; `Err(GraphDirectionality)` if the graph is undirected (topological order is
/// undefined) or a cycle is found.
pub fn topological_order(graph: &IndexGraph) -> Result<Vec<usize>> {
    if !graph.is_directed() {
        return Err(Report::new(Error::GraphDirectionality)
            .attach_printable("topological order requires a directed graph"));
    }
    let n = graph.num_vertices();
    let mut in_degree: Vec<usize> = (0..n).map(|v| graph.in_edges(v).len()).collect();
    let mut queue: std::collections::VecDeque<usize> = (0..n)
        .filter(|&v| in_degree[v] == 0)
        .collect();
    let mut order = Vec::with_capacity(n);

    while let Some(u) = queue.pop_front() {
        order.push(u);
        for &e in graph.out_edges(u) {
            let v = graph.edge_target(e);
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                queue.push_back(v);
            }
        }
    }

    if order.len() != n {
        return Err(Report::new(Error::GraphDirectionality)
            .attach_printable("graph is not a DAG: a cycle was found"));
    }
    Ok(order)
}

pub fn compute<W: WeightFunction>(
    graph: &IndexGraph,
    source: usize,
    weight: &W,
) -> Result<SsspResult> {
    let order = topological_order(graph)?;
    let n = graph.num_vertices();
    let mut dist = vec![f64::INFINITY; n];
    let mut backtrack = vec![-1isize; n];
    dist[source] = 0.0;

    let start = order.iter().position(|&v| v == source).unwrap_or(0);
    for &u in &order[start..] {
        if dist[u].is_infinite() {
            continue;
        }
        for &e in graph.out_edges(u) {
            let v = graph.edge_target(e);
            let nd = dist[u] + weight.weight(e);
            if nd < dist[v] {
                dist[v] = nd;
                backtrack[v] = e as isize;
            }
        }
    }

    Ok(SsspResult::new(source, dist, backtrack))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_path_over_a_diamond_dag() {
        let g = IndexGraph::from_edges(4, &[(0, 1), (0, 2), (1, 3), (2, 3)], true, false);
        let w = |e: usize| [1.0, 5.0, 1.0, 1.0][e];
        let result = compute(&g, 0, &w).unwrap();
        assert_eq!(result.distance(3), 2.0);
    }

    #[test]
    fn cyclic_graph_is_rejected() {
        let g = IndexGraph::from_edges(2, &[(0, 1), (1, 0)], true, false);
        assert!(topological_order(&g).is_err());
    }
}
