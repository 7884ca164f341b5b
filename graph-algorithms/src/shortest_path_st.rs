//! Bidirectional and heuristic `s -> t` shortest paths (`spec.md` §4.5, "ShortestPathSt").
//!
//! The bidirectional subroutine here is also the one [`crate::k_shortest`] reuses across its `k`
//! iterations, scratch arrays and all (`spec.md` §4.6, §5 "long-lived instances").

use core::hash::Hash;

use graph_core::{
    containers::IndexHeapDouble,
    error::{Error, Result},
    graph::{Graph, IndexGraph},
    weight::WeightFunction,
};

use error_stack::Report;

use crate::path::IndexPath;

/// Per-call scratch for one direction of the bidirectional search, kept around across repeated
/// calls (`spec.md` §4.6 "SP subroutine"). `reset` clears only indices touched by the previous
/// call via [`graph_core::containers::Dirty`]-style bookkeeping folded directly into the arrays
/// here (the heap already tracks "never inserted" natively, so a full `Dirty<T>` wrapper would be
/// redundant plumbing on top of it).
struct Side {
    dist: Vec<f64>,
    backtrack: Vec<isize>,
    heap: IndexHeapDouble,
    touched: Vec<usize>,
}

impl Side {
    fn new(n: usize) -> Self {
        Self {
            dist: vec![f64::INFINITY; n],
            backtrack: vec![-1; n],
            heap: IndexHeapDouble::new(n),
            touched: Vec::new(),
        }
    }

    fn reset(&mut self) {
        for &v in &self.touched {
            self.dist[v] = f64::INFINITY;
            self.backtrack[v] = -1;
        }
        self.touched.clear();
        self.heap.clear();
    }

    fn touch(&mut self, v: usize) {
        self.touched.push(v);
    }
}

/// A reusable bidirectional Dijkstra instance over a fixed `IndexGraph`. Construct once, call
/// [`Self::search`] up to `k` times (Yen's loop); scratch is cleared between calls rather than
/// reallocated.
pub struct Bidirectional<'g> {
    graph: &'g IndexGraph,
    forward: Side,
    backward: Side,
}

impl<'g> Bidirectional<'g> {
    #[must_use]
    pub fn new(graph: &'g IndexGraph) -> Self {
        let n = graph.num_vertices();
        Self {
            graph,
            forward: Side::new(n),
            backward: Side::new(n),
        }
    }

    /// The graph this instance was built over, for callers (e.g. `k_shortest`) that hold onto a
    /// reused instance and need the graph back out to build per-call masked weight functions.
    #[must_use]
    pub fn graph(&self) -> &'g IndexGraph {
        self.graph
    }

    /// Find the shortest `s -> t` path. Requires non-negative weights (`spec.md` §4.5
    /// correctness note).
    pub fn search<W: WeightFunction>(
        &mut self,
        s: usize,
        t: usize,
        weight: &W,
    ) -> Result<Option<IndexPath>> {
        self.forward.reset();
        self.backward.reset();

        if s == t {
            return Ok(Some(IndexPath::new(s, t, Vec::new())));
        }

        self.forward.dist[s] = 0.0;
        self.forward.touch(s);
        self.forward.heap.insert(s, 0.0);

        self.backward.dist[t] = 0.0;
        self.backward.touch(t);
        self.backward.heap.insert(t, 0.0);

        let mut best = f64::INFINITY;
        let mut meeting: Option<usize> = None;

        loop {
            let fwd_min = if self.forward.heap.is_empty() {
                None
            } else {
                self.forward.heap.extract_min()
            };
            let fwd_key = fwd_min.map(|u| self.forward.heap.key(u));

            if let Some(u) = fwd_min {
                self.relax(true, u, weight)?;
                if self.backward.dist[u].is_finite() {
                    let total = self.forward.dist[u] + self.backward.dist[u];
                    if total < best {
                        best = total;
                        meeting = Some(u);
                    }
                }
            }

            let bwd_min = if self.backward.heap.is_empty() {
                None
            } else {
                self.backward.heap.extract_min()
            };
            let bwd_key = bwd_min.map(|u| self.backward.heap.key(u));

            if let Some(u) = bwd_min {
                self.relax(false, u, weight)?;
                if self.forward.dist[u].is_finite() {
                    let total = self.forward.dist[u] + self.backward.dist[u];
                    if total < best {
                        best = total;
                        meeting = Some(u);
                    }
                }
            }

            let sum_keys = fwd_key.unwrap_or(f64::INFINITY) + bwd_key.unwrap_or(f64::INFINITY);
            if fwd_min.is_none() && bwd_min.is_none() {
                break;
            }
            if sum_keys >= best {
                break;
            }
        }

        let Some(meet) = meeting else {
            return Ok(None);
        };
        Ok(Some(self.reconstruct(s, t, meet)))
    }

    fn relax<W: WeightFunction>(&mut self, forward: bool, u: usize, weight: &W) -> Result<()> {
        let side = if forward { &mut self.forward } else { &mut self.backward };
        let du = side.dist[u];
        let edges = if forward {
            self.graph.out_edges(u)
        } else {
            self.graph.in_edges(u)
        };
        for &e in edges {
            let ew = weight.weight(e);
            if ew < 0.0 {
                return Err(Report::new(Error::NegativeEdgeWeight)
                    .attach_printable("bidirectional search requires non-negative weights"));
            }
            let v = self.graph.edge_endpoint(e, u);
            let side = if forward { &mut self.forward } else { &mut self.backward };
            let nd = du + ew;
            if side.dist[v].is_infinite() {
                side.dist[v] = nd;
                side.backtrack[v] = e as isize;
                side.touch(v);
                side.heap.insert(v, nd);
            } else if nd < side.dist[v] {
                side.dist[v] = nd;
                side.backtrack[v] = e as isize;
                if side.heap.is_inserted(v) {
                    side.heap.decrease_key(v, nd);
                }
            }
        }
        Ok(())
    }

    fn reconstruct(&self, s: usize, t: usize, meet: usize) -> IndexPath {
        let mut forward_edges = Vec::new();
        let mut cur = meet;
        while cur != s {
            let e = self.forward.backtrack[cur] as usize;
            forward_edges.push(e);
            cur = if self.graph.is_directed() {
                self.graph.edge_source(e)
            } else {
                self.graph.edge_endpoint(e, cur)
            };
        }
        forward_edges.reverse();

        let mut backward_edges = Vec::new();
        let mut cur = meet;
        while cur != t {
            let e = self.backward.backtrack[cur] as usize;
            backward_edges.push(e);
            cur = if self.graph.is_directed() {
                self.graph.edge_target(e)
            } else {
                self.graph.edge_endpoint(e, cur)
            };
        }

        forward_edges.extend(backward_edges);
        IndexPath::new(s, t, forward_edges)
    }
}

/// Generic-identifier bidirectional search (`spec.md` §4.1's façade pattern): a one-shot call,
/// unlike [`Bidirectional`] itself, which callers keep alive across repeated queries in index
/// space. `spec.md` §4.6's `k_shortest::yen_ids` does exactly that inside one [`Graph<V, E>`]
/// call already, so this wrapper targets a standalone single-query caller instead.
pub fn bidirectional_ids<V, E, W>(graph: &Graph<V, E>, s: &V, t: &V, weight: W) -> Result<Option<IndexPath>>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
    W: Fn(&E) -> f64,
{
    let s_index = graph.vertex_index(s)?;
    let t_index = graph.vertex_index(t)?;
    let w = crate::facade::index_weight_fn(graph.edge_map(), weight);
    Bidirectional::new(graph.index_graph()).search(s_index, t_index, &w)
}

/// Generic-identifier A*; `heuristic` is keyed by vertex identifier.
pub fn a_star_ids<V, E, W, H>(
    graph: &Graph<V, E>,
    s: &V,
    t: &V,
    weight: W,
    heuristic: H,
) -> Result<Option<IndexPath>>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
    W: Fn(&E) -> f64,
    H: Fn(&V) -> f64,
{
    let s_index = graph.vertex_index(s)?;
    let t_index = graph.vertex_index(t)?;
    let w = crate::facade::index_weight_fn(graph.edge_map(), weight);
    let vertex_map = graph.vertex_map();
    let h = |v: usize| {
        vertex_map
            .index_to_id(v)
            .map_or(0.0, |id| heuristic(id))
    };
    a_star(graph.index_graph(), s_index, t_index, &w, h)
}

/// A* (`spec.md` §4.5): forward Dijkstra where the priority of `v` is `dist[v] + h(v)`.
/// Admissibility of `h` is the caller's responsibility; this terminates as soon as `t` is
/// extracted.
pub fn a_star<W, H>(graph: &IndexGraph, s: usize, t: usize, weight: &W, heuristic: H) -> Result<Option<IndexPath>>
where
    W: WeightFunction,
    H: Fn(usize) -> f64,
{
    let n = graph.num_vertices();
    let mut dist = vec![f64::INFINITY; n];
    let mut backtrack = vec![-1isize; n];
    let mut heap = IndexHeapDouble::new(n);

    dist[s] = 0.0;
    heap.insert(s, heuristic(s));

    while let Some(u) = heap.extract_min() {
        if u == t {
            let mut edges = Vec::new();
            let mut cur = t;
            while cur != s {
                let e = backtrack[cur] as usize;
                edges.push(e);
                cur = if graph.is_directed() {
                    graph.edge_source(e)
                } else {
                    graph.edge_endpoint(e, cur)
                };
            }
            edges.reverse();
            return Ok(Some(IndexPath::new(s, t, edges)));
        }
        for &e in graph.out_edges(u) {
            let ew = weight.weight(e);
            if ew < 0.0 {
                return Err(Report::new(Error::NegativeEdgeWeight)
                    .attach_printable("A* requires non-negative weights"));
            }
            let v = graph.edge_endpoint(e, u);
            let nd = dist[u] + ew;
            if nd < dist[v] {
                dist[v] = nd;
                backtrack[v] = e as isize;
                let priority = nd + heuristic(v);
                if heap.was_extracted(v) {
                    continue;
                }
                if heap.is_inserted(v) {
                    heap.decrease_key(v, priority);
                } else {
                    heap.insert(v, priority);
                }
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_core::weight::CardinalityWeightFunction;

    #[test]
    fn bidirectional_finds_shortest_path_on_diamond() {
        let g = IndexGraph::from_edges(4, &[(0, 1), (0, 2), (1, 3), (2, 3)], false, false);
        let w = |e: usize| [1.0, 2.0, 2.0, 1.0][e];
        let mut bidir = Bidirectional::new(&g);
        let path = bidir.search(0, 3, &w).unwrap().unwrap();
        assert_eq!(path.total_weight(w), 2.0);
    }

    #[test]
    fn bidirectional_instance_is_reusable() {
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 2)], true, false);
        let mut bidir = Bidirectional::new(&g);
        let p1 = bidir.search(0, 2, &CardinalityWeightFunction).unwrap().unwrap();
        assert_eq!(p1.edges(), &[0, 1]);
        let p2 = bidir.search(0, 1, &CardinalityWeightFunction).unwrap().unwrap();
        assert_eq!(p2.edges(), &[0]);
    }

    #[test]
    fn a_star_with_zero_heuristic_matches_dijkstra() {
        let g = IndexGraph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)], true, false);
        let w = |e: usize| [1.0, 1.0, 5.0, 1.0][e];
        let path = a_star(&g, 0, 3, &w, |_| 0.0).unwrap().unwrap();
        assert_eq!(path.total_weight(w), 3.0);
    }

    #[test]
    fn generic_facade_finds_path_by_identifier() {
        let g: Graph<&str, &str> = Graph::from_edges(
            [("s", "m", "sm"), ("m", "t", "mt")],
            [],
            true,
            false,
        )
        .unwrap();
        let path = bidirectional_ids(&g, &"s", &"t", |_: &&str| 1.0).unwrap().unwrap();
        assert_eq!(path.edges().len(), 2);
    }
}
