//! Maximum flow via the push-relabel method with the dynamic-tree speedup (`spec.md` §4.10).
//!
//! A discharge that finds an admissible arc either pushes a single unit of flow along it, or
//! (when the combined size of the two trees stays within `max(1, n^2/m)`) links the discharged
//! vertex under its neighbour in a [`graph_core::dynamic_tree::DynamicTree`] forest and drains its
//! excess in one root-ward `find_min_edge`/`add_weight` sweep, cutting every edge the sweep
//! saturates on the way (`spec.md` §4.10's "Discharge active vertex u"). A relabel first cuts
//! every tree child of the relabelled vertex, since the height step that just changed breaks the
//! admissibility every such child's tree edge was linked under.
//!
//! Tree edges are not mirrored back into the plain residual arrays (`Network::cap`) while they're
//! live — only at the point they're cut — so a push along an arc whose current residual lives
//! inside the tree (because its reverse is someone's live tree edge) reads and writes that residual
//! through [`DynamicTree::edge_weight`]/`add_weight` instead of `Network::cap` directly
//! ([`State::effective_cap`]). Every vertex this module discharges is, at the moment it's
//! discharged, necessarily a tree root: a vertex only carries positive excess while it has no tree
//! parent (a linked child always has its excess fully drained by the link's own push-and-cut
//! sweep), so `DynamicTree::link`'s "u must be a root" precondition is always met without an
//! explicit check.
//!
//! Each discharged vertex's children hang off an intrusive doubly linked list
//! (`graph_core::containers::LinkedListFixedSize`) so a relabel's "cut all children" step is
//! O(children) instead of a scan over every vertex.

use std::collections::VecDeque;

use graph_core::{
    containers::LinkedListFixedSize, dynamic_tree::DynamicTree, error::Result, graph::IndexGraph,
    weight::WeightFunction,
};

use super::result::FlowResult;

const EPS: f64 = 1e-9;

/// The doubled forward/twin-residual arc network (`spec.md` §4.10 "double the edge set").
struct Network {
    n: usize,
    from: Vec<usize>,
    to: Vec<usize>,
    cap: Vec<f64>,
    original_cap: Vec<f64>,
    out_arcs: Vec<Vec<usize>>,
    in_arcs: Vec<Vec<usize>>,
}

impl Network {
    fn build<W: WeightFunction>(graph: &IndexGraph, capacity: &W) -> Self {
        let n = graph.num_vertices();
        let m = graph.num_edges();
        let mut from = Vec::with_capacity(2 * m);
        let mut to = Vec::with_capacity(2 * m);
        let mut cap = Vec::with_capacity(2 * m);
        let mut original_cap = Vec::with_capacity(m);
        let mut out_arcs = vec![Vec::new(); n];
        let mut in_arcs = vec![Vec::new(); n];

        for e in 0..m {
            let u = graph.edge_source(e);
            let v = graph.edge_target(e);
            let c = capacity.weight(e).max(0.0);
            original_cap.push(c);

            let fwd = from.len();
            from.push(u);
            to.push(v);
            cap.push(c);
            out_arcs[u].push(fwd);
            in_arcs[v].push(fwd);

            let bwd = from.len();
            from.push(v);
            to.push(u);
            cap.push(0.0);
            out_arcs[v].push(bwd);
            in_arcs[u].push(bwd);
        }

        Self {
            n,
            from,
            to,
            cap,
            original_cap,
            out_arcs,
            in_arcs,
        }
    }

    fn push(&mut self, arc: usize, delta: f64) {
        self.cap[arc] -= delta;
        self.cap[arc ^ 1] += delta;
    }
}

/// Reverse-BFS from `sink` over arcs with positive residual capacity, giving every vertex its
/// exact distance to the sink in the residual graph (`spec.md` §4.10 "global relabel"). Only valid
/// to call while no tree edge is live, since it reads `net.cap` directly.
fn global_relabel(net: &Network, sink: usize) -> Vec<usize> {
    let mut height = vec![usize::MAX; net.n];
    height[sink] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(sink);
    while let Some(y) = queue.pop_front() {
        for &arc in &net.in_arcs[y] {
            if net.cap[arc] <= EPS {
                continue;
            }
            let x = net.from[arc];
            if height[x] == usize::MAX {
                height[x] = height[y] + 1;
                queue.push_back(x);
            }
        }
    }
    height
}

/// Discharge state: the residual network, labels/excess/current-arc, the active-vertex FIFO, and
/// the dynamic-tree forest plus its bookkeeping (`spec.md` §4.2's `DynamicTree`, §4.10's "discharge
/// active vertex").
struct State {
    net: Network,
    source: usize,
    sink: usize,
    height: Vec<usize>,
    excess: Vec<f64>,
    cur: Vec<usize>,
    queued: Vec<bool>,
    active: VecDeque<usize>,
    dt: DynamicTree,
    /// `tree_arc[v] = Some(arc)` iff `v` is currently a dynamic-tree child, linked to its parent
    /// through network arc `arc` (`arc`'s source is always `v`).
    tree_arc: Vec<Option<usize>>,
    children: LinkedListFixedSize,
    children_head: Vec<Option<usize>>,
    /// `max(1, n^2/m)` (`spec.md` §4.10): the combined tree size above which a discharge falls
    /// back to a plain single-edge push instead of linking.
    tree_limit: usize,
}

impl State {
    fn new(net: Network, source: usize, sink: usize, height: Vec<usize>) -> Self {
        let n = net.n;
        let m = net.original_cap.len().max(1);
        let tree_limit = ((n * n) as f64 / m as f64).max(1.0) as usize;
        Self {
            net,
            source,
            sink,
            height,
            excess: vec![0.0; n],
            cur: vec![0; n],
            queued: vec![false; n],
            active: VecDeque::new(),
            dt: DynamicTree::with_capacity(n),
            tree_arc: vec![None; n],
            children: LinkedListFixedSize::new(n),
            children_head: vec![None; n],
            tree_limit,
        }
    }

    fn activate(&mut self, v: usize) {
        if v == self.source || v == self.sink {
            return;
        }
        if !self.queued[v] {
            self.queued[v] = true;
            self.active.push_back(v);
        }
    }

    /// The residual capacity of `arc` as it actually stands right now: if `arc` (or its reverse,
    /// the paired residual direction) is a live tree edge, that edge's [`DynamicTree`] weight is
    /// the source of truth instead of `Network::cap`, which only catches up when the edge is cut.
    fn effective_cap(&mut self, arc: usize) -> f64 {
        let x = self.net.from[arc];
        if self.tree_arc[x] == Some(arc) {
            return self.dt.edge_weight(x);
        }
        let y = self.net.to[arc];
        if self.tree_arc[y] == Some(arc ^ 1) {
            let pair = arc / 2;
            return self.net.original_cap[pair] - self.dt.edge_weight(y);
        }
        self.net.cap[arc]
    }

    /// Link `child` under `parent` via `arc` (`child = net.from[arc]`), recording it in both the
    /// dynamic-tree forest and the explicit children list a relabel walks to cut them.
    fn link_child(&mut self, child: usize, parent: usize, arc: usize, weight: f64) {
        self.dt.link(child, parent, weight);
        self.tree_arc[child] = Some(arc);
        self.children_head[parent] =
            Some(self.children.push_front(self.children_head[parent], child));
    }

    /// Detach `child` from its dynamic-tree parent and write the edge's true current residual
    /// back into `Network::cap` (`spec.md` §4.10 "cut saturated edges on the way" and the relabel
    /// step's "cut all children"; the edge need not be fully saturated in the latter case).
    fn cut_child(&mut self, child: usize) {
        let arc = self.tree_arc[child]
            .take()
            .expect("cut_child requires a linked child");
        let w = self.dt.edge_weight(child).max(0.0);
        self.dt.cut(child);
        let parent = self.net.to[arc];
        self.children_head[parent] = self.children.remove(self.children_head[parent], child);
        let pair = arc / 2;
        self.net.cap[arc] = w;
        self.net.cap[arc ^ 1] = (self.net.original_cap[pair] - w).max(0.0);
    }

    fn cut_all_children(&mut self, u: usize) {
        while let Some(child) = self.children_head[u] {
            self.cut_child(child);
        }
    }

    /// Push flow of `delta` along `arc`, whether or not its residual is currently tracked by the
    /// dynamic tree (through the reverse arc being some vertex's live tree edge).
    fn apply_single_push(&mut self, arc: usize, delta: f64) {
        let y = self.net.to[arc];
        if self.tree_arc[y] == Some(arc ^ 1) {
            self.dt.add_weight(y, -delta);
        } else {
            self.net.push(arc, delta);
        }
    }

    /// `spec.md` §4.10: "When linked, push up to the min-edge of the tree root, cut saturated
    /// edges on the way." Drains `u`'s excess one root-ward bottleneck at a time until either `u`
    /// runs out of excess or becomes a root itself (no edge left above it).
    fn push_and_cut(&mut self, u: usize) {
        while self.excess[u] > EPS {
            let root = self.dt.find_root(u);
            let Some((bottleneck, bottleneck_w)) = self.dt.find_min_edge(u) else {
                break;
            };
            let d = self.excess[u].min(bottleneck_w);
            self.dt.add_weight(u, -d);
            self.excess[u] -= d;
            self.excess[root] += d;
            self.activate(root);
            if bottleneck_w - d <= EPS {
                self.cut_child(bottleneck);
            }
        }
    }

    fn discharge(&mut self, u: usize) {
        let degree = self.net.out_arcs[u].len();
        while self.excess[u] > EPS {
            if self.cur[u] == degree {
                self.cut_all_children(u);
                let mut min_height = usize::MAX;
                for i in 0..degree {
                    let arc = self.net.out_arcs[u][i];
                    if self.effective_cap(arc) > EPS {
                        min_height = min_height.min(self.height[self.net.to[arc]]);
                    }
                }
                if min_height == usize::MAX {
                    break; // no residual out-arcs at all; excess is stuck (shouldn't happen pre-sink cut)
                }
                self.height[u] = min_height + 1;
                crate::phase_event!(vertex = u, new_height = self.height[u], "push-relabel: relabel");
                self.cur[u] = 0;
                continue;
            }
            let arc = self.net.out_arcs[u][self.cur[u]];
            let v = self.net.to[arc];
            let cap = self.effective_cap(arc);
            if cap > EPS && self.height[u] == self.height[v] + 1 {
                if self.dt.tree_size(u) + self.dt.tree_size(v) <= self.tree_limit {
                    self.link_child(u, v, arc, cap);
                    crate::phase_event!(vertex = u, parent = v, "push-relabel: link");
                    self.push_and_cut(u);
                } else {
                    let delta = self.excess[u].min(cap);
                    self.apply_single_push(arc, delta);
                    self.excess[u] -= delta;
                    self.excess[v] += delta;
                    self.activate(v);
                }
            } else {
                self.cur[u] += 1;
            }
        }
    }

    /// Cut every tree edge still live once the active queue has drained, so the final read-off of
    /// `Network::cap` (every tree edge's true residual only gets written back on cut) is accurate.
    fn flatten(&mut self) {
        for v in 0..self.net.n {
            if self.tree_arc[v].is_some() {
                self.cut_child(v);
            }
        }
    }
}

/// Run push-relabel max-flow from `source` to `sink`. `capacity` must be non-negative; negative
/// inputs are clamped to zero rather than rejected, since a zero-capacity edge simply never
/// carries flow.
pub fn compute<W: WeightFunction>(
    graph: &IndexGraph,
    source: usize,
    sink: usize,
    capacity: &W,
) -> Result<(FlowResult, f64)> {
    let net = Network::build(graph, capacity);
    let n = net.n;
    let mut height = global_relabel(&net, sink);
    height[source] = n;

    let mut state = State::new(net, source, sink, height);

    for arc_idx in 0..state.net.out_arcs[source].len() {
        let arc = state.net.out_arcs[source][arc_idx];
        let c = state.net.cap[arc];
        if c <= EPS {
            continue;
        }
        let v = state.net.to[arc];
        state.net.push(arc, c);
        state.excess[v] += c;
        state.excess[source] -= c;
        state.activate(v);
    }

    while let Some(u) = state.active.pop_front() {
        state.queued[u] = false;
        state.discharge(u);
    }

    state.flatten();

    let value = state.excess[sink];
    let m = state.net.original_cap.len();
    let mut flow = Vec::with_capacity(m);
    for e in 0..m {
        flow.push(state.net.cap[2 * e + 1]);
    }

    Ok((FlowResult::new(flow, state.net.original_cap, value), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturates_a_single_bottleneck_edge() {
        // s -> a -> t, capacities 5 and 2: max flow is 2.
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 2)], true, false);
        let cap = |e: usize| [5.0, 2.0][e];
        let (result, value) = compute(&g, 0, 2, &cap).unwrap();
        assert_eq!(value, 2.0);
        assert_eq!(result.flow(1), 2.0);
        assert_eq!(result.flow(0), 2.0);
    }

    /// `spec.md` §8 scenario 5: classic 6-vertex push-relabel example, max flow 19.
    #[test]
    fn classic_six_vertex_network_has_max_flow_19() {
        // s=0, a=1, b=2, c=3, d=4, t=5.
        let g = IndexGraph::from_edges(
            6,
            &[
                (0, 1),
                (0, 2),
                (1, 3),
                (1, 4),
                (2, 3),
                (3, 5),
                (4, 5),
                (2, 4),
            ],
            true,
            false,
        );
        let cap = |e: usize| [10.0, 10.0, 4.0, 8.0, 9.0, 10.0, 10.0, 6.0][e];
        let (_, value) = compute(&g, 0, 5, &cap).unwrap();
        assert_eq!(value, 19.0);
    }

    #[test]
    fn two_parallel_paths_sum_their_capacity() {
        // s -> a -> t (cap 3), s -> b -> t (cap 4): max flow is 7.
        let g = IndexGraph::from_edges(4, &[(0, 1), (1, 3), (0, 2), (2, 3)], true, false);
        let cap = |e: usize| [3.0, 3.0, 4.0, 4.0][e];
        let (_, value) = compute(&g, 0, 3, &cap).unwrap();
        assert_eq!(value, 7.0);
    }

    #[test]
    fn diamond_with_a_tight_middle_edge() {
        // s -> a (10), a -> t (1), s -> b (1), b -> t (10): max flow is 2 (a-path + b-path).
        let g = IndexGraph::from_edges(4, &[(0, 1), (1, 3), (0, 2), (2, 3)], true, false);
        let cap = |e: usize| [10.0, 1.0, 1.0, 10.0][e];
        let (_, value) = compute(&g, 0, 3, &cap).unwrap();
        assert_eq!(value, 2.0);
    }

    /// A chain long enough, with a high enough `n^2/m` bound, to force `discharge` through the
    /// link-and-push-through-the-tree branch rather than ever falling back to a single-edge push.
    #[test]
    fn long_chain_flows_through_linked_tree_edges() {
        let edges: Vec<(usize, usize)> = (0..20).map(|i| (i, i + 1)).collect();
        let g = IndexGraph::from_edges(21, &edges, true, false);
        let cap = |_: usize| 3.0;
        let (result, value) = compute(&g, 0, 20, &cap).unwrap();
        assert_eq!(value, 3.0);
        for e in 0..20 {
            assert_eq!(result.flow(e), 3.0);
        }
    }

    /// Two disjoint paths of different capacity sharing no vertices: confirms independent trees
    /// coexist and both drain correctly to the sink.
    #[test]
    fn two_independent_chains_do_not_interfere() {
        let g = IndexGraph::from_edges(
            6,
            &[(0, 1), (1, 2), (3, 4), (4, 2)],
            true,
            false,
        );
        let cap = |e: usize| [5.0, 5.0, 2.0, 2.0][e];
        let (_, value) = compute(&g, 0, 2, &cap).unwrap();
        assert_eq!(value, 5.0);
    }
}
