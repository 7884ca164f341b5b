//! Strongly connected components via Tarjan's algorithm (`spec.md` §2's Connectivity row; see
//! `SPEC_FULL.md`'s supplement note).

use graph_core::graph::IndexGraph;

struct Tarjan<'g> {
    graph: &'g IndexGraph,
    index: Vec<isize>,
    low_link: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    next_index: usize,
    component: Vec<isize>,
    next_component: usize,
}

impl<'g> Tarjan<'g> {
    fn new(graph: &'g IndexGraph) -> Self {
        let n = graph.num_vertices();
        Self {
            graph,
            index: vec![-1; n],
            low_link: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            next_index: 0,
            component: vec![-1; n],
            next_component: 0,
        }
    }

    /// Iterative Tarjan, explicit work-stack per vertex keyed on the position in its out-edge
    /// list still to be explored, so deep graphs don't recurse.
    fn visit(&mut self, root: usize) {
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        self.index[root] = self.next_index as isize;
        self.low_link[root] = self.next_index;
        self.next_index += 1;
        self.stack.push(root);
        self.on_stack[root] = true;

        while let Some(&(v, pos)) = frames.last() {
            let out = self.graph.out_edges(v);
            if pos < out.len() {
                let e = out[pos];
                frames.last_mut().unwrap().1 += 1;
                let w = self.graph.edge_endpoint(e, v);
                if self.index[w] == -1 {
                    self.index[w] = self.next_index as isize;
                    self.low_link[w] = self.next_index;
                    self.next_index += 1;
                    self.stack.push(w);
                    self.on_stack[w] = true;
                    frames.push((w, 0));
                } else if self.on_stack[w] {
                    self.low_link[v] = self.low_link[v].min(self.index[w] as usize);
                }
            } else {
                frames.pop();
                if let Some(&(parent, _)) = frames.last() {
                    self.low_link[parent] = self.low_link[parent].min(self.low_link[v]);
                }
                if self.low_link[v] == self.index[v] as usize {
                    loop {
                        let w = self.stack.pop().unwrap();
                        self.on_stack[w] = false;
                        self.component[w] = self.next_component as isize;
                        if w == v {
                            break;
                        }
                    }
                    self.next_component += 1;
                }
            }
        }
    }
}

/// `component[v]` is an integer in `0..numComponents`, assigned in reverse topological order
/// (component 0 has no outgoing edges to any other component).
pub fn compute(graph: &IndexGraph) -> Vec<usize> {
    let n = graph.num_vertices();
    let mut tarjan = Tarjan::new(graph);
    for v in 0..n {
        if tarjan.index[v] == -1 {
            tarjan.visit(v);
        }
    }
    tarjan.component.into_iter().map(|c| c as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_cycle_and_a_bridge() {
        // 0<->1 cycle, 1->2->3->1 cycle; a bridge 1->4 into an isolated sink.
        let g = IndexGraph::from_edges(
            5,
            &[(0, 1), (1, 0), (1, 2), (2, 3), (3, 1), (1, 4)],
            true,
            false,
        );
        let comp = compute(&g);
        assert_eq!(comp[0], comp[1]);
        assert_eq!(comp[1], comp[2]);
        assert_eq!(comp[2], comp[3]);
        assert_ne!(comp[4], comp[0]);
    }

    #[test]
    fn dag_has_one_component_per_vertex() {
        let g = IndexGraph::from_edges(3, &[(0, 1), (1, 2)], true, false);
        let comp = compute(&g);
        let distinct: std::collections::HashSet<_> = comp.iter().collect();
        assert_eq!(distinct.len(), 3);
    }
}
