//! `DynamicTree` (`spec.md` §4.2): a link-cut forest of rooted trees with a per-edge real weight,
//! supporting `link`/`cut`/`findRoot`/`addWeight`/`findMinEdge` in amortised `O(log n)`, plus the
//! `treeSize` extension. `graph-algorithms`' `flow::push_relabel` links whole admissible subtrees
//! through this exact structure (`spec.md` §4.10), draining a discharged vertex's excess with one
//! root-ward `findMinEdge`/`addWeight` sweep instead of one push per edge.
//!
//! Implemented as a splay-tree-based link-cut tree without the usual `evert`/"make-root"
//! operation: every operation here only ever asks about the path from a vertex *up* to its
//! existing root, which is what a dynamic-tree discharge loop would need, so there is no
//! reverse-lazy-tag to maintain. Subtree size is tracked with the standard "virtual subtree size"
//! trick so `treeSize` is exact even though it is mostly carried by nodes that are currently off
//! the preferred path.

const INF: f64 = f64::INFINITY;

#[derive(Debug, Clone)]
struct Node {
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
    /// `true` iff `self` is the root of its current splay tree. When `parent` is also `Some`,
    /// that pointer is then a *path-parent* (virtual edge), not a real splay-tree edge.
    is_root: bool,
    /// Weight of the represented-tree edge from this vertex to its parent; `INF` if this vertex
    /// is currently a represented-tree root.
    val: f64,
    /// Minimum `val` over this splay subtree (real children only, not virtual).
    min_val: f64,
    min_node: usize,
    /// Sum of `size` over virtual (non-preferred) children.
    vsize: usize,
    /// `1 + size(left) + size(right) + vsize`: after `access`, equals the total size of the
    /// represented tree containing this vertex.
    size: usize,
    lazy: f64,
}

impl Node {
    fn singleton(id: usize) -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
            is_root: true,
            val: INF,
            min_val: INF,
            min_node: id,
            vsize: 0,
            size: 1,
            lazy: 0.0,
        }
    }
}

/// A forest of link-cut trees over a growable set of vertex handles.
#[derive(Debug, Clone, Default)]
pub struct DynamicTree {
    nodes: Vec<Node>,
}

impl DynamicTree {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Preallocate `n` singleton trees up front (handles `0..n`), for callers that know their
    /// vertex count ahead of time (push-relabel does).
    #[must_use]
    pub fn with_capacity(n: usize) -> Self {
        let mut t = Self::new();
        for _ in 0..n {
            t.make_tree();
        }
        t
    }

    /// Allocate a new singleton tree and return its handle.
    pub fn make_tree(&mut self) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::singleton(id));
        id
    }

    fn size_of(&self, x: Option<usize>) -> usize {
        x.map_or(0, |x| self.nodes[x].size)
    }

    fn apply(&mut self, x: usize, delta: f64) {
        let n = &mut self.nodes[x];
        n.val += delta;
        n.min_val += delta;
        n.lazy += delta;
    }

    fn push_down(&mut self, x: usize) {
        let lazy = self.nodes[x].lazy;
        if lazy == 0.0 {
            return;
        }
        let (l, r) = (self.nodes[x].left, self.nodes[x].right);
        if let Some(l) = l {
            self.apply(l, lazy);
        }
        if let Some(r) = r {
            self.apply(r, lazy);
        }
        self.nodes[x].lazy = 0.0;
    }

    fn push_up(&mut self, x: usize) {
        let (l, r) = (self.nodes[x].left, self.nodes[x].right);
        let mut min_val = self.nodes[x].val;
        let mut min_node = x;
        let mut size = 1 + self.nodes[x].vsize;
        if let Some(l) = l {
            size += self.nodes[l].size;
            if self.nodes[l].min_val < min_val {
                min_val = self.nodes[l].min_val;
                min_node = self.nodes[l].min_node;
            }
        }
        if let Some(r) = r {
            size += self.nodes[r].size;
            if self.nodes[r].min_val < min_val {
                min_val = self.nodes[r].min_val;
                min_node = self.nodes[r].min_node;
            }
        }
        let n = &mut self.nodes[x];
        n.size = size;
        n.min_val = min_val;
        n.min_node = min_node;
    }

    fn is_left_child(&self, p: usize, x: usize) -> bool {
        self.nodes[p].left == Some(x)
    }

    fn rotate(&mut self, x: usize) {
        let p = self.nodes[x].parent.expect("rotate requires a real parent");
        let g = self.nodes[p].parent;
        let p_is_root = self.nodes[p].is_root;
        let x_is_left = self.is_left_child(p, x);

        let b = if x_is_left {
            self.nodes[x].right
        } else {
            self.nodes[x].left
        };
        if x_is_left {
            self.nodes[x].right = Some(p);
            self.nodes[p].left = b;
        } else {
            self.nodes[x].left = Some(p);
            self.nodes[p].right = b;
        }
        if let Some(b) = b {
            self.nodes[b].parent = Some(p);
        }

        self.nodes[p].parent = Some(x);
        self.nodes[p].is_root = false;

        self.nodes[x].parent = g;
        if let Some(g) = g {
            if !p_is_root {
                if self.nodes[g].left == Some(p) {
                    self.nodes[g].left = Some(x);
                } else if self.nodes[g].right == Some(p) {
                    self.nodes[g].right = Some(x);
                }
            }
        }
        self.nodes[x].is_root = p_is_root;

        self.push_up(p);
    }

    fn splay(&mut self, x: usize) {
        let mut path = vec![x];
        let mut y = x;
        while !self.nodes[y].is_root {
            y = self.nodes[y].parent.expect("non-root has a parent");
            path.push(y);
        }
        for &node in path.iter().rev() {
            self.push_down(node);
        }

        while !self.nodes[x].is_root {
            let p = self.nodes[x].parent.expect("non-root has a parent");
            if !self.nodes[p].is_root {
                let g = self.nodes[p].parent.expect("non-root has a parent");
                if self.is_left_child(g, p) == self.is_left_child(p, x) {
                    self.rotate(p);
                } else {
                    self.rotate(x);
                }
            }
            self.rotate(x);
        }
        self.push_up(x);
    }

    /// Expose the path from the represented root to `x` as a single splay tree rooted at `x`,
    /// returning the vertex that was the represented root beforehand.
    fn access(&mut self, x: usize) -> usize {
        let mut last = None;
        let mut y = Some(x);
        while let Some(cur) = y {
            self.splay(cur);
            if let Some(r) = self.nodes[cur].right {
                self.nodes[cur].vsize += self.nodes[r].size;
                self.nodes[r].is_root = true;
            }
            self.nodes[cur].right = last;
            if let Some(l) = last {
                self.nodes[cur].vsize -= self.nodes[l].size;
                self.nodes[l].is_root = false;
                self.nodes[l].parent = Some(cur);
            }
            self.push_up(cur);
            last = Some(cur);
            y = self.nodes[cur].parent;
        }
        self.splay(x);
        last.unwrap_or(x)
    }

    /// The root of the represented tree containing `u`.
    pub fn find_root(&mut self, u: usize) -> usize {
        self.access(u);
        let mut y = u;
        loop {
            self.push_down(y);
            match self.nodes[y].left {
                Some(l) => y = l,
                None => break,
            }
        }
        self.splay(y);
        y
    }

    /// Attach `u` (which must currently be a represented-tree root) as a child of `v` via an edge
    /// of weight `w`.
    pub fn link(&mut self, u: usize, v: usize, w: f64) {
        self.access(u);
        debug_assert!(
            self.nodes[u].left.is_none(),
            "link requires u to be a represented-tree root"
        );
        self.nodes[u].val = w;
        self.push_up(u);

        self.access(v);
        self.nodes[u].parent = Some(v);
        self.nodes[v].vsize += self.nodes[u].size;
        self.push_up(v);
    }

    /// Remove the edge between `u` and its represented-tree parent. `u` must not already be a
    /// root.
    pub fn cut(&mut self, u: usize) {
        self.access(u);
        let l = self.nodes[u]
            .left
            .expect("cut requires u to have a parent edge");
        self.nodes[u].left = None;
        self.nodes[l].parent = None;
        self.nodes[l].is_root = true;
        self.nodes[u].val = INF;
        self.push_up(u);
    }

    /// Add `delta` to the weight of every edge on the path from `u` to its represented root.
    pub fn add_weight(&mut self, u: usize, delta: f64) {
        self.access(u);
        self.apply(u, delta);
    }

    /// The minimum-weight edge on the path from `u` to its represented root, returned as
    /// `(lower_endpoint, weight)`. `None` if `u` is itself a root (no edges on the path).
    pub fn find_min_edge(&mut self, u: usize) -> Option<(usize, f64)> {
        self.access(u);
        let min_val = self.nodes[u].min_val;
        if min_val.is_infinite() {
            None
        } else {
            Some((self.nodes[u].min_node, min_val))
        }
    }

    /// The number of vertices in the represented tree containing `u`.
    pub fn tree_size(&mut self, u: usize) -> usize {
        self.access(u);
        self.nodes[u].size
    }

    /// The current weight of the edge from `u` to its represented-tree parent (`INF` if `u` is a
    /// root). Unlike [`Self::find_min_edge`], this reads `u`'s own edge rather than the minimum
    /// over the whole root-ward path; a discharge loop uses it to read back the live residual
    /// capacity of a specific tree edge it linked earlier.
    pub fn edge_weight(&mut self, u: usize) -> f64 {
        self.access(u);
        self.nodes[u].val
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_find_root_and_min_edge() {
        let mut t = DynamicTree::with_capacity(4);
        // chain 0 -> 1 -> 2 -> 3, weights 5, 3, 7 (child -> parent)
        t.link(1, 0, 5.0);
        t.link(2, 1, 3.0);
        t.link(3, 2, 7.0);

        assert_eq!(t.find_root(3), 0);
        assert_eq!(t.find_min_edge(3), Some((2, 3.0)));
        assert_eq!(t.find_min_edge(0), None);
    }

    #[test]
    fn add_weight_shifts_whole_path() {
        let mut t = DynamicTree::with_capacity(3);
        t.link(1, 0, 5.0);
        t.link(2, 1, 3.0);
        t.add_weight(2, 10.0);
        assert_eq!(t.find_min_edge(2), Some((1, 13.0)));
    }

    #[test]
    fn cut_splits_the_tree() {
        let mut t = DynamicTree::with_capacity(3);
        t.link(1, 0, 5.0);
        t.link(2, 1, 3.0);
        t.cut(1);
        assert_eq!(t.find_root(2), 1);
        assert_eq!(t.find_root(0), 0);
        assert_eq!(t.find_min_edge(1), None);
    }

    #[test]
    fn edge_weight_reads_back_a_specific_edge_after_a_path_wide_update() {
        let mut t = DynamicTree::with_capacity(3);
        t.link(1, 0, 5.0);
        t.link(2, 1, 3.0);
        t.add_weight(2, 10.0);
        assert_eq!(t.edge_weight(2), 13.0);
        assert_eq!(t.edge_weight(1), 15.0);
        assert_eq!(t.edge_weight(0), INF);
    }

    #[test]
    fn tree_size_counts_whole_represented_tree() {
        let mut t = DynamicTree::with_capacity(5);
        t.link(1, 0, 1.0);
        t.link(2, 0, 1.0);
        t.link(3, 1, 1.0);
        assert_eq!(t.tree_size(3), 4);
        assert_eq!(t.tree_size(4), 1);
    }
}
