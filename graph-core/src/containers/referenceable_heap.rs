//! `ReferenceableHeap` (`spec.md` §4.2): a heap that returns a handle on insert, usable for
//! `decreaseKey`/`remove`, with `meld`. A full multi-tree Blossom-V would keep one of these per
//! alternating tree (`pqEvenOut`, `pqEvenEven`, `pqOdd`) and meld them as trees merge during
//! blossom contraction; `graph-algorithms`' single-tree-per-phase matching solver recomputes its
//! Δ-update candidates by a linear scan each phase instead (see its `matching::weighted_general`
//! module doc comment), so this type stands alone today, tested against its own invariants.
//!
//! Implemented as a pairing heap over an arena: pairing heaps give `O(1)` insert/meld and
//! amortised `O(log n)` decrease-key/delete, the shape a dual-update sweep that melds small
//! per-vertex queues into per-tree ones would rely on.

/// An opaque handle to a value living in a [`ReferenceableHeap`]. Only valid for the heap that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferenceableHeapHandle(usize);

struct Node<K, V> {
    key: K,
    value: V,
    child: Option<usize>,
    sibling: Option<usize>,
    parent: Option<usize>,
}

/// A pairing heap keyed by `K: Ord` with arbitrary payload `V`, addressable by handle.
pub struct ReferenceableHeap<K, V> {
    arena: Vec<Option<Node<K, V>>>,
    root: Option<usize>,
    len: usize,
}

impl<K: Ord + Clone, V> Default for ReferenceableHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V> ReferenceableHeap<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            len: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn node(&self, id: usize) -> &Node<K, V> {
        self.arena[id].as_ref().expect("live node")
    }

    fn node_mut(&mut self, id: usize) -> &mut Node<K, V> {
        self.arena[id].as_mut().expect("live node")
    }

    pub fn insert(&mut self, key: K, value: V) -> ReferenceableHeapHandle {
        let id = self.arena.len();
        self.arena.push(Some(Node {
            key,
            value,
            child: None,
            sibling: None,
            parent: None,
        }));
        self.root = Some(self.meld_roots(self.root, Some(id)));
        self.len += 1;
        ReferenceableHeapHandle(id)
    }

    #[must_use]
    pub fn peek_min(&self) -> Option<(&K, &V)> {
        self.root.map(|r| (&self.node(r).key, &self.node(r).value))
    }

    pub fn extract_min(&mut self) -> Option<(K, V)> {
        let root = self.root?;
        let child = self.node(root).child;
        self.root = self.meld_children_pairwise(child);
        let node = self.arena[root].take().expect("live node");
        self.len -= 1;
        Some((node.key, node.value))
    }

    /// Lower the key of the value referenced by `handle`. `new_key` must not be greater than the
    /// current key.
    pub fn decrease_key(&mut self, handle: ReferenceableHeapHandle, new_key: K) {
        let id = handle.0;
        debug_assert!(new_key <= self.node(id).key);
        self.node_mut(id).key = new_key;
        if self.root == Some(id) {
            return;
        }
        self.detach(id);
        self.root = Some(self.meld_roots(self.root, Some(id)));
    }

    /// Remove an arbitrary element from the heap by handle.
    pub fn remove(&mut self, handle: ReferenceableHeapHandle) {
        let id = handle.0;
        let child = self.node(id).child;
        if self.root == Some(id) {
            self.root = self.meld_children_pairwise(child);
        } else {
            self.detach(id);
            let merged_children = self.meld_children_pairwise(child);
            self.root = Some(self.meld_roots(self.root, merged_children));
        }
        self.arena[id] = None;
        self.len -= 1;
    }

    /// Merge `other` into `self`. `other`'s handles are invalidated by this call — callers that
    /// need to keep referencing melded elements must re-derive handles from a subsequent
    /// `peek_min`/iteration rather than holding `other`'s old handles, since the two arenas are
    /// not unified (the teacher's `IndexHeapDouble` equivalent likewise documents handle
    /// invalidation on structural ops).
    pub fn meld(&mut self, mut other: Self) {
        for slot in other.arena.drain(..) {
            let Some(node) = slot else { continue };
            let id = self.arena.len();
            self.arena.push(Some(Node {
                key: node.key,
                value: node.value,
                child: None,
                sibling: None,
                parent: None,
            }));
            self.root = Some(self.meld_roots(self.root, Some(id)));
            self.len += 1;
        }
    }

    fn detach(&mut self, id: usize) {
        let parent = self.node(id).parent;
        let Some(p) = parent else { return };
        if self.node(p).child == Some(id) {
            let sibling = self.node(id).sibling;
            self.node_mut(p).child = sibling;
        } else {
            let mut cur = self.node(p).child;
            while let Some(c) = cur {
                if self.node(c).sibling == Some(id) {
                    let sibling = self.node(id).sibling;
                    self.node_mut(c).sibling = sibling;
                    break;
                }
                cur = self.node(c).sibling;
            }
        }
        self.node_mut(id).sibling = None;
        self.node_mut(id).parent = None;
    }

    fn meld_roots(&mut self, a: Option<usize>, b: Option<usize>) -> usize {
        match (a, b) {
            (None, None) => unreachable!("meld_roots called with nothing to meld"),
            (Some(x), None) | (None, Some(x)) => x,
            (Some(x), Some(y)) => {
                let (winner, loser) = if self.node(x).key <= self.node(y).key {
                    (x, y)
                } else {
                    (y, x)
                };
                let old_child = self.node(winner).child;
                self.node_mut(loser).sibling = old_child;
                self.node_mut(loser).parent = Some(winner);
                self.node_mut(winner).child = Some(loser);
                winner
            }
        }
    }

    fn meld_children_pairwise(&mut self, head: Option<usize>) -> Option<usize> {
        let mut children = Vec::new();
        let mut cur = head;
        while let Some(c) = cur {
            let next = self.node(c).sibling;
            self.node_mut(c).sibling = None;
            self.node_mut(c).parent = None;
            children.push(c);
            cur = next;
        }
        if children.is_empty() {
            return None;
        }
        let mut merged: Vec<usize> = Vec::new();
        let mut it = children.into_iter();
        while let Some(a) = it.next() {
            match it.next() {
                Some(b) => merged.push(self.meld_roots(Some(a), Some(b))),
                None => merged.push(a),
            }
        }
        let mut result = merged[0];
        for &next in &merged[1..] {
            result = self.meld_roots(Some(result), Some(next));
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_extract_min_order() {
        let mut h = ReferenceableHeap::new();
        h.insert(5, "e");
        h.insert(1, "a");
        h.insert(3, "c");
        assert_eq!(h.extract_min(), Some((1, "a")));
        assert_eq!(h.extract_min(), Some((3, "c")));
        assert_eq!(h.extract_min(), Some((5, "e")));
        assert_eq!(h.extract_min(), None);
    }

    #[test]
    fn decrease_key_promotes_to_min() {
        let mut h = ReferenceableHeap::new();
        let a = h.insert(10, "a");
        h.insert(1, "b");
        h.decrease_key(a, 0);
        assert_eq!(h.peek_min(), Some((&0, &"a")));
    }

    #[test]
    fn remove_arbitrary_element() {
        let mut h = ReferenceableHeap::new();
        let a = h.insert(1, "a");
        h.insert(2, "b");
        h.remove(a);
        assert_eq!(h.len(), 1);
        assert_eq!(h.extract_min(), Some((2, "b")));
    }

    #[test]
    fn meld_combines_two_heaps() {
        let mut h1 = ReferenceableHeap::new();
        h1.insert(3, "c");
        let mut h2 = ReferenceableHeap::new();
        h2.insert(1, "a");
        h2.insert(2, "b");
        h1.meld(h2);
        assert_eq!(h1.len(), 3);
        assert_eq!(h1.extract_min(), Some((1, "a")));
    }
}
