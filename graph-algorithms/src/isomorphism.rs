//! Isomorphism mapping glue (`spec.md` §3 "Isomorphism mappings"; scoped per `SPEC_FULL.md` §3 to
//! the data-model type and its inverse — finding an isomorphism is a separate search problem this
//! crate does not implement).

use std::cell::RefCell;
use std::rc::Rc;

use graph_core::id::sentinel_to_option;

struct Inner {
    vertex_map: Vec<isize>,
    edge_map: Vec<isize>,
    target_vertices: usize,
    target_edges: usize,
    inverse: RefCell<Option<IsomorphismMapping>>,
}

/// A mapping `G1 -> G2`: `vertex_map[v1] = v2` (or `-1` if `v1` is unmapped), same for edges.
#[derive(Clone)]
pub struct IsomorphismMapping {
    inner: Rc<Inner>,
}

impl IsomorphismMapping {
    /// `target_vertices`/`target_edges` are `|V(G2)|`/`|E(G2)|`, needed to size the inverse.
    #[must_use]
    pub fn new(vertex_map: Vec<isize>, edge_map: Vec<isize>, target_vertices: usize, target_edges: usize) -> Self {
        Self {
            inner: Rc::new(Inner {
                vertex_map,
                edge_map,
                target_vertices,
                target_edges,
                inverse: RefCell::new(None),
            }),
        }
    }

    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.inner.vertex_map.len()
    }

    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.inner.edge_map.len()
    }

    #[must_use]
    pub fn vertex(&self, v1: usize) -> Option<usize> {
        sentinel_to_option(self.inner.vertex_map[v1])
    }

    #[must_use]
    pub fn edge(&self, e1: usize) -> Option<usize> {
        sentinel_to_option(self.inner.edge_map[e1])
    }

    /// The inverse mapping `G2 -> G1`, computed on first call and memoised; the inverse's own
    /// `.inverse()` is back-linked to `self`, so `m.inverse().inverse()` returns (a clone of) `m`
    /// without recomputation (`spec.md` §8 "Inverse of isomorphism mapping").
    #[must_use]
    pub fn inverse(&self) -> IsomorphismMapping {
        if let Some(inv) = self.inner.inverse.borrow().as_ref() {
            return inv.clone();
        }

        let mut inv_vertex = vec![-1isize; self.inner.target_vertices];
        for (v1, &v2) in self.inner.vertex_map.iter().enumerate() {
            if let Some(v2) = sentinel_to_option(v2) {
                inv_vertex[v2] = v1 as isize;
            }
        }
        let mut inv_edge = vec![-1isize; self.inner.target_edges];
        for (e1, &e2) in self.inner.edge_map.iter().enumerate() {
            if let Some(e2) = sentinel_to_option(e2) {
                inv_edge[e2] = e1 as isize;
            }
        }

        let inv = IsomorphismMapping {
            inner: Rc::new(Inner {
                vertex_map: inv_vertex,
                edge_map: inv_edge,
                target_vertices: self.inner.vertex_map.len(),
                target_edges: self.inner.edge_map.len(),
                inverse: RefCell::new(Some(self.clone())),
            }),
        };
        *self.inner.inverse.borrow_mut() = Some(inv.clone());
        inv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_round_trips_a_full_mapping() {
        // G1: 0,1,2 -> G2: 2,0,1 (a rotation).
        let m = IsomorphismMapping::new(vec![2, 0, 1], vec![], 3, 0);
        let inv = m.inverse();
        for v1 in 0..3 {
            let v2 = m.vertex(v1).unwrap();
            assert_eq!(inv.vertex(v2), Some(v1));
        }
    }

    #[test]
    fn unmapped_vertices_stay_unmapped_in_the_inverse() {
        let m = IsomorphismMapping::new(vec![1, -1], vec![], 2, 0);
        let inv = m.inverse();
        assert_eq!(inv.vertex(0), None);
        assert_eq!(inv.vertex(1), Some(0));
    }

    #[test]
    fn inverse_is_memoised_and_back_linked() {
        let m = IsomorphismMapping::new(vec![1, 0], vec![0], 2, 1);
        let inv1 = m.inverse();
        let inv2 = m.inverse();
        assert!(Rc::ptr_eq(&inv1.inner, &inv2.inner));
        assert!(Rc::ptr_eq(&inv1.inverse().inner, &m.inner));
    }
}
