//! The index-graph contract (`spec.md` §3/§6, "GraphPort") and the generic `Graph<V, E>` façade
//! that sits on top of it (§4.1).
//!
//! Every algorithm in `graph-algorithms` is implemented exactly once, against [`IndexGraph`].
//! [`Graph`] is the thin, generic adaptor described in the teacher's design notes (§9): rather
//! than the source's triple type ladder (generic / Int / Index), there is one index-space
//! implementation plus one adaptor that resolves `V`/`E` identifiers to indices at the boundary.

use core::hash::Hash;

use error_stack::{Report, ResultExt};

use crate::{
    error::{Error, Result},
    id::IndexIdMap,
};

/// The read-only, integer-indexed graph every algorithm kernel runs against.
///
/// Vertices are `0..num_vertices()`, edges are `0..num_edges()`. This is deliberately a concrete
/// struct rather than a trait: `spec.md` §9 calls out that the source's polymorphism over
/// (Index, Int, Generic) graphs exists only to dodge boxing on a different runtime, and that a
/// systems-language port should collapse it to a single index-space representation. Storage is a
/// CSR-like pair of adjacency lists, built once and never mutated during a `compute` call (§5).
#[derive(Debug, Clone)]
pub struct IndexGraph {
    directed: bool,
    allow_self_edges: bool,
    edge_source: Vec<usize>,
    edge_target: Vec<usize>,
    out_edges: Vec<Vec<usize>>,
    in_edges: Vec<Vec<usize>>,
}

impl IndexGraph {
    /// Build an index graph from `(source, target)` pairs. `directed = false` treats every edge
    /// as usable from either endpoint; `out_edges(v)` and `in_edges(v)` then coincide.
    #[must_use]
    pub fn from_edges(
        num_vertices: usize,
        edges: &[(usize, usize)],
        directed: bool,
        allow_self_edges: bool,
    ) -> Self {
        let mut out_edges = vec![Vec::new(); num_vertices];
        let mut in_edges = vec![Vec::new(); num_vertices];
        let mut edge_source = Vec::with_capacity(edges.len());
        let mut edge_target = Vec::with_capacity(edges.len());

        for (e, &(s, t)) in edges.iter().enumerate() {
            edge_source.push(s);
            edge_target.push(t);
            out_edges[s].push(e);
            if directed {
                in_edges[t].push(e);
            } else {
                out_edges[t].push(e);
                in_edges[s].push(e);
                in_edges[t].push(e);
            }
        }

        Self {
            directed,
            allow_self_edges,
            edge_source,
            edge_target,
            out_edges,
            in_edges,
        }
    }

    /// An empty graph on `n` vertices, edges added later are out of scope for a `compute` call
    /// (§5: no mid-algorithm mutation) but this constructor is useful for algorithms that build
    /// an auxiliary graph, e.g. Wang's k-edge-CC recursion (§4.8).
    #[must_use]
    pub fn with_vertices(num_vertices: usize, directed: bool, allow_self_edges: bool) -> Self {
        Self::from_edges(num_vertices, &[], directed, allow_self_edges)
    }

    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.out_edges.len()
    }

    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edge_source.len()
    }

    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    #[must_use]
    pub fn is_allow_self_edges(&self) -> bool {
        self.allow_self_edges
    }

    #[must_use]
    pub fn vertices(&self) -> core::ops::Range<usize> {
        0..self.num_vertices()
    }

    #[must_use]
    pub fn edges(&self) -> core::ops::Range<usize> {
        0..self.num_edges()
    }

    #[must_use]
    pub fn edge_source(&self, e: usize) -> usize {
        self.edge_source[e]
    }

    #[must_use]
    pub fn edge_target(&self, e: usize) -> usize {
        self.edge_target[e]
    }

    /// The endpoint of `e` other than `u`. Panics if `u` is not an endpoint of `e`, mirroring the
    /// teacher's "programmer error, not a recoverable one" treatment of internal invariant
    /// violations (`spec.md` §7 propagation policy).
    #[must_use]
    pub fn edge_endpoint(&self, e: usize, u: usize) -> usize {
        let (s, t) = (self.edge_source[e], self.edge_target[e]);
        if u == s {
            t
        } else if u == t {
            s
        } else {
            panic!("vertex {u} is not an endpoint of edge {e}")
        }
    }

    #[must_use]
    pub fn out_edges(&self, v: usize) -> &[usize] {
        &self.out_edges[v]
    }

    #[must_use]
    pub fn in_edges(&self, v: usize) -> &[usize] {
        &self.in_edges[v]
    }

    #[must_use]
    pub fn out_degree(&self, v: usize) -> usize {
        self.out_edges[v].len()
    }

    #[must_use]
    pub fn in_degree(&self, v: usize) -> usize {
        self.in_edges[v].len()
    }
}

/// A user-facing graph over arbitrary identifiers `V` (vertices) and `E` (edges).
///
/// `Graph<V, E>` owns the dense [`IndexGraph`] plus the two [`IndexIdMap`]s that translate to and
/// from it. Algorithms never see `V`/`E` directly (§2 data flow): the façade in
/// `graph-algorithms` resolves identifiers to indices on the way in and lazily translates indices
/// back to identifiers on the way out.
#[derive(Debug, Clone)]
pub struct Graph<V, E> {
    index: IndexGraph,
    vertex_map: IndexIdMap<V>,
    edge_map: IndexIdMap<E>,
}

impl<V, E> Graph<V, E>
where
    V: Hash + Eq + Clone,
    E: Hash + Eq + Clone,
{
    /// Build a graph from `(source_id, target_id, edge_id)` triples. Vertex identifiers are
    /// discovered in the order they first appear as an edge endpoint, then any trailing
    /// `extra_vertices` (isolated vertices) are appended.
    pub fn from_edges<I>(
        edges_in: I,
        extra_vertices: impl IntoIterator<Item = V>,
        directed: bool,
        allow_self_edges: bool,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (V, V, E)>,
    {
        let mut vertex_order: Vec<V> = Vec::new();
        let mut vertex_seen = indexmap::IndexSet::<V>::new();
        let mut edge_ids = Vec::new();
        let mut edge_pairs = Vec::new();

        for (s, t, e) in edges_in {
            if !allow_self_edges && s == t {
                return Err(Report::new(Error::IllegalArgument)
                    .attach_printable("self edge present but allow_self_edges = false"));
            }
            let si = vertex_seen.insert_full(s.clone()).0;
            if si == vertex_order.len() {
                vertex_order.push(s);
            }
            let ti = vertex_seen.insert_full(t.clone()).0;
            if ti == vertex_order.len() {
                vertex_order.push(t);
            }
            edge_pairs.push((si, ti));
            edge_ids.push(e);
        }
        for v in extra_vertices {
            if vertex_seen.insert(v.clone()) {
                vertex_order.push(v);
            }
        }

        let vertex_map = IndexIdMap::from_ids(vertex_order);
        let edge_map = IndexIdMap::from_ids(edge_ids);
        let index = IndexGraph::from_edges(
            vertex_map.len(),
            &edge_pairs,
            directed,
            allow_self_edges,
        );

        Ok(Self {
            index,
            vertex_map,
            edge_map,
        })
    }

    #[must_use]
    pub fn index_graph(&self) -> &IndexGraph {
        &self.index
    }

    #[must_use]
    pub fn vertex_map(&self) -> &IndexIdMap<V> {
        &self.vertex_map
    }

    #[must_use]
    pub fn edge_map(&self) -> &IndexIdMap<E> {
        &self.edge_map
    }

    pub fn vertex_index(&self, id: &V) -> Result<usize> {
        self.vertex_map.id_to_index_as(id, Error::NoSuchVertex)
    }

    pub fn edge_index(&self, id: &E) -> Result<usize> {
        self.edge_map.id_to_index_as(id, Error::NoSuchEdge)
    }

    #[must_use]
    pub fn vertex_id(&self, index: usize) -> Option<&V> {
        self.vertex_map.index_to_id(index)
    }

    #[must_use]
    pub fn edge_id(&self, index: usize) -> Option<&E> {
        self.edge_map.index_to_id(index)
    }
}
