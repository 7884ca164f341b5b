//! `graph-core`: the index-graph contract and the primitives every kernel in `graph-algorithms`
//! is built on (`spec.md` §3, §4.1, §4.2, §4.3).
//!
//! This crate is deliberately free of any algorithm: it is the "GraphPort" plus the containers
//! and traversal iterators the algorithmic engine consumes, and the façade machinery that lifts
//! user-identifier calls to index space and back (§4.1). Everything downstream works purely in
//! `[0, n) x [0, m)` index space (§2 data flow).

pub mod containers;
pub mod dynamic_tree;
pub mod error;
pub mod graph;
pub mod id;
pub mod rng;
pub mod traversal;
pub mod weight;

pub use error::{Error, Result};
pub use graph::{Graph, IndexGraph};
pub use id::IndexIdMap;
