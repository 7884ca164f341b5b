//! The error taxonomy shared by every kernel in `graph-core`/`graph-algorithms`.
//!
//! Every fallible entry point returns [`error_stack::Result<T, Error>`], mirroring the
//! `error-stack`-as-`Context` pattern the teacher crate uses for `petgraph-core::error::Error`:
//! `Error` itself only carries a *kind*, the "why" (offending id, negative cycle, ...) is attached
//! to the report via [`error_stack::Report::attach_printable`] at the point the failure is
//! detected.

use core::fmt::{self, Display, Formatter};

use error_stack::Context;

/// The kind of failure a call into this crate can raise.
///
/// All variants are synchronous: they are raised at call time, never after the fact. See
/// `spec.md` §7 for the full taxonomy this mirrors.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Error {
    /// An identifier (vertex or edge) is not known to the graph.
    NoSuchVertex,
    /// See [`Error::NoSuchVertex`].
    NoSuchEdge,
    /// The algorithm requires a directed (or undirected) graph and the input is the other kind.
    GraphDirectionality,
    /// A non-negative-weight algorithm observed `w(e) < 0`.
    NegativeEdgeWeight,
    /// A path-finding algorithm detected a negative-weight cycle reachable from the source.
    NegativeCycle,
    /// `k <= 0`, `source == target` where forbidden, a supply/demand mismatch, or
    /// `lowerBound > capacity`.
    IllegalArgument,
    /// A perfect matching was requested on a graph with an odd number of vertices.
    OddVertexCount,
    /// The feature is not supported by the chosen algorithm variant.
    Unsupported,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NoSuchVertex => "no such vertex",
            Self::NoSuchEdge => "no such edge",
            Self::GraphDirectionality => "graph directionality mismatch",
            Self::NegativeEdgeWeight => "negative edge weight",
            Self::NegativeCycle => "negative cycle detected",
            Self::IllegalArgument => "illegal argument",
            Self::OddVertexCount => "odd vertex count",
            Self::Unsupported => "unsupported",
        };
        f.write_str(msg)
    }
}

impl Context for Error {}

/// Convenience alias used throughout the workspace.
pub type Result<T> = error_stack::Result<T, Error>;
