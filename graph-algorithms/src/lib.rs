//! `graph-algorithms`: the algorithmic engine described in `spec.md` §2 — SSSP/APSP, bidirectional
//! and heuristic shortest paths, k-shortest paths, maximum-weight matching, max-flow and min-cost
//! flow, connectivity (weak/strong/biconnected/k-edge), k-core decomposition, minimum-mean cycle,
//! and the small "Misc" surface (min-cut, random walk, isomorphism mapping glue).
//!
//! Every kernel here is implemented exactly once, against [`graph_core::IndexGraph`] (§2 data
//! flow, §9 design notes). The [`facade`] module is the thin, generic `Graph<V, E>` adaptor that
//! lifts user-identifier calls into that index space and lifts results back out; callers that
//! already hold an `IndexGraph` call the index-space entry points directly and pay no translation
//! cost at all.

/// `debug`/`trace` events around the phase transitions of a multi-phase loop (Blossom-V's
/// augment/grow/shrink/dual-update sweep, Yen's k iterations, push-relabel's discharges, Howard's
/// policy improvements), the way a performance-sensitive hot loop gets instrumented. A no-op when
/// the `tracing` feature is off, so the loops that call it never need their own `#[cfg]` gate.
macro_rules! phase_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

pub(crate) use phase_event;

pub mod apsp;
pub mod connectivity;
pub mod cores;
pub mod cycles;
pub mod facade;
pub mod flow;
pub mod isomorphism;
pub mod k_shortest;
pub mod matching;
pub mod min_cut;
pub mod partition;
pub mod path;
pub mod random_walk;
pub mod shortest_path_st;
pub mod sssp;

pub use graph_core::error::{Error, Result};
