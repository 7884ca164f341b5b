//! The SSSP builder and dispatch table (`spec.md` §4.4 "Builder dispatch (complete table)").
//!
//! This is the "configuration" layer `SPEC_FULL.md` calls out in place of process-level config:
//! callers describe what they know about their weights (`negative`, `integral`, a distance bound)
//! and the builder picks the cheapest correct kernel, the way the teacher's
//! `Dijkstra<D, E>` builder configures a single algorithm rather than dispatching between several.

use graph_core::{
    error::Result,
    graph::IndexGraph,
    weight::{IntWeightFunction, WeightFunction},
};

use super::{bellman_ford, cardinality, dag, dial, dijkstra, goldberg, result::SsspResult};

/// Which kernel the dispatch table selected; exposed so callers/tests can assert on it without
/// re-deriving the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    CardinalityBfs,
    TopologicalRelax,
    Goldberg,
    BellmanFord,
    Dial,
    Dijkstra,
}

/// Builder capturing what the caller knows about the instance (`spec.md` §4.4 dispatch table
/// input flags).
#[derive(Debug, Clone, Copy, Default)]
pub struct SsspBuilder {
    is_dag: bool,
    negative_weights: bool,
    int_weights: bool,
    max_distance: Option<u64>,
}

impl SsspBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_dag(mut self, is_dag: bool) -> Self {
        self.is_dag = is_dag;
        self
    }

    #[must_use]
    pub fn negative_weights(mut self, negative: bool) -> Self {
        self.negative_weights = negative;
        self
    }

    #[must_use]
    pub fn int_weights(mut self, int_weights: bool) -> Self {
        self.int_weights = int_weights;
        self
    }

    #[must_use]
    pub fn max_distance(mut self, max_distance: u64) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    /// `spec.md` §4.4 dispatch table, evaluated top to bottom.
    #[must_use]
    pub fn choose(&self, n: usize, m: usize, is_cardinality: bool) -> Algorithm {
        if is_cardinality {
            return Algorithm::CardinalityBfs;
        }
        if self.is_dag {
            return Algorithm::TopologicalRelax;
        }
        if self.negative_weights {
            return if self.int_weights {
                Algorithm::Goldberg
            } else {
                Algorithm::BellmanFord
            };
        }
        if self.int_weights {
            if let Some(max_distance) = self.max_distance {
                if dial::dial_beats_dijkstra(n, m, max_distance) {
                    return Algorithm::Dial;
                }
            }
        }
        Algorithm::Dijkstra
    }

    /// Dispatch and run, given both a real- and integer-valued view of the same weight function
    /// (the integer view is only consulted when [`Self::choose`] picks an integer kernel).
    pub fn solve<W: WeightFunction, IW: IntWeightFunction>(
        &self,
        graph: &IndexGraph,
        source: usize,
        weight: &W,
        int_weight: &IW,
    ) -> Result<SsspResult> {
        match self.choose(graph.num_vertices(), graph.num_edges(), weight.is_cardinality()) {
            Algorithm::CardinalityBfs => cardinality::compute(graph, source),
            Algorithm::TopologicalRelax => dag::compute(graph, source, weight),
            Algorithm::Goldberg => goldberg::compute(graph, source, int_weight),
            Algorithm::BellmanFord => bellman_ford::compute(graph, source, weight),
            Algorithm::Dial => dial::compute(graph, source, int_weight, self.max_distance.unwrap_or(0)),
            Algorithm::Dijkstra => dijkstra::compute(graph, source, weight, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_picks_cardinality_first() {
        let b = SsspBuilder::new().negative_weights(true);
        assert_eq!(b.choose(10, 10, true), Algorithm::CardinalityBfs);
    }

    #[test]
    fn dispatch_picks_goldberg_for_negative_integer() {
        let b = SsspBuilder::new().negative_weights(true).int_weights(true);
        assert_eq!(b.choose(10, 10, false), Algorithm::Goldberg);
    }

    #[test]
    fn dispatch_falls_back_to_dijkstra() {
        let b = SsspBuilder::new();
        assert_eq!(b.choose(10, 10, false), Algorithm::Dijkstra);
    }
}
