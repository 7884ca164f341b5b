//! The flow result type (`spec.md` §3 "Flows"): a `flow[e]` array plus a lazily-derived residual
//! view.

/// A flow assignment over a graph's edges, together with the capacities it was computed against.
#[derive(Debug, Clone)]
pub struct FlowResult {
    flow: Vec<f64>,
    capacity: Vec<f64>,
    value: f64,
}

impl FlowResult {
    #[must_use]
    pub fn new(flow: Vec<f64>, capacity: Vec<f64>, value: f64) -> Self {
        debug_assert_eq!(flow.len(), capacity.len());
        Self {
            flow,
            capacity,
            value,
        }
    }

    #[must_use]
    pub fn flow(&self, e: usize) -> f64 {
        self.flow[e]
    }

    #[must_use]
    pub fn capacity(&self, e: usize) -> f64 {
        self.capacity[e]
    }

    /// Net flow out of the source, the objective value of a max-flow run (or the satisfied
    /// supply total for a min-cost-flow run).
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Forward residual capacity: how much more can still be pushed along `e`'s own direction.
    #[must_use]
    pub fn residual_forward(&self, e: usize) -> f64 {
        self.capacity[e] - self.flow[e]
    }

    /// Backward residual capacity: how much of the current flow on `e` could be cancelled.
    #[must_use]
    pub fn residual_backward(&self, e: usize) -> f64 {
        self.flow[e]
    }

    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.flow.len()
    }
}
