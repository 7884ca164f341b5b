//! Vertex partitions (`spec.md` §3 "Vertex partitions"): every vertex is assigned to exactly one
//! of `k` blocks, with the block's vertex/edge sets and the cross-block edge set derived lazily.

use graph_core::graph::IndexGraph;

/// `block[v] in [0, numBlocks)` for every vertex.
#[derive(Debug, Clone)]
pub struct Partition {
    block: Vec<usize>,
    num_blocks: usize,
}

impl Partition {
    #[must_use]
    pub fn new(block: Vec<usize>) -> Self {
        let num_blocks = block.iter().copied().max().map_or(0, |m| m + 1);
        Self { block, num_blocks }
    }

    /// The `k = 2` special case: `true` goes to block 1, `false` to block 0.
    #[must_use]
    pub fn from_bitmap(in_block_one: &[bool]) -> Self {
        Self::new(in_block_one.iter().map(|&b| usize::from(b)).collect())
    }

    #[must_use]
    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    #[must_use]
    pub fn block_of(&self, v: usize) -> usize {
        self.block[v]
    }

    #[must_use]
    pub fn block_vertices(&self, block: usize) -> Vec<usize> {
        (0..self.block.len()).filter(|&v| self.block[v] == block).collect()
    }

    /// Edges with both endpoints in `block`.
    #[must_use]
    pub fn block_edges(&self, graph: &IndexGraph, block: usize) -> Vec<usize> {
        (0..graph.num_edges())
            .filter(|&e| {
                self.block[graph.edge_source(e)] == block && self.block[graph.edge_target(e)] == block
            })
            .collect()
    }

    /// Edges whose endpoints fall in different blocks.
    #[must_use]
    pub fn cross_edges(&self, graph: &IndexGraph) -> Vec<usize> {
        (0..graph.num_edges())
            .filter(|&e| self.block[graph.edge_source(e)] != self.block[graph.edge_target(e)])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_edges_separate_a_bipartition() {
        let g = IndexGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (0, 3)], false, false);
        let p = Partition::from_bitmap(&[false, false, true, true]);
        let mut cross = p.cross_edges(&g);
        cross.sort_unstable();
        assert_eq!(cross, vec![1, 3]);
        assert_eq!(p.num_blocks(), 2);
    }

    #[test]
    fn block_vertices_and_edges_round_trip() {
        let g = IndexGraph::from_edges(4, &[(0, 1), (2, 3)], false, false);
        let p = Partition::new(vec![0, 0, 1, 1]);
        assert_eq!(p.block_vertices(0), vec![0, 1]);
        assert_eq!(p.block_edges(&g, 0), vec![0]);
        assert_eq!(p.block_edges(&g, 1), vec![1]);
    }
}
