//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

use crate::error::{AlgoError, AlgoResult};
use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Dense indices follow the order of `index_to_node`. Callers that need
/// deterministic tie-breaking by node identity build the view from nodes sorted
/// by id, so index order and id order agree.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure (Compressed Sparse Column effectively)
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,

    /// Edge weights: aligned with `out_targets`
    pub weights: Option<Vec<f64>>,
    /// Edge weights: aligned with `in_sources`
    pub in_weights: Option<Vec<f64>>,
}

impl GraphView {
    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Total number of edges in the view
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    /// Dense index of a node, if it is part of the view
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.node_to_index.get(&node).copied()
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Get weights for outgoing edges of a node
    pub fn weights(&self, idx: usize) -> Option<&[f64]> {
        self.weights.as_ref().map(|w| {
            let start = self.out_offsets[idx];
            let end = self.out_offsets[idx + 1];
            &w[start..end]
        })
    }

    /// Get weights for incoming edges of a node, aligned with `predecessors`
    pub fn in_weights(&self, idx: usize) -> Option<&[f64]> {
        self.in_weights.as_ref().map(|w| {
            let start = self.in_offsets[idx];
            let end = self.in_offsets[idx + 1];
            &w[start..end]
        })
    }

    /// Sum of outgoing edge weights (out-degree for unweighted views)
    pub fn out_weight(&self, idx: usize) -> f64 {
        match self.weights(idx) {
            Some(w) => w.iter().sum(),
            None => self.out_degree(idx) as f64,
        }
    }

    /// Fail on the first negative or non-finite weight, scanning in CSR order.
    pub fn ensure_non_negative(&self) -> AlgoResult<()> {
        let Some(weights) = self.weights.as_ref() else {
            return Ok(());
        };

        for idx in 0..self.node_count {
            let start = self.out_offsets[idx];
            for (offset, &target) in self.successors(idx).iter().enumerate() {
                let weight = weights[start + offset];
                if !weight.is_finite() || weight < 0.0 {
                    return Err(AlgoError::InvalidWeight {
                        from: self.index_to_node[idx],
                        to: self.index_to_node[target],
                        weight,
                    });
                }
            }
        }
        Ok(())
    }

    /// Build a view from per-node adjacency lists.
    ///
    /// `outgoing[i]` lists target indices of node `i` and `weights[i]`, when
    /// present, is aligned with it. The incoming CSR is derived from the
    /// outgoing lists, ordered by source index and then by edge order.
    pub fn from_adjacency_list(
        index_to_node: Vec<NodeId>,
        outgoing: Vec<Vec<usize>>,
        weights: Option<Vec<Vec<f64>>>,
    ) -> Self {
        let node_count = index_to_node.len();
        let node_to_index: HashMap<NodeId, usize> = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut flat_weights = weights.as_ref().map(|_| Vec::new());

        let mut temp_incoming: Vec<Vec<(usize, f64)>> = vec![Vec::new(); node_count];

        out_offsets.push(0);
        for (i, neighbors) in outgoing.into_iter().enumerate() {
            let row = weights.as_ref().map(|w| &w[i]);
            for (k, &target) in neighbors.iter().enumerate() {
                let w = row.map(|r| r[k]).unwrap_or(1.0);
                temp_incoming[target].push((i, w));
            }
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());

            if let (Some(w_flat), Some(w_row)) = (flat_weights.as_mut(), row) {
                w_flat.extend(w_row.iter());
            }
        }

        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::with_capacity(out_targets.len());
        let mut in_weights = flat_weights.as_ref().map(|_| Vec::with_capacity(out_targets.len()));

        in_offsets.push(0);
        for sources in temp_incoming {
            for (source, w) in sources {
                in_sources.push(source);
                if let Some(ref mut iw) = in_weights {
                    iw.push(w);
                }
            }
            in_offsets.push(in_sources.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
            weights: flat_weights,
            in_weights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> GraphView {
        // 10 -> 20 (2.0), 10 -> 30 (3.0), 20 -> 30 (1.0)
        GraphView::from_adjacency_list(
            vec![10, 20, 30],
            vec![vec![1, 2], vec![2], vec![]],
            Some(vec![vec![2.0, 3.0], vec![1.0], vec![]]),
        )
    }

    #[test]
    fn test_csr_layout() {
        let view = triangle();

        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 3);
        assert_eq!(view.successors(0), &[1, 2]);
        assert_eq!(view.weights(0), Some(&[2.0, 3.0][..]));
        assert_eq!(view.out_degree(2), 0);
        assert_eq!(view.index_of(30), Some(2));
        assert_eq!(view.index_of(99), None);
    }

    #[test]
    fn test_incoming_weights_follow_sources() {
        let view = triangle();

        assert_eq!(view.predecessors(2), &[0, 1]);
        assert_eq!(view.in_weights(2), Some(&[3.0, 1.0][..]));
        assert_eq!(view.in_degree(0), 0);
        assert_eq!(view.out_weight(0), 5.0);
    }

    #[test]
    fn test_negative_weight_detected() {
        let view = GraphView::from_adjacency_list(
            vec![1, 2],
            vec![vec![1], vec![0]],
            Some(vec![vec![4.0], vec![-1.0]]),
        );

        assert_eq!(
            view.ensure_non_negative(),
            Err(AlgoError::InvalidWeight { from: 2, to: 1, weight: -1.0 })
        );
    }

    #[test]
    fn test_unweighted_view_counts_degree() {
        let view = GraphView::from_adjacency_list(vec![1, 2], vec![vec![1, 1], vec![]], None);

        assert_eq!(view.out_weight(0), 2.0);
        assert!(view.in_weights(1).is_none());
        assert!(view.ensure_non_negative().is_ok());
    }
}
