//! Graph algorithms module
//!
//! Algorithms are implemented in the `tripgraph-algorithms` crate.
//! This module provides the integration/adapter layer.

use crate::graph::{GraphError, GraphResult, GraphStore};
use tripgraph_algorithms::GraphView;

// Re-export algorithms
pub use tripgraph_algorithms::{
    bfs, dijkstra, page_rank, AlgoError, AlgoResult, PageRankConfig, PathResult, RankResult,
};

/// Build a CSR view of the store for algorithm execution.
///
/// With a weight property every edge must carry a finite numeric value for it;
/// the first offending edge fails the whole build. Without one the view is
/// unweighted. Dense indices follow the store's node order, which is id
/// order.
pub fn build_view(store: &GraphStore, weight_property: Option<&str>) -> GraphResult<GraphView> {
    let nodes = store.all_nodes();
    let index_to_node: Vec<u64> = nodes.iter().map(|n| n.id.as_u64()).collect();

    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut weights: Option<Vec<Vec<f64>>> = weight_property.map(|_| vec![Vec::new(); nodes.len()]);

    for (u_idx, node) in nodes.iter().enumerate() {
        for edge in store.get_outgoing_edges(node.id) {
            // Store positions are sorted by id, so a binary search finds the target index
            let v_idx = nodes
                .binary_search_by_key(&edge.target, |n| n.id)
                .map_err(|_| GraphError::NodeNotFound(edge.target))?;
            outgoing[u_idx].push(v_idx);

            if let (Some(rows), Some(property)) = (weights.as_mut(), weight_property) {
                rows[u_idx].push(edge.weight(property)?);
            }
        }
    }

    Ok(GraphView::from_adjacency_list(index_to_node, outgoing, weights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, EdgeId, LoadOptions, Node, NodeId};

    fn store() -> GraphStore {
        let nodes = vec![Node::new(30u64, "c"), Node::new(10u64, "a"), Node::new(20u64, "b")];
        let edges = vec![
            Edge::new(EdgeId::new(0), NodeId::new(10), NodeId::new(20)).with_property("distance", 2.0),
            Edge::new(EdgeId::new(1), NodeId::new(20), NodeId::new(30)).with_property("distance", 3i64),
            Edge::new(EdgeId::new(2), NodeId::new(10), NodeId::new(30)).with_property("distance", 9.5),
        ];
        GraphStore::load(nodes, edges, &LoadOptions::default()).unwrap()
    }

    #[test]
    fn test_graph_view_projection() {
        let view = build_view(&store(), Some("distance")).unwrap();

        assert_eq!(view.node_count, 3);
        assert_eq!(view.index_to_node, vec![10, 20, 30]);
        assert_eq!(view.successors(0), &[1, 2]);
        assert_eq!(view.weights(0), Some(&[2.0, 9.5][..]));
        assert_eq!(view.weights(1), Some(&[3.0][..]));
        assert_eq!(view.in_degree(2), 2);
    }

    #[test]
    fn test_unweighted_projection() {
        let view = build_view(&store(), None).unwrap();

        assert!(view.weights.is_none());
        assert_eq!(view.edge_count(), 3);
    }

    #[test]
    fn test_missing_weight_property() {
        let err = build_view(&store(), Some("duration")).unwrap_err();
        assert!(matches!(err, GraphError::MissingProperty { .. }));
    }
}
