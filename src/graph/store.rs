//! In-memory graph storage
//!
//! A [`GraphStore`] is built once by [`GraphStore::load`] and never mutated
//! afterwards. Reloading means building a new store and swapping it in.

use super::edge::Edge;
use super::node::Node;
use super::types::{EdgeId, EdgeType, Label, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading or reading a graph store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Node {0} is defined more than once")]
    DuplicateNode(NodeId),

    #[error("Node name '{0}' is used by more than one node")]
    DuplicateName(String),

    #[error("Invalid edge {edge}: source node {node} does not exist")]
    InvalidEdgeSource { edge: EdgeId, node: NodeId },

    #[error("Invalid edge {edge}: target node {node} does not exist")]
    InvalidEdgeTarget { edge: EdgeId, node: NodeId },

    #[error("Edge {edge} has no property '{property}'")]
    MissingProperty { edge: EdgeId, property: String },

    #[error("Edge {edge} property '{property}' is {type_name}, expected a number")]
    NonNumericProperty {
        edge: EdgeId,
        property: String,
        type_name: &'static str,
    },

    #[error("Edge {edge} property '{property}' is not a finite number")]
    NonFiniteWeight { edge: EdgeId, property: String },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Filters and flags applied while loading
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Keep only nodes carrying this label
    pub node_label: Option<String>,
    /// Keep only edges of this type
    pub edge_type: Option<String>,
    /// Keep only the first edge for each (source, target, type)
    pub deduplicate: bool,
}

/// Summary counts of a loaded store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    /// Edge count per relationship type; untyped edges are counted under ""
    pub edges_per_type: BTreeMap<String, usize>,
    /// Nodes without outgoing edges
    pub sink_count: usize,
}

/// Immutable in-memory graph
///
/// - nodes: sorted by NodeId, so positions follow id order
/// - node_index: NodeId -> position
/// - name_index: name -> position
/// - outgoing: position -> edge positions, in load order
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_index: FxHashMap<NodeId, usize>,
    name_index: FxHashMap<String, usize>,
    outgoing: Vec<Vec<usize>>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and index a node and edge list.
    ///
    /// Edge endpoints are checked against the full node list before the label
    /// filter runs; edges that lose an endpoint to the filter are dropped
    /// silently.
    pub fn load(nodes: Vec<Node>, edges: Vec<Edge>, options: &LoadOptions) -> GraphResult<Self> {
        Self::validate(&nodes, &edges)?;

        let label = options.node_label.as_deref().map(Label::new);
        let edge_type = options.edge_type.as_deref().map(EdgeType::new);

        let mut nodes: Vec<Node> = nodes
            .into_iter()
            .filter(|n| label.as_ref().map_or(true, |l| n.has_label(l)))
            .collect();
        nodes.sort_by_key(|n| n.id);

        let node_index: FxHashMap<NodeId, usize> =
            nodes.iter().enumerate().map(|(pos, n)| (n.id, pos)).collect();
        let name_index: FxHashMap<String, usize> =
            nodes.iter().enumerate().map(|(pos, n)| (n.name.clone(), pos)).collect();

        let total_edges = edges.len();
        let mut seen = FxHashSet::default();
        let edges: Vec<Edge> = edges
            .into_iter()
            .filter(|e| edge_type.as_ref().map_or(true, |t| e.is_type(t)))
            .filter(|e| node_index.contains_key(&e.source) && node_index.contains_key(&e.target))
            .filter(|e| !options.deduplicate || seen.insert((e.source, e.target, e.edge_type.clone())))
            .collect();

        let mut outgoing = vec![Vec::new(); nodes.len()];
        for (pos, edge) in edges.iter().enumerate() {
            outgoing[node_index[&edge.source]].push(pos);
        }

        debug!(
            "Loaded graph store: {} nodes, {} of {} edges kept",
            nodes.len(),
            edges.len(),
            total_edges
        );

        Ok(Self {
            nodes,
            edges,
            node_index,
            name_index,
            outgoing,
        })
    }

    fn validate(nodes: &[Node], edges: &[Edge]) -> GraphResult<()> {
        let mut known = FxHashSet::default();
        let mut names = FxHashSet::default();
        for node in nodes {
            if !known.insert(node.id) {
                return Err(GraphError::DuplicateNode(node.id));
            }
            if !names.insert(node.name.as_str()) {
                return Err(GraphError::DuplicateName(node.name.clone()));
            }
        }
        for edge in edges {
            if !known.contains(&edge.source) {
                return Err(GraphError::InvalidEdgeSource { edge: edge.id, node: edge.source });
            }
            if !known.contains(&edge.target) {
                return Err(GraphError::InvalidEdgeTarget { edge: edge.id, node: edge.target });
            }
        }
        Ok(())
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes, sorted by id
    pub fn all_nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges, in load order
    pub fn all_edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.node_index.get(&id).map(|&pos| &self.nodes[pos])
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.name_index.get(name).map(|&pos| &self.nodes[pos])
    }

    /// Get outgoing edges of a node, in load order
    pub fn get_outgoing_edges(&self, id: NodeId) -> Vec<&Edge> {
        match self.node_index.get(&id) {
            Some(&pos) => self.outgoing[pos].iter().map(|&e| &self.edges[e]).collect(),
            None => Vec::new(),
        }
    }

    /// Out-neighbors of `id` with the weight read from `weight_property`.
    ///
    /// `None` projects every edge with weight 1.0.
    pub fn neighbors(&self, id: NodeId, weight_property: Option<&str>) -> GraphResult<Vec<(NodeId, f64)>> {
        if !self.has_node(id) {
            return Err(GraphError::NodeNotFound(id));
        }

        self.get_outgoing_edges(id)
            .into_iter()
            .map(|edge| -> GraphResult<(NodeId, f64)> {
                let weight = match weight_property {
                    Some(property) => edge.weight(property)?,
                    None => 1.0,
                };
                Ok((edge.target, weight))
            })
            .collect()
    }

    pub fn statistics(&self) -> GraphStatistics {
        let mut edges_per_type = BTreeMap::new();
        for edge in &self.edges {
            let key = edge.edge_type.as_ref().map(|t| t.as_str().to_string()).unwrap_or_default();
            *edges_per_type.entry(key).or_insert(0) += 1;
        }

        GraphStatistics {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            edges_per_type,
            sink_count: self.outgoing.iter().filter(|out| out.is_empty()).count(),
        }
    }
}
