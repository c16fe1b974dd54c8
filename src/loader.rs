//! Graph data sources
//!
//! A [`GraphSource`] hands the service a finite node list and edge list each
//! time a projection is built. How the data is fetched is up to the source;
//! two are provided here: an in-memory one and a JSON file reader.

use crate::graph::{Edge, EdgeId, EdgeType, Label, Node, NodeId, PropertyMap};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while fetching graph data
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed graph document: {0}")]
    Json(#[from] serde_json::Error),
}

/// A node as supplied by a source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: u64,
    /// Display name; defaults to the id rendered as text
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// An edge as supplied by a source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source_id: u64,
    pub target_id: u64,
    #[serde(rename = "type", default)]
    pub edge_type: Option<String>,
    #[serde(default)]
    pub properties: PropertyMap,
}

/// Raw graph document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl GraphData {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert records into store nodes and edges; edge ids follow input order.
    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        let nodes = self
            .nodes
            .into_iter()
            .map(|record| Node {
                id: NodeId::new(record.id),
                name: record.name.unwrap_or_else(|| record.id.to_string()),
                labels: record.labels.into_iter().map(Label::new).collect(),
            })
            .collect();

        let edges = self
            .edges
            .into_iter()
            .enumerate()
            .map(|(pos, record)| Edge {
                id: EdgeId::new(pos as u64),
                source: NodeId::new(record.source_id),
                target: NodeId::new(record.target_id),
                edge_type: record.edge_type.map(EdgeType::new),
                properties: record.properties,
            })
            .collect();

        (nodes, edges)
    }
}

/// Supplier of graph data for projections
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Fetch the full node and edge lists
    async fn fetch(&self) -> Result<GraphData, LoadError>;
}

/// Source backed by a document held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    data: GraphData,
}

impl InMemorySource {
    pub fn new(data: GraphData) -> Self {
        Self { data }
    }
}

#[async_trait]
impl GraphSource for InMemorySource {
    async fn fetch(&self) -> Result<GraphData, LoadError> {
        Ok(self.data.clone())
    }
}

/// Source that re-reads a JSON document on every fetch
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl GraphSource for JsonFileSource {
    async fn fetch(&self) -> Result<GraphData, LoadError> {
        debug!("Reading graph document from {:?}", self.path);
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        let data = GraphData::from_json_str(&text)?;
        info!(
            "Read {} nodes and {} edges from {:?}",
            data.nodes.len(),
            data.edges.len(),
            self.path
        );
        Ok(data)
    }
}
