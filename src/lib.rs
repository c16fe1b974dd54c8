//! Tripgraph
//!
//! An in-process weighted graph engine answering two questions over a
//! projected trip graph: the cheapest route between two locations
//! (Dijkstra) and how central each location is (weighted PageRank).
//!
//! # Architecture
//!
//! - [`graph`]: immutable [`GraphStore`] built from a node list and an edge list
//! - [`algo`]: CSR projection of a store for one weight property, plus the
//!   algorithms from `tripgraph-algorithms`
//! - [`loader`]: [`GraphSource`] implementations that supply graph data
//! - [`service`]: [`QueryService`], owning the active projection snapshot
//! - [`client`]: [`GraphClient`], the path-of-names and max/min PageRank API
//!
//! ## Example Usage
//!
//! ```rust
//! use tripgraph::{GraphClient, GraphData, InMemorySource};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let data = GraphData::from_json_str(r#"{
//!     "nodes": [
//!         {"id": 1, "name": "A", "labels": ["Location"]},
//!         {"id": 2, "name": "B", "labels": ["Location"]}
//!     ],
//!     "edges": [
//!         {"source_id": 1, "target_id": 2, "type": "TRIP", "properties": {"distance": 3.5}}
//!     ]
//! }"#).unwrap();
//!
//! let client = GraphClient::new(InMemorySource::new(data));
//! let path = client.shortest_path("A", "B").await.unwrap();
//! assert_eq!(path.len(), 2);
//!
//! let (top, bottom) = client.page_rank(20, "distance").await.unwrap();
//! assert_eq!(top.name, "B");
//! assert_eq!(bottom.name, "A");
//! # }
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod client;
pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod service;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeId, EdgeType, GraphError, GraphResult, GraphStatistics, GraphStore, Label,
    LoadOptions, Node, NodeId, PropertyMap, PropertyValue,
};

pub use client::{GraphClient, PathStep, RankedNode};
pub use config::{BusyPolicy, ConfigError, ProjectionDefaults, ServiceConfig, TripGraphConfig};
pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use loader::{EdgeRecord, GraphData, GraphSource, InMemorySource, JsonFileSource, LoadError, NodeRecord};
pub use service::{
    NodePath, Projection, ProjectionHandle, ProjectionInfo, ProjectionRequest, QueryService,
    RankEntry, RankedNodes,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
