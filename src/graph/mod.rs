//! Graph data model
//!
//! Nodes with names and labels, directed typed edges with numeric
//! properties, and the immutable [`GraphStore`] built from them.

pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use store::{GraphError, GraphResult, GraphStatistics, GraphStore, LoadOptions};
pub use types::{EdgeId, EdgeType, Label, NodeId};
