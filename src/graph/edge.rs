//! Edge implementation
//!
//! Edges are directed, typed and carry a property map. Several edges may join
//! the same pair of nodes.

use super::property::{PropertyMap, PropertyValue};
use super::store::{GraphError, GraphResult};
use super::types::{EdgeId, EdgeType, NodeId};
use serde::{Deserialize, Serialize};

/// A directed edge in the loaded graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Position in load order
    pub id: EdgeId,

    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    /// Relationship type, if the loader supplied one
    pub edge_type: Option<EdgeType>,

    /// Properties associated with this edge
    pub properties: PropertyMap,
}

impl Edge {
    /// Create a new untyped edge without properties
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Edge {
            id,
            source,
            target,
            edge_type: None,
            properties: PropertyMap::new(),
        }
    }

    pub fn with_type(mut self, edge_type: impl Into<EdgeType>) -> Self {
        self.edge_type = Some(edge_type.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn is_type(&self, edge_type: &EdgeType) -> bool {
        self.edge_type.as_ref() == Some(edge_type)
    }

    /// Read `property` as an edge weight.
    ///
    /// Missing, non-numeric and non-finite values are errors; nothing is
    /// defaulted.
    pub fn weight(&self, property: &str) -> GraphResult<f64> {
        let value = self.get_property(property).ok_or_else(|| GraphError::MissingProperty {
            edge: self.id,
            property: property.to_string(),
        })?;

        let weight = value.as_number().ok_or_else(|| GraphError::NonNumericProperty {
            edge: self.id,
            property: property.to_string(),
            type_name: value.type_name(),
        })?;

        if !weight.is_finite() {
            return Err(GraphError::NonFiniteWeight {
                edge: self.id,
                property: property.to_string(),
            });
        }
        Ok(weight)
    }
}
