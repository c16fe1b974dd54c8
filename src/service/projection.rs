//! Projections: named, generation-stamped graph snapshots

use crate::algo::build_view;
use crate::error::{ServiceError, ServiceResult};
use crate::graph::{GraphStatistics, GraphStore, LoadOptions, Node};
use crate::loader::GraphData;
use serde::{Deserialize, Serialize};
use tripgraph_algorithms::GraphView;

/// What to project and how to weight it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    pub name: String,
    /// Keep only nodes with this label
    pub node_label: Option<String>,
    /// Keep only edges of this type
    pub edge_type: Option<String>,
    /// Edge property used as weight; `None` weighs every edge 1.0
    pub weight_property: Option<String>,
}

impl ProjectionRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn node_label(mut self, label: impl Into<String>) -> Self {
        self.node_label = Some(label.into());
        self
    }

    pub fn edge_type(mut self, edge_type: impl Into<String>) -> Self {
        self.edge_type = Some(edge_type.into());
        self
    }

    pub fn weight_property(mut self, property: impl Into<String>) -> Self {
        self.weight_property = Some(property.into());
        self
    }
}

/// Ticket for querying one projection generation.
///
/// Becomes stale as soon as another projection replaces or drops it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectionHandle {
    name: String,
    generation: u64,
}

impl ProjectionHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Summary of an active projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInfo {
    pub handle: ProjectionHandle,
    pub weight_property: Option<String>,
    pub statistics: GraphStatistics,
    /// Unix seconds
    pub created_at: i64,
}

/// Immutable snapshot queried by the engines
#[derive(Debug)]
pub struct Projection {
    handle: ProjectionHandle,
    request: ProjectionRequest,
    store: GraphStore,
    view: GraphView,
    created_at: i64,
}

impl Projection {
    /// Load the store and build the view for the requested weight property
    pub fn build(
        request: ProjectionRequest,
        generation: u64,
        data: GraphData,
        deduplicate: bool,
    ) -> ServiceResult<Self> {
        let options = LoadOptions {
            node_label: request.node_label.clone(),
            edge_type: request.edge_type.clone(),
            deduplicate,
        };
        let (nodes, edges) = data.into_parts();
        let store = GraphStore::load(nodes, edges, &options)?;
        let view = build_view(&store, request.weight_property.as_deref())?;

        Ok(Self {
            handle: ProjectionHandle {
                name: request.name.clone(),
                generation,
            },
            request,
            store,
            view,
            created_at: chrono::Utc::now().timestamp(),
        })
    }

    pub fn handle(&self) -> &ProjectionHandle {
        &self.handle
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn view(&self) -> &GraphView {
        &self.view
    }

    pub fn weight_property(&self) -> Option<&str> {
        self.request.weight_property.as_deref()
    }

    /// Whether this projection was built from exactly `request`
    pub fn matches(&self, request: &ProjectionRequest) -> bool {
        &self.request == request
    }

    /// Look a node up by display name
    pub fn resolve(&self, name: &str) -> ServiceResult<&Node> {
        self.store
            .node_by_name(name)
            .ok_or_else(|| ServiceError::NotFound(name.to_string()))
    }

    pub fn info(&self) -> ProjectionInfo {
        ProjectionInfo {
            handle: self.handle.clone(),
            weight_property: self.request.weight_property.clone(),
            statistics: self.store.statistics(),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn data() -> GraphData {
        GraphData::from_json_str(
            r#"{
                "nodes": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}],
                "edges": [{"source_id": 1, "target_id": 2, "properties": {"distance": 4}}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_build_and_resolve() {
        let request = ProjectionRequest::new("graph").weight_property("distance");
        let projection = Projection::build(request, 7, data(), false).unwrap();

        assert_eq!(projection.handle().generation(), 7);
        assert_eq!(projection.handle().name(), "graph");
        assert_eq!(projection.view().weights(0), Some(&[4.0][..]));
        assert_eq!(projection.resolve("B").unwrap().id.as_u64(), 2);
        assert_eq!(projection.resolve("Z").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(projection.info().statistics.edge_count, 1);
    }

    #[test]
    fn test_matches_full_request() {
        let request = ProjectionRequest::new("graph").edge_type("TRIP").weight_property("distance");
        let projection = Projection::build(request.clone(), 1, data(), false).unwrap();

        assert!(projection.matches(&request));
        assert!(!projection.matches(&request.clone().weight_property("duration")));
        assert!(!projection.matches(&ProjectionRequest::new("graph").weight_property("distance")));
    }

    #[test]
    fn test_build_fails_on_missing_weight() {
        let request = ProjectionRequest::new("graph").weight_property("duration");
        let err = Projection::build(request, 1, data(), false).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MissingProperty);
    }
}
