//! Caller API
//!
//! A shortest path as a list of names, and PageRank reduced to its highest
//! and lowest ranked node. Calls share the active projection and only
//! project again when they need a different weight property.

use crate::config::{ProjectionDefaults, TripGraphConfig};
use crate::error::{ServiceError, ServiceResult};
use crate::loader::GraphSource;
use crate::service::{NodePath, ProjectionHandle, ProjectionRequest, QueryService};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::debug;

/// One hop of a returned path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub name: String,
}

/// A node with its PageRank score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    pub name: String,
    pub score: f64,
}

pub struct GraphClient<S> {
    service: QueryService<S>,
    defaults: ProjectionDefaults,
}

impl<S: GraphSource> GraphClient<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, TripGraphConfig::default())
    }

    pub fn with_config(source: S, config: TripGraphConfig) -> Self {
        Self {
            service: QueryService::with_config(source, config.service),
            defaults: config.projection,
        }
    }

    /// Underlying service, for handle-based access
    pub fn service(&self) -> &QueryService<S> {
        &self.service
    }

    pub fn defaults(&self) -> &ProjectionDefaults {
        &self.defaults
    }

    fn request_for(&self, weight_property: &str) -> ProjectionRequest {
        let mut request = ProjectionRequest::new(&self.defaults.name).weight_property(weight_property);
        request.node_label = self.defaults.node_label.clone();
        request.edge_type = self.defaults.edge_type.clone();
        request
    }

    /// Handle of the default projection weighted by `weight_property`.
    ///
    /// Reuses the active projection when it already matches; otherwise it is
    /// replaced atomically, and a failed build leaves the previous one active.
    pub async fn projection_for(&self, weight_property: &str) -> ServiceResult<ProjectionHandle> {
        self.service.ensure_projection(self.request_for(weight_property)).await
    }

    /// Run `query` against the projection for `weight_property`, once more
    /// if another caller replaced it in between.
    async fn with_projection<T, F, Fut>(&self, weight_property: &str, query: F) -> ServiceResult<T>
    where
        F: Fn(ProjectionHandle) -> Fut,
        Fut: Future<Output = ServiceResult<T>>,
    {
        let handle = self.projection_for(weight_property).await?;
        match query(handle).await {
            Err(ServiceError::StaleHandle { name, generation, .. }) => {
                debug!("Projection '{}' generation {} replaced mid-call, retrying", name, generation);
                let handle = self.projection_for(weight_property).await?;
                query(handle).await
            }
            other => other,
        }
    }

    /// Weighted shortest path from `source_name` to `target_name`.
    ///
    /// An unreachable target yields an empty list; an unknown name is an error.
    pub async fn shortest_path(&self, source_name: &str, target_name: &str) -> ServiceResult<Vec<PathStep>> {
        let path = self
            .with_projection(&self.defaults.weight_property, move |handle| async move {
                self.service.run_shortest_path(&handle, source_name, target_name).await
            })
            .await?;

        Ok(to_steps(path))
    }

    /// Unweighted (fewest hops) path over the same projection
    pub async fn bfs(&self, source_name: &str, target_name: &str) -> ServiceResult<Vec<PathStep>> {
        let path = self
            .with_projection(&self.defaults.weight_property, move |handle| async move {
                self.service.run_bfs(&handle, source_name, target_name).await
            })
            .await?;

        Ok(to_steps(path))
    }

    /// Highest and lowest ranked node after `max_iterations` iterations
    pub async fn page_rank(
        &self,
        max_iterations: usize,
        weight_property: &str,
    ) -> ServiceResult<(RankedNode, RankedNode)> {
        let ranked = self
            .with_projection(weight_property, move |handle| async move {
                self.service
                    .run_pagerank(&handle, max_iterations, Some(weight_property))
                    .await
            })
            .await?;

        match (ranked.top(), ranked.bottom()) {
            (Some(top), Some(bottom)) => Ok((
                RankedNode {
                    name: top.name.clone(),
                    score: top.score,
                },
                RankedNode {
                    name: bottom.name.clone(),
                    score: bottom.score,
                },
            )),
            _ => Err(ServiceError::Validation(format!(
                "projection '{}' has no nodes to rank",
                self.defaults.name
            ))),
        }
    }
}

fn to_steps(path: NodePath) -> Vec<PathStep> {
    path.nodes
        .into_iter()
        .map(|node| PathStep { name: node.name })
        .collect()
}
