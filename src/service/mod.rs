//! Query service
//!
//! Owns the single active projection. `project` builds a fresh snapshot and
//! swaps it in; queries clone the snapshot `Arc` and run against it on the
//! blocking pool, so a replacement never disturbs a query already running.

pub mod projection;

pub use projection::{Projection, ProjectionHandle, ProjectionInfo, ProjectionRequest};

use crate::algo::{bfs, build_view, dijkstra, page_rank, PageRankConfig, RankResult};
use crate::config::{BusyPolicy, ServiceConfig};
use crate::error::{ServiceError, ServiceResult};
use crate::graph::{GraphStatistics, GraphStore, Node, NodeId};
use crate::loader::GraphSource;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use tripgraph_algorithms::PathResult;

/// Shortest path expressed as loaded nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePath {
    /// Source to target inclusive; empty when the target is unreachable
    pub nodes: Vec<Node>,
    /// Total weight, infinite when unreachable
    pub cost: f64,
}

impl NodePath {
    pub fn is_reachable(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    pub id: NodeId,
    pub name: String,
    pub score: f64,
}

/// PageRank scores, highest first, ties by ascending id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNodes {
    pub entries: Vec<RankEntry>,
    pub iterations: usize,
}

impl RankedNodes {
    pub fn top(&self) -> Option<&RankEntry> {
        self.entries.first()
    }

    pub fn bottom(&self) -> Option<&RankEntry> {
        self.entries.last()
    }
}

async fn blocking<T, F>(task: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ServiceError::Internal(format!("query task failed: {}", e)))?
}

fn validate_request(request: &ProjectionRequest) -> ServiceResult<()> {
    if request.name.is_empty() {
        return Err(ServiceError::Validation("projection name must not be empty".to_string()));
    }
    Ok(())
}

fn to_node_path(projection: &Projection, result: PathResult) -> ServiceResult<NodePath> {
    let nodes = result
        .path
        .iter()
        .map(|&id| {
            projection
                .store()
                .get_node(NodeId::new(id))
                .cloned()
                .ok_or_else(|| ServiceError::Internal(format!("path node {} missing from store", id)))
        })
        .collect::<ServiceResult<Vec<Node>>>()?;
    Ok(NodePath { nodes, cost: result.cost })
}

fn to_rank_entries(store: &GraphStore, result: &RankResult) -> ServiceResult<Vec<RankEntry>> {
    result
        .scores
        .iter()
        .map(|&(id, score)| {
            let id = NodeId::new(id);
            let node = store
                .get_node(id)
                .ok_or_else(|| ServiceError::Internal(format!("ranked node {} missing from store", id)))?;
            Ok(RankEntry {
                id,
                name: node.name.clone(),
                score,
            })
        })
        .collect()
}

/// Projection lifecycle plus the shortest path and PageRank queries
pub struct QueryService<S> {
    source: S,
    config: ServiceConfig,
    active: RwLock<Option<Arc<Projection>>>,
    build_lock: Mutex<()>,
    generation: AtomicU64,
}

impl<S: GraphSource> QueryService<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, ServiceConfig::default())
    }

    pub fn with_config(source: S, config: ServiceConfig) -> Self {
        Self {
            source,
            config,
            active: RwLock::new(None),
            build_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Build a new projection from the source and make it the active one.
    ///
    /// Builds are serialized; the previous projection stays active until the
    /// new one is complete, and stays active if the build fails.
    pub async fn project(&self, request: ProjectionRequest) -> ServiceResult<ProjectionHandle> {
        validate_request(&request)?;

        let _guard = match self.config.busy_policy {
            BusyPolicy::Fail => self.build_lock.try_lock().map_err(|_| {
                warn!("Rejected projection '{}': another build is running", request.name);
                ServiceError::ProjectionBusy
            })?,
            BusyPolicy::Queue => self.build_lock.lock().await,
        };

        self.build(request).await
    }

    /// Handle of the active projection if it was built from `request`,
    /// otherwise build it.
    ///
    /// Concurrent callers asking for the same projection wait for a single
    /// build instead of failing busy, whatever the busy policy.
    pub async fn ensure_projection(&self, request: ProjectionRequest) -> ServiceResult<ProjectionHandle> {
        validate_request(&request)?;

        if let Some(handle) = self.matching_handle(&request).await {
            return Ok(handle);
        }

        let _guard = self.build_lock.lock().await;
        // Another caller may have built it while we waited
        if let Some(handle) = self.matching_handle(&request).await {
            return Ok(handle);
        }

        self.build(request).await
    }

    async fn matching_handle(&self, request: &ProjectionRequest) -> Option<ProjectionHandle> {
        self.active
            .read()
            .await
            .as_ref()
            .filter(|p| p.matches(request))
            .map(|p| p.handle().clone())
    }

    /// Fetch, build and swap in. Callers hold `build_lock`.
    async fn build(&self, request: ProjectionRequest) -> ServiceResult<ProjectionHandle> {
        let data = self.source.fetch().await?;
        let generation = self.generation.load(Ordering::SeqCst) + 1;
        let deduplicate = self.config.deduplicate_edges;
        let name = request.name.clone();

        let projection =
            blocking(move || Projection::build(request, generation, data, deduplicate)).await?;
        let handle = projection.handle().clone();
        let stats = projection.store().statistics();

        self.generation.store(generation, Ordering::SeqCst);
        *self.active.write().await = Some(Arc::new(projection));

        info!(
            "Projected '{}' generation {}: {} nodes, {} edges",
            name, generation, stats.node_count, stats.edge_count
        );
        Ok(handle)
    }

    /// Drop the active projection if it carries `name`.
    ///
    /// Returns the dropped handle. With `fail_if_missing` unset, dropping an
    /// absent projection is a no-op.
    pub async fn drop_projection(
        &self,
        name: &str,
        fail_if_missing: bool,
    ) -> ServiceResult<Option<ProjectionHandle>> {
        let mut active = self.active.write().await;
        match active.as_ref() {
            Some(projection) if projection.handle().name() == name => {
                let handle = projection.handle().clone();
                *active = None;
                info!("Dropped projection '{}' generation {}", name, handle.generation());
                Ok(Some(handle))
            }
            _ if fail_if_missing => Err(ServiceError::Validation(format!(
                "projection '{}' does not exist",
                name
            ))),
            _ => Ok(None),
        }
    }

    pub async fn current_handle(&self) -> Option<ProjectionHandle> {
        self.active.read().await.as_ref().map(|p| p.handle().clone())
    }

    /// Snapshot matching `handle`, or a stale-handle error
    pub async fn snapshot(&self, handle: &ProjectionHandle) -> ServiceResult<Arc<Projection>> {
        let active = self.active.read().await;
        match active.as_ref() {
            Some(projection) if projection.handle() == handle => Ok(Arc::clone(projection)),
            other => {
                warn!(
                    "Stale handle '{}' generation {}",
                    handle.name(),
                    handle.generation()
                );
                Err(ServiceError::StaleHandle {
                    name: handle.name().to_string(),
                    generation: handle.generation(),
                    active: other.map(|p| p.handle().generation()),
                })
            }
        }
    }

    pub async fn info(&self, handle: &ProjectionHandle) -> ServiceResult<ProjectionInfo> {
        Ok(self.snapshot(handle).await?.info())
    }

    pub async fn statistics(&self, handle: &ProjectionHandle) -> ServiceResult<GraphStatistics> {
        Ok(self.snapshot(handle).await?.store().statistics())
    }

    /// Weighted shortest path between two nodes, by name
    pub async fn run_shortest_path(
        &self,
        handle: &ProjectionHandle,
        source_name: &str,
        target_name: &str,
    ) -> ServiceResult<NodePath> {
        let projection = self.snapshot(handle).await?;
        let source = projection.resolve(source_name)?.id.as_u64();
        let target = projection.resolve(target_name)?.id.as_u64();
        debug!(
            "Dijkstra {} -> {} on '{}' weighted by {:?}",
            source_name,
            target_name,
            handle.name(),
            projection.weight_property()
        );

        blocking(move || {
            let result = dijkstra(projection.view(), source, target)?;
            to_node_path(&projection, result)
        })
        .await
    }

    /// Hop-count shortest path between two nodes, by name
    pub async fn run_bfs(
        &self,
        handle: &ProjectionHandle,
        source_name: &str,
        target_name: &str,
    ) -> ServiceResult<NodePath> {
        let projection = self.snapshot(handle).await?;
        let source = projection.resolve(source_name)?.id.as_u64();
        let target = projection.resolve(target_name)?.id.as_u64();
        debug!("BFS {} -> {} on '{}'", source_name, target_name, handle.name());

        blocking(move || {
            let result = bfs(projection.view(), source, target)?;
            to_node_path(&projection, result)
        })
        .await
    }

    /// PageRank over the projection.
    ///
    /// `weight_property` may differ from the projection's; the view for it is
    /// then built for this call only. `None` runs unweighted.
    pub async fn run_pagerank(
        &self,
        handle: &ProjectionHandle,
        max_iterations: usize,
        weight_property: Option<&str>,
    ) -> ServiceResult<RankedNodes> {
        let projection = self.snapshot(handle).await?;
        let config = PageRankConfig {
            damping_factor: self.config.damping_factor,
            iterations: max_iterations,
            tolerance: self.config.convergence_tolerance,
        };
        config.validate()?;

        let weight_property = weight_property.map(str::to_string);
        debug!(
            "PageRank on '{}': {} iterations weighted by {:?}",
            handle.name(),
            max_iterations,
            weight_property
        );

        blocking(move || {
            let result = if weight_property.as_deref() == projection.weight_property() {
                page_rank(projection.view(), &config)?
            } else {
                let view = build_view(projection.store(), weight_property.as_deref())?;
                page_rank(&view, &config)?
            };

            let entries = to_rank_entries(projection.store(), &result)?;

            Ok(RankedNodes {
                entries,
                iterations: result.iterations,
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::graph::LoadOptions;

    fn store() -> GraphStore {
        let nodes = vec![Node::new(1u64, "A"), Node::new(2u64, "B")];
        GraphStore::load(nodes, Vec::new(), &LoadOptions::default()).unwrap()
    }

    #[test]
    fn test_rank_entries_carry_names() {
        let result = RankResult {
            scores: vec![(2, 0.6), (1, 0.4)],
            iterations: 3,
        };
        let entries = to_rank_entries(&store(), &result).unwrap();

        assert_eq!(entries[0].name, "B");
        assert_eq!(entries[1].name, "A");
        assert_eq!(entries[1].id, NodeId::new(1));
    }

    #[test]
    fn test_rank_entry_for_unknown_node_is_internal_error() {
        let result = RankResult {
            scores: vec![(1, 0.5), (9, 0.5)],
            iterations: 1,
        };
        let err = to_rank_entries(&store(), &result).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().contains('9'));
    }
}
