//! Pathfinding algorithms
//!
//! Unweighted BFS and weighted Dijkstra over a [`GraphView`]. Both return an
//! empty path for an unreachable target and fail only when an endpoint is not
//! part of the view.

use super::common::{GraphView, NodeId};
use super::error::{AlgoError, AlgoResult};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// Result of a pathfinding algorithm
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    /// Nodes from source to target inclusive; empty when unreachable
    pub path: Vec<NodeId>,
    /// Total weight of `path`, `f64::INFINITY` when unreachable
    pub cost: f64,
}

impl PathResult {
    fn unreachable(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            path: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    /// Whether a path was found
    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }
}

fn endpoints(view: &GraphView, source: NodeId, target: NodeId) -> AlgoResult<(usize, usize)> {
    let source_idx = view.index_of(source).ok_or(AlgoError::NodeNotFound(source))?;
    let target_idx = view.index_of(target).ok_or(AlgoError::NodeNotFound(target))?;
    Ok((source_idx, target_idx))
}

fn reconstruct(view: &GraphView, parent: &[Option<usize>], target_idx: usize) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut curr = Some(target_idx);
    while let Some(idx) = curr {
        path.push(view.index_to_node[idx]);
        curr = parent[idx];
    }
    path.reverse();
    path
}

/// Breadth-First Search (Unweighted Shortest Path)
///
/// Neighbors are visited in ascending index order so equal-length paths resolve
/// deterministically.
pub fn bfs(view: &GraphView, source: NodeId, target: NodeId) -> AlgoResult<PathResult> {
    let (source_idx, target_idx) = endpoints(view, source, target)?;

    let mut queue = VecDeque::new();
    let mut visited = vec![false; view.node_count];
    let mut parent: Vec<Option<usize>> = vec![None; view.node_count];

    queue.push_back(source_idx);
    visited[source_idx] = true;

    while let Some(current_idx) = queue.pop_front() {
        if current_idx == target_idx {
            let path = reconstruct(view, &parent, target_idx);
            return Ok(PathResult {
                source,
                target,
                cost: (path.len() - 1) as f64,
                path,
            });
        }

        let mut next: Vec<usize> = view.successors(current_idx).to_vec();
        next.sort_unstable();
        next.dedup();

        for next_idx in next {
            if !visited[next_idx] {
                visited[next_idx] = true;
                parent[next_idx] = Some(current_idx);
                queue.push_back(next_idx);
            }
        }
    }

    Ok(PathResult::unreachable(source, target))
}

/// State for Dijkstra priority queue
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node_idx: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys for a min-heap: lowest cost, then lowest index
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node_idx.cmp(&self.node_idx))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's Algorithm (Weighted Shortest Path)
///
/// Uses edge weights from the view if available, otherwise assumes 1.0.
/// Every weight must be finite and non-negative; the whole view is checked
/// before the search starts.
pub fn dijkstra(view: &GraphView, source: NodeId, target: NodeId) -> AlgoResult<PathResult> {
    let (source_idx, target_idx) = endpoints(view, source, target)?;
    view.ensure_non_negative()?;

    let n = view.node_count;
    let mut dist = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[source_idx] = 0.0;
    heap.push(State { cost: 0.0, node_idx: source_idx });

    while let Some(State { cost, node_idx }) = heap.pop() {
        if settled[node_idx] || cost > dist[node_idx] {
            continue;
        }
        settled[node_idx] = true;

        if node_idx == target_idx {
            return Ok(PathResult {
                source,
                target,
                path: reconstruct(view, &parent, target_idx),
                cost,
            });
        }

        let weights = view.weights(node_idx);

        for (i, &next_idx) in view.successors(node_idx).iter().enumerate() {
            if settled[next_idx] {
                continue;
            }
            let weight = weights.map_or(1.0, |w| w[i]);
            let next_cost = cost + weight;

            if next_cost < dist[next_idx] {
                dist[next_idx] = next_cost;
                parent[next_idx] = Some(node_idx);
                heap.push(State { cost: next_cost, node_idx: next_idx });
            }
        }
    }

    Ok(PathResult::unreachable(source, target))
}
