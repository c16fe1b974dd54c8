//! Weighted PageRank by power iteration
//!
//! Each node starts at `1/N`. Per iteration a node passes its score to its
//! successors in proportion to edge weight over its total outgoing weight.
//! Nodes with zero outgoing weight are dangling: their mass is spread evenly
//! over every node. With that policy the scores always sum to one.

use super::common::{GraphView, NodeId};
use super::error::{AlgoError, AlgoResult};
use rayon::prelude::*;
use std::cmp::Ordering;

/// PageRank configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Stop early once the L1 change of an iteration drops below this value.
    ///
    /// `None` runs exactly `iterations` iterations, which keeps scores
    /// reproducible for a given iteration count.
    pub tolerance: Option<f64>,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            iterations: 20,
            tolerance: None,
        }
    }
}

impl PageRankConfig {
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> AlgoResult<()> {
        if self.iterations < 1 {
            return Err(AlgoError::InvalidConfig(format!(
                "max iterations must be at least 1, got {}",
                self.iterations
            )));
        }
        if !(self.damping_factor > 0.0 && self.damping_factor < 1.0) {
            return Err(AlgoError::InvalidConfig(format!(
                "damping factor must be in (0, 1), got {}",
                self.damping_factor
            )));
        }
        if let Some(tolerance) = self.tolerance {
            if !(tolerance > 0.0 && tolerance.is_finite()) {
                return Err(AlgoError::InvalidConfig(format!(
                    "tolerance must be positive, got {}",
                    tolerance
                )));
            }
        }
        Ok(())
    }
}

/// Scores ordered by score descending, then node id ascending
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankResult {
    pub scores: Vec<(NodeId, f64)>,
    /// Iterations actually run
    pub iterations: usize,
}

impl RankResult {
    pub fn top(&self) -> Option<(NodeId, f64)> {
        self.scores.first().copied()
    }

    pub fn bottom(&self) -> Option<(NodeId, f64)> {
        self.scores.last().copied()
    }

    pub fn score_of(&self, node: NodeId) -> Option<f64> {
        self.scores.iter().find(|(id, _)| *id == node).map(|(_, s)| *s)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Calculate PageRank for the graph view
pub fn page_rank(view: &GraphView, config: &PageRankConfig) -> AlgoResult<RankResult> {
    config.validate()?;
    view.ensure_non_negative()?;

    let n = view.node_count;
    if n == 0 {
        return Ok(RankResult::default());
    }

    let nf = n as f64;
    let d = config.damping_factor;
    let base_score = (1.0 - d) / nf;

    let out_weight: Vec<f64> = (0..n).map(|i| view.out_weight(i)).collect();
    let dangling: Vec<usize> = (0..n).filter(|&i| out_weight[i] <= 0.0).collect();

    let mut scores = vec![1.0 / nf; n];
    let mut next_scores = vec![0.0; n];
    let mut iterations = 0;

    for _ in 0..config.iterations {
        iterations += 1;

        let dangling_share = dangling.iter().map(|&i| scores[i]).sum::<f64>() / nf;

        next_scores.par_iter_mut().enumerate().for_each(|(i, next)| {
            let sources = view.predecessors(i);
            let mut sum_incoming = 0.0;

            match view.in_weights(i) {
                Some(weights) => {
                    for (&source_idx, &w) in sources.iter().zip(weights) {
                        if out_weight[source_idx] > 0.0 {
                            sum_incoming += scores[source_idx] * (w / out_weight[source_idx]);
                        }
                    }
                }
                None => {
                    for &source_idx in sources {
                        sum_incoming += scores[source_idx] / out_weight[source_idx];
                    }
                }
            }

            *next = base_score + d * (sum_incoming + dangling_share);
        });

        let total_diff: f64 = scores
            .iter()
            .zip(&next_scores)
            .map(|(old, new)| (new - old).abs())
            .sum();

        std::mem::swap(&mut scores, &mut next_scores);

        if let Some(tolerance) = config.tolerance {
            if total_diff < tolerance {
                break;
            }
        }
    }

    let mut ranked: Vec<(NodeId, f64)> = scores
        .into_iter()
        .enumerate()
        .map(|(idx, score)| (view.index_to_node[idx], score))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    Ok(RankResult { scores: ranked, iterations })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted(n: usize, edges: &[(usize, usize, f64)]) -> GraphView {
        let mut outgoing = vec![vec![]; n];
        let mut weights = vec![vec![]; n];
        for &(u, v, w) in edges {
            outgoing[u].push(v);
            weights[u].push(w);
        }
        GraphView::from_adjacency_list((1..=n as u64).collect(), outgoing, Some(weights))
    }

    fn total(result: &RankResult) -> f64 {
        result.scores.iter().map(|(_, s)| s).sum()
    }

    #[test]
    fn test_cycle_one_iteration_is_uniform() {
        let view = weighted(3, &[(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)]);

        let result = page_rank(&view, &PageRankConfig::with_iterations(1)).unwrap();
        let expected = (1.0 - 0.85) / 3.0 + 0.85 * (1.0 / 3.0);
        for (_, score) in &result.scores {
            assert!((score - expected).abs() < 1e-12);
        }
        // equal scores fall back to id order
        let ids: Vec<NodeId> = result.scores.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_star_center_ranks_first() {
        // Center (1) points to leaves, leaves point back
        let view = weighted(3, &[(0, 1, 1.0), (0, 2, 1.0), (1, 0, 1.0), (2, 0, 1.0)]);

        let result = page_rank(&view, &PageRankConfig::default()).unwrap();
        assert_eq!(result.top().unwrap().0, 1);
        assert!(result.top().unwrap().1 > result.bottom().unwrap().1);
    }

    #[test]
    fn test_weights_shift_rank() {
        // 1 splits its mass 9:1 between 2 and 3
        let view = weighted(3, &[(0, 1, 9.0), (0, 2, 1.0), (1, 0, 1.0), (2, 0, 1.0)]);

        let result = page_rank(&view, &PageRankConfig::default()).unwrap();
        assert!(result.score_of(2).unwrap() > result.score_of(3).unwrap());
    }

    #[test]
    fn test_scores_sum_to_one_with_dangling_nodes() {
        // 3 and 4 are dangling, 4 is isolated
        let view = weighted(4, &[(0, 1, 2.0), (1, 2, 1.0), (0, 2, 1.0)]);

        for iterations in [1, 2, 5, 20, 100] {
            let result = page_rank(&view, &PageRankConfig::with_iterations(iterations)).unwrap();
            assert!((total(&result) - 1.0).abs() < 1e-9);
            assert_eq!(result.iterations, iterations);
        }
    }

    #[test]
    fn test_zero_weight_node_is_dangling() {
        let view = weighted(2, &[(0, 1, 0.0)]);

        let result = page_rank(&view, &PageRankConfig::default()).unwrap();
        assert!((total(&result) - 1.0).abs() < 1e-9);
        assert!(result.scores.iter().all(|(_, s)| s.is_finite()));
    }

    #[test]
    fn test_deterministic_runs() {
        let view = weighted(
            5,
            &[(0, 1, 3.0), (1, 2, 1.5), (2, 0, 2.0), (3, 2, 1.0), (4, 3, 7.0), (2, 4, 0.5)],
        );

        let a = page_rank(&view, &PageRankConfig::default()).unwrap();
        let b = page_rank(&view, &PageRankConfig::default()).unwrap();
        assert_eq!(a.scores.len(), b.scores.len());
        for (x, y) in a.scores.iter().zip(&b.scores) {
            assert_eq!(x.0, y.0);
            assert_eq!(x.1.to_bits(), y.1.to_bits());
        }
    }

    #[test]
    fn test_dominant_node_converges() {
        let view = weighted(4, &[(1, 0, 1.0), (2, 0, 1.0), (3, 0, 1.0), (0, 1, 1.0)]);

        let at = |iterations| {
            page_rank(&view, &PageRankConfig::with_iterations(iterations))
                .unwrap()
                .score_of(1)
                .unwrap()
        };
        let (s100, s200, s400) = (at(100), at(200), at(400));
        assert!((s200 - s100).abs() < 1e-6);
        assert!((s400 - s200).abs() < 1e-9);
        assert!(s400 < 1.0);
        assert_eq!(page_rank(&view, &PageRankConfig::default()).unwrap().top().unwrap().0, 1);
    }

    #[test]
    fn test_tolerance_allows_early_exit() {
        let view = weighted(3, &[(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)]);
        let config = PageRankConfig {
            iterations: 50,
            tolerance: Some(1e-6),
            ..PageRankConfig::default()
        };

        let result = page_rank(&view, &config).unwrap();
        assert!(result.iterations < 50);
    }

    #[test]
    fn test_invalid_config() {
        let view = weighted(1, &[]);

        assert!(matches!(
            page_rank(&view, &PageRankConfig::with_iterations(0)),
            Err(AlgoError::InvalidConfig(_))
        ));
        for damping_factor in [0.0, 1.0, -0.2, f64::NAN] {
            let config = PageRankConfig { damping_factor, ..PageRankConfig::default() };
            assert!(matches!(page_rank(&view, &config), Err(AlgoError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_single_and_empty_graph() {
        let single = page_rank(&weighted(1, &[]), &PageRankConfig::default()).unwrap();
        assert_eq!(single.scores.len(), 1);
        assert!((single.scores[0].1 - 1.0).abs() < 1e-12);

        let empty = page_rank(&weighted(0, &[]), &PageRankConfig::default()).unwrap();
        assert!(empty.is_empty());
    }
}
