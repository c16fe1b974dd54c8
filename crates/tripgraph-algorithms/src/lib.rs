pub mod common;
pub mod error;
pub mod pagerank;
pub mod pathfinding;

pub use common::{GraphView, NodeId};
pub use error::{AlgoError, AlgoResult};
pub use pagerank::{page_rank, PageRankConfig, RankResult};
pub use pathfinding::{bfs, dijkstra, PathResult};
