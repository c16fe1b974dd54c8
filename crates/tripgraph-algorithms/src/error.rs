//! Error types shared by the graph algorithms

use crate::common::NodeId;
use thiserror::Error;

/// Errors raised by algorithm execution over a [`GraphView`](crate::GraphView)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgoError {
    #[error("Node {0} not found in view")]
    NodeNotFound(NodeId),

    #[error("Invalid weight {weight} on edge {from} -> {to}")]
    InvalidWeight {
        from: NodeId,
        to: NodeId,
        weight: f64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type AlgoResult<T> = Result<T, AlgoError>;
