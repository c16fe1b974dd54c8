//! Error taxonomy of the query service
//!
//! Store, loader and algorithm errors are folded into [`ServiceError`] at the
//! service boundary. Node ids in algorithm errors are reported as-is; name
//! lookups fail earlier with [`ServiceError::NotFound`].

use crate::graph::GraphError;
use crate::loader::LoadError;
use thiserror::Error;
use tripgraph_algorithms::AlgoError;

/// Failure class of a [`ServiceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    InvalidWeight,
    StaleHandle,
    ProjectionBusy,
    MissingProperty,
    Load,
    Internal,
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Node '{0}' not found in projection")]
    NotFound(String),

    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    #[error("Stale projection handle '{name}' (generation {generation}); active generation is {active:?}")]
    StaleHandle {
        name: String,
        generation: u64,
        active: Option<u64>,
    },

    #[error("Another projection is being built")]
    ProjectionBusy,

    #[error("Missing property: {0}")]
    MissingProperty(String),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::InvalidWeight(_) => ErrorKind::InvalidWeight,
            ServiceError::StaleHandle { .. } => ErrorKind::StaleHandle,
            ServiceError::ProjectionBusy => ErrorKind::ProjectionBusy,
            ServiceError::MissingProperty(_) => ErrorKind::MissingProperty,
            ServiceError::Load(_) => ErrorKind::Load,
            ServiceError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<GraphError> for ServiceError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::MissingProperty { .. } => ServiceError::MissingProperty(err.to_string()),
            GraphError::NonFiniteWeight { .. } => ServiceError::InvalidWeight(err.to_string()),
            GraphError::NodeNotFound(id) => ServiceError::NotFound(id.as_u64().to_string()),
            GraphError::DuplicateNode(_)
            | GraphError::DuplicateName(_)
            | GraphError::InvalidEdgeSource { .. }
            | GraphError::InvalidEdgeTarget { .. }
            | GraphError::NonNumericProperty { .. } => ServiceError::Validation(err.to_string()),
        }
    }
}

impl From<AlgoError> for ServiceError {
    fn from(err: AlgoError) -> Self {
        match err {
            AlgoError::NodeNotFound(id) => ServiceError::NotFound(id.to_string()),
            AlgoError::InvalidWeight { .. } => ServiceError::InvalidWeight(err.to_string()),
            AlgoError::InvalidConfig(msg) => ServiceError::Validation(msg),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
