//! Service configuration
//!
//! Every field has a default, so an empty YAML document is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// What `project` does when another projection is already being built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusyPolicy {
    /// Fail immediately with a busy error
    #[default]
    Fail,
    /// Wait for the running projection to finish
    Queue,
}

/// Query service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// PageRank damping factor
    pub damping_factor: f64,
    pub busy_policy: BusyPolicy,
    /// Drop parallel edges of the same type when loading
    pub deduplicate_edges: bool,
    /// Opt-in PageRank early exit; `None` always runs the requested iterations
    pub convergence_tolerance: Option<f64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            busy_policy: BusyPolicy::Fail,
            deduplicate_edges: false,
            convergence_tolerance: None,
        }
    }
}

/// Projection used by the caller API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionDefaults {
    pub name: String,
    pub node_label: Option<String>,
    pub edge_type: Option<String>,
    /// Weight property used for shortest paths
    pub weight_property: String,
}

impl Default for ProjectionDefaults {
    fn default() -> Self {
        Self {
            name: "graph".to_string(),
            node_label: Some("Location".to_string()),
            edge_type: Some("TRIP".to_string()),
            weight_property: "distance".to_string(),
        }
    }
}

/// Top-level configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripGraphConfig {
    pub service: ServiceConfig,
    pub projection: ProjectionDefaults,
}

impl TripGraphConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = self.service.damping_factor;
        if !(d > 0.0 && d < 1.0) {
            return Err(ConfigError::Invalid(format!("damping_factor must be in (0, 1), got {}", d)));
        }
        if let Some(t) = self.service.convergence_tolerance {
            if !(t > 0.0 && t.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "convergence_tolerance must be positive, got {}",
                    t
                )));
            }
        }
        if self.projection.name.is_empty() {
            return Err(ConfigError::Invalid("projection name must not be empty".to_string()));
        }
        Ok(())
    }
}
