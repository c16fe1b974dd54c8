//! Node implementation
//!
//! A node is identified by a loader-supplied id and addressed by callers
//! through its display name.

use super::types::{Label, NodeId};
use serde::{Deserialize, Serialize};

/// A node in the loaded graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Display name, unique within a store
    pub name: String,

    /// Labels used by projection filters
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl Node {
    /// Create a new node without labels
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            name: name.into(),
            labels: Vec::new(),
        }
    }

    /// Builder-style label attachment
    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        let label = label.into();
        if !self.labels.contains(&label) {
            self.labels.push(label);
        }
        self
    }

    pub fn has_label(&self, label: &Label) -> bool {
        self.labels.contains(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_labels() {
        let node = Node::new(42u64, "42").with_label("Location").with_label("Location");

        assert_eq!(node.id, NodeId::new(42));
        assert_eq!(node.labels.len(), 1);
        assert!(node.has_label(&Label::new("Location")));
        assert!(!node.has_label(&Label::new("Zone")));
    }
}
