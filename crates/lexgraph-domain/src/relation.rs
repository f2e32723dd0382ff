//! Cross-reference relations between nodes
//!
//! These are non-owning: a cross-reference carries only the relation kind
//! and the target id, and may point at nodes in other modules. Resolution
//! happens by lookup through the registry, never through embedded object
//! references, so reference cycles across modules cannot become ownership
//! cycles.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of cross-reference between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrossRefKind {
    /// The target interprets this node (e.g., a case construing a rule)
    Interprets,

    /// The target extends or elaborates this node
    Extends,

    /// This node has been overruled by the target
    OverruledBy,

    /// This node distinguishes itself from the target
    Distinguishes,

    /// This node conflicts with the target
    ConflictsWith,

    /// This node harmonizes with the target
    HarmonizesWith,
}

impl CrossRefKind {
    /// Canonical snake_case label
    pub fn as_str(&self) -> &'static str {
        match self {
            CrossRefKind::Interprets => "interprets",
            CrossRefKind::Extends => "extends",
            CrossRefKind::OverruledBy => "overruled_by",
            CrossRefKind::Distinguishes => "distinguishes",
            CrossRefKind::ConflictsWith => "conflicts_with",
            CrossRefKind::HarmonizesWith => "harmonizes_with",
        }
    }
}

impl fmt::Display for CrossRefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single non-owning edge from the holding node to `target`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrossRef {
    /// Relation kind
    pub kind: CrossRefKind,

    /// Target node id, possibly in another module
    pub target: NodeId,
}

impl CrossRef {
    /// Create a cross-reference edge
    pub fn new(kind: CrossRefKind, target: NodeId) -> Self {
        Self { kind, target }
    }
}
