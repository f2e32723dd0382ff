//! Validated, immutable node storage with traversal helpers
//!
//! A `NodeSet` is the run-time artifact of the design-time load: every node
//! passed the validator exactly once at construction, and nothing mutates
//! the set afterwards. Concurrent readers need no locking.

use crate::error::ValidationError;
use crate::validator::{NodeValidator, ValidationConfig};
use lexgraph_domain::{Dimension, KnowledgeNode, NodeId};
use std::collections::HashMap;
use tracing::debug;

/// Traversal direction for [`NodeSet::traverse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow child links
    Down,

    /// Follow parent links
    Up,

    /// Follow both
    Both,
}

/// Per-dimension and structural counts for a loaded node set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeSetStats {
    /// Total nodes loaded
    pub total_nodes: usize,

    /// Nodes with no parent
    pub root_nodes: usize,

    /// How many nodes populate each dimension
    pub dimension_counts: HashMap<Dimension, usize>,

    /// Total cross-reference edges
    pub cross_refs: usize,
}

/// The complete, validated node set of one module.
#[derive(Debug)]
pub struct NodeSet {
    nodes: HashMap<NodeId, KnowledgeNode>,
    roots: Vec<NodeId>,
}

impl NodeSet {
    /// Load and validate a node set for the given module.
    ///
    /// Runs every per-node check and the set-level structural invariants
    /// (forest shape, referential integrity). Any failure aborts the load
    /// with a [`ValidationError`] listing every issue found.
    pub fn load(
        module_id: &str,
        nodes: Vec<KnowledgeNode>,
        config: ValidationConfig,
    ) -> Result<Self, ValidationError> {
        let validator = NodeValidator::new(config);
        let mut issues = Vec::new();

        for node in &nodes {
            issues.extend(validator.validate_node(node).issues);
        }

        let map: HashMap<NodeId, KnowledgeNode> = nodes
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect();

        issues.extend(validator.validate_set(module_id, &map).issues);

        if !issues.is_empty() {
            return Err(ValidationError {
                module_id: module_id.to_string(),
                issues,
            });
        }

        let mut roots: Vec<NodeId> = map
            .values()
            .filter(|n| n.parent.is_none())
            .map(|n| n.id.clone())
            .collect();
        roots.sort();

        debug!(module_id, nodes = map.len(), roots = roots.len(), "node set loaded");

        Ok(Self { nodes: map, roots })
    }

    /// Look up a node by id
    pub fn get(&self, id: &NodeId) -> Option<&KnowledgeNode> {
        self.nodes.get(id)
    }

    /// Number of nodes in the set
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the set holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of nodes with no parent
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Iterate over all nodes (unspecified order)
    pub fn iter(&self) -> impl Iterator<Item = &KnowledgeNode> {
        self.nodes.values()
    }

    /// Child nodes of the given node
    pub fn children(&self, id: &NodeId) -> Vec<&KnowledgeNode> {
        match self.get(id) {
            Some(node) => node
                .children
                .iter()
                .filter_map(|child| self.get(child))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Parent node of the given node, if any
    pub fn parent(&self, id: &NodeId) -> Option<&KnowledgeNode> {
        self.get(id)?.parent.as_ref().and_then(|p| self.get(p))
    }

    /// Breadth-first traversal from `start`, bounded by `max_depth`.
    ///
    /// Cycle-safe by construction (the set is a validated forest), but a
    /// seen-set guards the Both direction against revisiting through the
    /// parent link.
    pub fn traverse(&self, start: &NodeId, direction: Direction, max_depth: usize) -> Vec<&KnowledgeNode> {
        let mut visited = Vec::new();
        let mut seen = std::collections::HashSet::new();
        let mut queue = std::collections::VecDeque::new();
        queue.push_back((start.clone(), 0usize));

        while let Some((current, depth)) = queue.pop_front() {
            if depth > max_depth || !seen.insert(current.clone()) {
                continue;
            }
            let Some(node) = self.get(&current) else {
                continue;
            };
            visited.push(node);

            if matches!(direction, Direction::Down | Direction::Both) {
                for child in &node.children {
                    queue.push_back((child.clone(), depth + 1));
                }
            }
            if matches!(direction, Direction::Up | Direction::Both) {
                if let Some(parent) = &node.parent {
                    queue.push_back((parent.clone(), depth + 1));
                }
            }
        }

        visited
    }

    /// The unique tree path between two nodes, if one exists.
    ///
    /// Returns `None` when the nodes are in different trees of the forest;
    /// a missing path is a negative result, not an error.
    pub fn path_between(&self, a: &NodeId, b: &NodeId) -> Option<Vec<NodeId>> {
        self.get(a)?;
        self.get(b)?;

        // Walk each node up to its root, then join at the lowest common
        // ancestor.
        let up_a = self.ancestry(a);
        let up_b = self.ancestry(b);

        let common = up_a.iter().find(|id| up_b.contains(id))?.clone();

        let mut path: Vec<NodeId> = up_a
            .iter()
            .take_while(|id| **id != common)
            .cloned()
            .collect();
        path.push(common.clone());

        let mut down: Vec<NodeId> = up_b
            .iter()
            .take_while(|id| **id != common)
            .cloned()
            .collect();
        down.reverse();
        path.extend(down);

        Some(path)
    }

    /// The node itself followed by every ancestor up to its root
    fn ancestry(&self, id: &NodeId) -> Vec<NodeId> {
        let mut chain = vec![id.clone()];
        let mut current = id.clone();
        while let Some(parent) = self.get(&current).and_then(|n| n.parent.clone()) {
            chain.push(parent.clone());
            current = parent;
        }
        chain
    }

    /// Summary counts over the loaded set
    pub fn stats(&self) -> NodeSetStats {
        let mut dimension_counts = HashMap::new();
        let mut cross_refs = 0;
        for node in self.nodes.values() {
            let dims = [
                (Dimension::What, !node.what.is_empty()),
                (Dimension::Which, !node.which.is_empty()),
                (Dimension::IfThen, !node.if_then.is_empty()),
                (Dimension::CanMust, !node.can_must.is_empty()),
                (Dimension::Given, !node.given.is_empty()),
                (Dimension::Why, !node.why.is_empty()),
            ];
            for (dim, populated) in dims {
                if populated {
                    *dimension_counts.entry(dim).or_insert(0) += 1;
                }
            }
            cross_refs += node.cross_refs.len();
        }

        NodeSetStats {
            total_nodes: self.nodes.len(),
            root_nodes: self.roots.len(),
            dimension_counts,
            cross_refs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexgraph_domain::{Proposition, SourceType};

    fn node(id: &str) -> KnowledgeNode {
        KnowledgeNode::new(id, format!("Rule {}", id), SourceType::Rule, "test")
            .with_what(Proposition::new("A holding"))
            .with_why(Proposition::new("A rationale").with_source("Rule text"))
    }

    /// root -> (left, right), left -> leaf
    fn small_forest() -> NodeSet {
        let root = node("root").with_child("left").with_child("right");
        let left = node("left").with_parent("root").with_child("leaf");
        let right = node("right").with_parent("root");
        let leaf = node("leaf").with_parent("left");
        // A second, disconnected tree
        let island = node("island");

        NodeSet::load(
            "test",
            vec![root, left, right, leaf, island],
            ValidationConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_load_identifies_roots() {
        let set = small_forest();
        assert_eq!(set.len(), 5);
        assert_eq!(set.roots(), &[NodeId::from("island"), NodeId::from("root")]);
    }

    #[test]
    fn test_load_rejects_invalid_set() {
        let orphan = node("orphan").with_parent("missing");
        let err = NodeSet::load("test", vec![orphan], ValidationConfig::default()).unwrap_err();
        assert_eq!(err.module_id, "test");
        assert!(!err.issues.is_empty());
    }

    #[test]
    fn test_load_rejects_edge_declared_from_one_end_only() {
        // Accepting this would count "c" as a root and hide the edge from
        // path_between.
        let parent = node("p").with_child("c");
        let child = node("c");
        let err = NodeSet::load("test", vec![parent, child], ValidationConfig::default())
            .unwrap_err();
        assert!(!err.issues.is_empty());
    }

    #[test]
    fn test_children_and_parent() {
        let set = small_forest();
        let children = set.children(&"root".into());
        assert_eq!(children.len(), 2);
        assert_eq!(
            set.parent(&"leaf".into()).unwrap().id,
            NodeId::from("left")
        );
        assert!(set.parent(&"root".into()).is_none());
    }

    #[test]
    fn test_traverse_down_is_depth_bounded() {
        let set = small_forest();
        let all = set.traverse(&"root".into(), Direction::Down, 10);
        assert_eq!(all.len(), 4);

        let shallow = set.traverse(&"root".into(), Direction::Down, 1);
        assert_eq!(shallow.len(), 3); // root + two children
    }

    #[test]
    fn test_traverse_up() {
        let set = small_forest();
        let up = set.traverse(&"leaf".into(), Direction::Up, 10);
        let ids: Vec<_> = up.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["leaf", "left", "root"]);
    }

    #[test]
    fn test_path_between_through_common_ancestor() {
        let set = small_forest();
        let path = set.path_between(&"leaf".into(), &"right".into()).unwrap();
        let ids: Vec<_> = path.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["leaf", "left", "root", "right"]);
    }

    #[test]
    fn test_path_between_disconnected_trees_is_negative_not_error() {
        let set = small_forest();
        assert!(set.path_between(&"leaf".into(), &"island".into()).is_none());
    }

    #[test]
    fn test_path_between_same_node() {
        let set = small_forest();
        let path = set.path_between(&"root".into(), &"root".into()).unwrap();
        assert_eq!(path, vec![NodeId::from("root")]);
    }

    #[test]
    fn test_stats() {
        let set = small_forest();
        let stats = set.stats();
        assert_eq!(stats.total_nodes, 5);
        assert_eq!(stats.root_nodes, 2);
        assert_eq!(stats.dimension_counts[&Dimension::What], 5);
        assert!(!stats.dimension_counts.contains_key(&Dimension::IfThen));
    }
}
