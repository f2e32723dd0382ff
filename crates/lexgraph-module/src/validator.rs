//! Design-time node validation
//!
//! Validation runs exactly once, when a module's node set is loaded. A node
//! that fails any check never enters the loaded set; the module refuses to
//! load rather than silently dropping it. Run-time reasoning never
//! re-validates.

use lexgraph_domain::{Dimension, KnowledgeNode, NodeId, SourceType};
use std::collections::HashMap;
use std::fmt;

/// Configuration for the validation rules
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Require WHY rationale on primary sources (constitution/statute/rule)
    pub require_rationale_on_primary: bool,

    /// Require every WHY entry to carry a source line (quotation traceability)
    pub require_traced_quotations: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_rationale_on_primary: true,
            require_traced_quotations: true,
        }
    }
}

impl ValidationConfig {
    /// A permissive configuration for prototyping: structural checks only
    pub fn permissive() -> Self {
        Self {
            require_rationale_on_primary: false,
            require_traced_quotations: false,
        }
    }

    /// Dimensions a node of the given source type must populate
    pub fn required_dimensions(&self, source_type: SourceType) -> Vec<Dimension> {
        let mut required = vec![Dimension::What];
        if self.require_rationale_on_primary && source_type.is_primary() {
            required.push(Dimension::Why);
        }
        required
    }
}

/// A single validation failure, with enough detail to fix the authored data
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    /// Node id is empty
    MissingId,

    /// Citation string is empty
    MissingCitation {
        /// Offending node
        node: NodeId,
    },

    /// A dimension required by the node's source type is empty
    MissingDimension {
        /// Offending node
        node: NodeId,
        /// The empty dimension
        dimension: Dimension,
        /// The source type that requires it
        source_type: SourceType,
    },

    /// No dimension is populated at all
    EmptyNode {
        /// Offending node
        node: NodeId,
    },

    /// A WHY entry has no source line, so its quotation cannot be traced
    UntracedQuotation {
        /// Offending node
        node: NodeId,
        /// The untraceable rationale text
        text: String,
    },

    /// Parent id does not exist in the set
    UnknownParent {
        /// Offending node
        node: NodeId,
        /// The dangling parent id
        parent: NodeId,
    },

    /// Child id does not exist in the set
    UnknownChild {
        /// Offending node
        node: NodeId,
        /// The dangling child id
        child: NodeId,
    },

    /// A node is listed as a child of more than one parent
    MultipleParents {
        /// The contested child
        child: NodeId,
        /// Two of its claimed parents
        parents: (NodeId, NodeId),
    },

    /// Following parent links from this node revisits it (cycle)
    ParentCycle {
        /// A node on the cycle
        node: NodeId,
    },

    /// A node's parent pointer disagrees with the parent's child list
    InconsistentParentLink {
        /// The child whose pointer disagrees
        child: NodeId,
        /// The parent it points at
        parent: NodeId,
    },

    /// A node lists a child that does not point back at it
    InconsistentChildLink {
        /// The parent whose child list disagrees
        parent: NodeId,
        /// The listed child
        child: NodeId,
    },

    /// Node's module_id disagrees with the owning module
    ModuleMismatch {
        /// Offending node
        node: NodeId,
        /// The module id found on the node
        found: String,
        /// The expected owning module id
        expected: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingId => write!(f, "node has an empty id"),
            ValidationIssue::MissingCitation { node } => {
                write!(f, "node {} has an empty citation", node)
            }
            ValidationIssue::MissingDimension {
                node,
                dimension,
                source_type,
            } => write!(
                f,
                "node {} is missing the {} dimension required for source type {}",
                node, dimension, source_type
            ),
            ValidationIssue::EmptyNode { node } => {
                write!(f, "node {} has no populated dimension", node)
            }
            ValidationIssue::UntracedQuotation { node, text } => write!(
                f,
                "node {} has a WHY entry without a source line: \"{}\"",
                node, text
            ),
            ValidationIssue::UnknownParent { node, parent } => {
                write!(f, "node {} references unknown parent {}", node, parent)
            }
            ValidationIssue::UnknownChild { node, child } => {
                write!(f, "node {} references unknown child {}", node, child)
            }
            ValidationIssue::MultipleParents { child, parents } => write!(
                f,
                "node {} is claimed as a child by both {} and {}",
                child, parents.0, parents.1
            ),
            ValidationIssue::ParentCycle { node } => {
                write!(f, "parent links from node {} form a cycle", node)
            }
            ValidationIssue::InconsistentParentLink { child, parent } => write!(
                f,
                "node {} points at parent {} which does not list it as a child",
                child, parent
            ),
            ValidationIssue::InconsistentChildLink { parent, child } => write!(
                f,
                "node {} lists child {} which does not point back at it",
                parent, child
            ),
            ValidationIssue::ModuleMismatch {
                node,
                found,
                expected,
            } => write!(
                f,
                "node {} belongs to module \"{}\" but was loaded into \"{}\"",
                node, found, expected
            ),
        }
    }
}

/// Outcome of validating one node or a whole set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// All checks passed
    Passed,

    /// At least one check failed
    Failed,
}

/// Result of a validation pass
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Overall outcome
    pub status: ValidationStatus,

    /// Every failure found (empty when status is Passed)
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let status = if issues.is_empty() {
            ValidationStatus::Passed
        } else {
            ValidationStatus::Failed
        };
        Self { status, issues }
    }

    /// True when every check passed
    pub fn passed(&self) -> bool {
        self.status == ValidationStatus::Passed
    }
}

/// Validates nodes against the configured rules and structural invariants
pub struct NodeValidator {
    config: ValidationConfig,
}

impl NodeValidator {
    /// Create a validator with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Check one node in isolation: identity, required dimensions,
    /// quotation traceability.
    pub fn validate_node(&self, node: &KnowledgeNode) -> ValidationReport {
        let mut issues = Vec::new();

        if node.id.as_str().is_empty() {
            issues.push(ValidationIssue::MissingId);
        }
        if node.citation.is_empty() {
            issues.push(ValidationIssue::MissingCitation {
                node: node.id.clone(),
            });
        }

        if !node.has_any_dimension() {
            issues.push(ValidationIssue::EmptyNode {
                node: node.id.clone(),
            });
        } else {
            for dimension in self.config.required_dimensions(node.source_type) {
                let populated = match dimension {
                    Dimension::What => !node.what.is_empty(),
                    Dimension::Which => !node.which.is_empty(),
                    Dimension::IfThen => !node.if_then.is_empty(),
                    Dimension::CanMust => !node.can_must.is_empty(),
                    Dimension::Given => !node.given.is_empty(),
                    Dimension::Why => !node.why.is_empty(),
                };
                if !populated {
                    issues.push(ValidationIssue::MissingDimension {
                        node: node.id.clone(),
                        dimension,
                        source_type: node.source_type,
                    });
                }
            }
        }

        if self.config.require_traced_quotations {
            for prop in &node.why {
                if prop.source_line.is_none() {
                    issues.push(ValidationIssue::UntracedQuotation {
                        node: node.id.clone(),
                        text: prop.text.clone(),
                    });
                }
            }
        }

        ValidationReport::from_issues(issues)
    }

    /// Check the structural invariants of a whole node set: referential
    /// integrity of parent/child links, single-parent, acyclicity, and
    /// module ownership.
    pub fn validate_set(
        &self,
        module_id: &str,
        nodes: &HashMap<NodeId, KnowledgeNode>,
    ) -> ValidationReport {
        let mut issues = Vec::new();

        // Referential integrity and ownership
        for node in nodes.values() {
            if node.module_id != module_id {
                issues.push(ValidationIssue::ModuleMismatch {
                    node: node.id.clone(),
                    found: node.module_id.clone(),
                    expected: module_id.to_string(),
                });
            }
            if let Some(parent) = &node.parent {
                match nodes.get(parent) {
                    None => issues.push(ValidationIssue::UnknownParent {
                        node: node.id.clone(),
                        parent: parent.clone(),
                    }),
                    Some(p) if !p.children.contains(&node.id) => {
                        issues.push(ValidationIssue::InconsistentParentLink {
                            child: node.id.clone(),
                            parent: parent.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }
            for child in &node.children {
                match nodes.get(child) {
                    None => issues.push(ValidationIssue::UnknownChild {
                        node: node.id.clone(),
                        child: child.clone(),
                    }),
                    // The edge must be declared from both ends, or the
                    // child is silently treated as a root.
                    Some(c) if c.parent.as_ref() != Some(&node.id) => {
                        issues.push(ValidationIssue::InconsistentChildLink {
                            parent: node.id.clone(),
                            child: child.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        // Each node is a child of at most one parent
        let mut claimed_by: HashMap<&NodeId, &NodeId> = HashMap::new();
        for node in nodes.values() {
            for child in &node.children {
                if let Some(first) = claimed_by.insert(child, &node.id) {
                    issues.push(ValidationIssue::MultipleParents {
                        child: child.clone(),
                        parents: (first.clone(), node.id.clone()),
                    });
                }
            }
        }

        // Following parent links terminates
        for start in nodes.keys() {
            let mut seen = vec![start];
            let mut current = start;
            while let Some(parent) = nodes.get(current).and_then(|n| n.parent.as_ref()) {
                if seen.contains(&parent) {
                    issues.push(ValidationIssue::ParentCycle {
                        node: start.clone(),
                    });
                    break;
                }
                seen.push(parent);
                if !nodes.contains_key(parent) {
                    break; // already reported as UnknownParent
                }
                current = parent;
            }
        }

        ValidationReport::from_issues(issues)
    }
}

impl Default for NodeValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexgraph_domain::Proposition;

    fn rule_node(id: &str) -> KnowledgeNode {
        KnowledgeNode::new(id, format!("Rule {}", id), SourceType::Rule, "test")
            .with_what(Proposition::new("A holding"))
            .with_why(Proposition::new("A rationale").with_source("Rule text"))
    }

    #[test]
    fn test_valid_node_passes() {
        let validator = NodeValidator::default();
        assert!(validator.validate_node(&rule_node("r1")).passed());
    }

    #[test]
    fn test_missing_why_on_primary_source_fails() {
        let node = KnowledgeNode::new("r1", "Rule 1", SourceType::Rule, "test")
            .with_what(Proposition::new("A holding"));
        let report = NodeValidator::default().validate_node(&node);
        assert!(!report.passed());
        assert!(report.issues.iter().any(|i| matches!(
            i,
            ValidationIssue::MissingDimension {
                dimension: Dimension::Why,
                ..
            }
        )));
    }

    #[test]
    fn test_missing_why_allowed_on_precedent() {
        let node = KnowledgeNode::new("c1", "Case v Case", SourceType::AppellateCase, "test")
            .with_what(Proposition::new("A holding"));
        assert!(NodeValidator::default().validate_node(&node).passed());
    }

    #[test]
    fn test_untraced_quotation_fails() {
        let node = rule_node("r1").with_why(Proposition::new("Unattributed quote"));
        let report = NodeValidator::default().validate_node(&node);
        assert!(report
            .issues
            .iter()
            .any(|i| matches!(i, ValidationIssue::UntracedQuotation { .. })));
    }

    #[test]
    fn test_permissive_config_skips_rationale_check() {
        let node = KnowledgeNode::new("r1", "Rule 1", SourceType::Rule, "test")
            .with_what(Proposition::new("A holding"));
        let validator = NodeValidator::new(ValidationConfig::permissive());
        assert!(validator.validate_node(&node).passed());
    }

    #[test]
    fn test_dangling_parent_fails_set_validation() {
        let mut nodes = HashMap::new();
        let orphan = rule_node("r1").with_parent("missing");
        nodes.insert(orphan.id.clone(), orphan);

        let report = NodeValidator::default().validate_set("test", &nodes);
        assert!(report
            .issues
            .iter()
            .any(|i| matches!(i, ValidationIssue::UnknownParent { .. })));
    }

    #[test]
    fn test_parent_cycle_detected() {
        let mut nodes = HashMap::new();
        let a = rule_node("a").with_parent("b").with_child("b");
        let b = rule_node("b").with_parent("a").with_child("a");
        nodes.insert(a.id.clone(), a);
        nodes.insert(b.id.clone(), b);

        let report = NodeValidator::default().validate_set("test", &nodes);
        assert!(report
            .issues
            .iter()
            .any(|i| matches!(i, ValidationIssue::ParentCycle { .. })));
    }

    #[test]
    fn test_child_without_back_pointer_detected() {
        let mut nodes = HashMap::new();
        let parent = rule_node("p").with_child("c");
        let child = rule_node("c");
        nodes.insert(parent.id.clone(), parent);
        nodes.insert(child.id.clone(), child);

        let report = NodeValidator::default().validate_set("test", &nodes);
        assert!(report
            .issues
            .iter()
            .any(|i| matches!(i, ValidationIssue::InconsistentChildLink { .. })));
    }

    #[test]
    fn test_child_claimed_twice_detected() {
        let mut nodes = HashMap::new();
        let a = rule_node("a").with_child("c");
        let b = rule_node("b").with_child("c");
        let c = rule_node("c").with_parent("a");
        nodes.insert(a.id.clone(), a);
        nodes.insert(b.id.clone(), b);
        nodes.insert(c.id.clone(), c);

        let report = NodeValidator::default().validate_set("test", &nodes);
        assert!(report
            .issues
            .iter()
            .any(|i| matches!(i, ValidationIssue::MultipleParents { .. })));
    }
}
