//! KnowledgeNode - the fundamental unit of the knowledge base

use crate::{Conditional, CrossRef, CrossRefKind, Modality, Proposition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a knowledge node.
///
/// Node ids are human-authored strings fixed at design time (e.g.,
/// `"order21_rule1"`), unique within a module and namespaced by the module
/// id across the whole knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id from an authored string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Source type of a node, fixing its authority weight.
///
/// The hierarchy runs from supreme law (weight 1.0) down to trial-level
/// precedent. The weight is not a free parameter: it is determined entirely
/// by the source type, and ranking uses it as a tie-break between nodes of
/// equal keyword relevance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    /// Constitutional provision (supreme law)
    Constitution,

    /// Primary legislation
    Statute,

    /// Subordinate legislation (rules of court, regulations)
    Rule,

    /// Binding appellate precedent
    AppellateCase,

    /// Persuasive first-instance precedent from a superior court
    HighCourtCase,

    /// Trial-level precedent with minimal weight
    TrialCase,
}

impl SourceType {
    /// Authority weight fixed by source type, in [0.0, 1.0]
    pub fn authority_weight(&self) -> f64 {
        match self {
            SourceType::Constitution => 1.0,
            SourceType::Statute => 1.0,
            SourceType::Rule => 0.8,
            SourceType::AppellateCase => 0.7,
            SourceType::HighCourtCase => 0.6,
            SourceType::TrialCase => 0.4,
        }
    }

    /// True for enacted law as opposed to precedent
    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            SourceType::Constitution | SourceType::Statute | SourceType::Rule
        )
    }

    /// Canonical label
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Constitution => "constitution",
            SourceType::Statute => "statute",
            SourceType::Rule => "rule",
            SourceType::AppellateCase => "appellate_case",
            SourceType::HighCourtCase => "high_court_case",
            SourceType::TrialCase => "trial_case",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A six-dimensional knowledge node.
///
/// One authored unit of rule-logic: identity and authority metadata, the six
/// content dimensions, tree structure within its module, non-owning
/// cross-references, and temporal validity. Nodes are immutable at run time;
/// the builder-style `with_*` methods exist for design-time authoring and
/// for tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeNode {
    /// Unique identifier
    pub id: NodeId,

    /// Human-readable citation (e.g., "Order 21 Rule 1(1)")
    pub citation: String,

    /// Source type, which fixes the authority weight
    pub source_type: SourceType,

    /// WHAT - core holdings, rules, or facts established
    pub what: Vec<Proposition>,

    /// WHICH - scope and applicability boundaries
    pub which: Vec<Proposition>,

    /// IF-THEN - conditional logic
    pub if_then: Vec<Conditional>,

    /// CAN/MUST - obligations and permissions
    pub can_must: Vec<Modality>,

    /// GIVEN - prerequisites and assumptions
    pub given: Vec<Proposition>,

    /// WHY - rationale, possibly with literal quotations
    pub why: Vec<Proposition>,

    /// Parent node id within the owning module (tree-shaped)
    pub parent: Option<NodeId>,

    /// Child node ids within the owning module
    pub children: Vec<NodeId>,

    /// Non-owning cross-references, possibly pointing outside the module
    pub cross_refs: Vec<CrossRef>,

    /// When this node came into force
    pub effective_from: Option<DateTime<Utc>>,

    /// Id of the node that supersedes this one, if any
    pub superseded_by: Option<NodeId>,

    /// Full source text, used by the keyword index
    pub full_text: String,

    /// Id of the module that owns this node
    pub module_id: String,
}

impl KnowledgeNode {
    /// Create an empty node with the given identity
    pub fn new(
        id: impl Into<NodeId>,
        citation: impl Into<String>,
        source_type: SourceType,
        module_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            citation: citation.into(),
            source_type,
            what: Vec::new(),
            which: Vec::new(),
            if_then: Vec::new(),
            can_must: Vec::new(),
            given: Vec::new(),
            why: Vec::new(),
            parent: None,
            children: Vec::new(),
            cross_refs: Vec::new(),
            effective_from: None,
            superseded_by: None,
            full_text: String::new(),
            module_id: module_id.into(),
        }
    }

    /// Authority weight, fixed by the node's source type
    pub fn authority_weight(&self) -> f64 {
        self.source_type.authority_weight()
    }

    /// Whether this node is currently valid law.
    ///
    /// A node that is not yet effective or that carries a `superseded_by`
    /// reference must not be treated as currently valid.
    pub fn is_currently_valid(&self, now: DateTime<Utc>) -> bool {
        if let Some(effective) = self.effective_from {
            if effective > now {
                return false;
            }
        }
        self.superseded_by.is_none()
    }

    /// Targets of the given cross-reference kind
    pub fn cross_refs_of(&self, kind: CrossRefKind) -> impl Iterator<Item = &NodeId> {
        self.cross_refs
            .iter()
            .filter(move |r| r.kind == kind)
            .map(|r| &r.target)
    }

    // Authoring conveniences. Each appends to one dimension.

    /// Add a WHAT holding
    pub fn with_what(mut self, prop: Proposition) -> Self {
        self.what.push(prop);
        self
    }

    /// Add a WHICH scope boundary
    pub fn with_which(mut self, prop: Proposition) -> Self {
        self.which.push(prop);
        self
    }

    /// Add an IF-THEN conditional
    pub fn with_if_then(mut self, cond: Conditional) -> Self {
        self.if_then.push(cond);
        self
    }

    /// Add a CAN/MUST modality
    pub fn with_can_must(mut self, modality: Modality) -> Self {
        self.can_must.push(modality);
        self
    }

    /// Add a GIVEN prerequisite
    pub fn with_given(mut self, prop: Proposition) -> Self {
        self.given.push(prop);
        self
    }

    /// Add a WHY rationale entry
    pub fn with_why(mut self, prop: Proposition) -> Self {
        self.why.push(prop);
        self
    }

    /// Set the parent node id
    pub fn with_parent(mut self, parent: impl Into<NodeId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add a child node id
    pub fn with_child(mut self, child: impl Into<NodeId>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Add a cross-reference
    pub fn with_cross_ref(mut self, kind: CrossRefKind, target: impl Into<NodeId>) -> Self {
        self.cross_refs.push(CrossRef::new(kind, target.into()));
        self
    }

    /// Set the full source text used for keyword indexing
    pub fn with_full_text(mut self, text: impl Into<String>) -> Self {
        self.full_text = text.into();
        self
    }

    /// Set the effective-from timestamp
    pub fn with_effective_from(mut self, when: DateTime<Utc>) -> Self {
        self.effective_from = Some(when);
        self
    }

    /// Mark this node as superseded by another
    pub fn with_superseded_by(mut self, by: impl Into<NodeId>) -> Self {
        self.superseded_by = Some(by.into());
        self
    }

    /// True if at least one of the six dimensions is populated
    pub fn has_any_dimension(&self) -> bool {
        !self.what.is_empty()
            || !self.which.is_empty()
            || !self.if_then.is_empty()
            || !self.can_must.is_empty()
            || !self.given.is_empty()
            || !self.why.is_empty()
    }
}

impl fmt::Display for KnowledgeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KnowledgeNode({}, weight {:.2})",
            self.citation,
            self.authority_weight()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_node() -> KnowledgeNode {
        KnowledgeNode::new("r1", "Order 21 Rule 1", SourceType::Rule, "order_21")
            .with_what(Proposition::new("Default judgment may be entered"))
            .with_why(Proposition::new("To prevent delay").with_source("Order 21"))
            .with_full_text("Default judgment may be entered against a defendant.")
    }

    #[test]
    fn test_authority_weight_fixed_by_source_type() {
        assert_eq!(SourceType::Constitution.authority_weight(), 1.0);
        assert_eq!(SourceType::Statute.authority_weight(), 1.0);
        assert_eq!(SourceType::Rule.authority_weight(), 0.8);
        assert_eq!(SourceType::AppellateCase.authority_weight(), 0.7);
        assert!(SourceType::HighCourtCase.authority_weight() <= 0.6);
        assert!(SourceType::TrialCase.authority_weight() <= 0.6);
    }

    #[test]
    fn test_superseded_node_is_not_valid() {
        let node = sample_node().with_superseded_by("r1_amended");
        assert!(!node.is_currently_valid(Utc::now()));
    }

    #[test]
    fn test_not_yet_effective_node_is_not_valid() {
        let future = Utc.with_ymd_and_hms(2999, 1, 1, 0, 0, 0).unwrap();
        let node = sample_node().with_effective_from(future);
        assert!(!node.is_currently_valid(Utc::now()));
    }

    #[test]
    fn test_effective_node_is_valid() {
        let past = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let node = sample_node().with_effective_from(past);
        assert!(node.is_currently_valid(Utc::now()));
    }

    #[test]
    fn test_cross_refs_of_filters_by_kind() {
        let node = sample_node()
            .with_cross_ref(CrossRefKind::Interprets, "case_a")
            .with_cross_ref(CrossRefKind::Extends, "rule_b")
            .with_cross_ref(CrossRefKind::Interprets, "case_c");

        let interpreters: Vec<_> = node.cross_refs_of(CrossRefKind::Interprets).collect();
        assert_eq!(interpreters.len(), 2);
        assert_eq!(interpreters[0].as_str(), "case_a");
    }

    #[test]
    fn test_serde_roundtrip() {
        let node = sample_node();
        let json = serde_json::to_string(&node).unwrap();
        let restored: KnowledgeNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, restored);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_source_type() -> impl Strategy<Value = SourceType> {
        prop_oneof![
            Just(SourceType::Constitution),
            Just(SourceType::Statute),
            Just(SourceType::Rule),
            Just(SourceType::AppellateCase),
            Just(SourceType::HighCourtCase),
            Just(SourceType::TrialCase),
        ]
    }

    proptest! {
        /// Property: every authority weight lies in [0, 1]
        #[test]
        fn test_authority_weight_bounds(st in any_source_type()) {
            let w = st.authority_weight();
            prop_assert!((0.0..=1.0).contains(&w));
        }

        /// Property: primary sources never rank below precedent
        #[test]
        fn test_primary_outranks_precedent(
            primary in any_source_type().prop_filter("primary", |s| s.is_primary()),
            precedent in any_source_type().prop_filter("precedent", |s| !s.is_primary()),
        ) {
            prop_assert!(primary.authority_weight() > precedent.authority_weight());
        }

        /// Property: node ids round-trip through their string form
        #[test]
        fn test_node_id_roundtrip(s in "[a-z0-9_]{1,40}") {
            let id = NodeId::new(s.clone());
            prop_assert_eq!(id.as_str(), s.as_str());
            prop_assert_eq!(NodeId::from(s.as_str()), id);
        }
    }
}
