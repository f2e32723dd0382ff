//! Lexgraph Module Layer
//!
//! A module is the unit of ownership in the knowledge base: a self-contained
//! subgraph of knowledge nodes plus the operations to search and reason over
//! it. Modules are loaded and validated once at startup, then served
//! read-only.
//!
//! # Architecture
//!
//! - [`NodeSet`]: the validated, immutable node store with the provided
//!   traversal helpers (children, parent, BFS traverse, tree path)
//! - [`NodeValidator`]: the design-time gate; failing nodes never load
//! - [`Module`]: the trait every reasoning unit satisfies; `search` and
//!   `reason` have default implementations backed by the shared machinery
//! - [`StaticModule`]: the concrete module built from already-authored
//!   nodes at the content-ingestion boundary
//!
//! # Examples
//!
//! ```
//! use lexgraph_domain::{KnowledgeNode, Proposition, SourceType};
//! use lexgraph_module::{Module, ModuleMetadata, StaticModule, ValidationConfig};
//!
//! let node = KnowledgeNode::new("r1", "Order 21 Rule 1", SourceType::Rule, "order_21")
//!     .with_what(Proposition::new("Default judgment may be entered"))
//!     .with_why(Proposition::new("To prevent delay").with_source("Order 21"))
//!     .with_full_text("Default judgment may be entered against a defendant.");
//!
//! let metadata = ModuleMetadata::new(
//!     "order_21",
//!     "Order 21 - Default Judgment",
//!     0.8,
//!     chrono::Utc::now(),
//! );
//!
//! let module = StaticModule::load(metadata, vec![node], ValidationConfig::default()).unwrap();
//! let result = module.reason("Can I get default judgment?").unwrap();
//! assert!(result.confidence > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod metadata;
pub mod node_set;
pub mod reason;
pub mod search;
pub mod validator;

pub use error::{ModuleError, ValidationError};
pub use metadata::ModuleMetadata;
pub use node_set::{Direction, NodeSet, NodeSetStats};
pub use reason::{ReasonConfig, ReasoningResult, ReasoningStep};
pub use search::{SearchFilters, SearchResult};
pub use validator::{NodeValidator, ValidationConfig, ValidationIssue, ValidationReport, ValidationStatus};

use tracing::info;

/// A self-contained reasoning unit owning a subgraph of knowledge nodes.
///
/// The contract:
/// - `metadata` must not change after registration
/// - `nodes` is the complete validated set, immutable after load
/// - `search` is a pure function of the node set
/// - `reason` never fails for "no answer" - it returns confidence 0 with an
///   empty chain; it errors only on malformed input
///
/// `search` and `reason` have default implementations backed by the shared
/// scoring and chain-building machinery; override them only for modules
/// with genuinely different retrieval behavior.
pub trait Module: Send + Sync {
    /// Static description used for indexing and routing
    fn metadata(&self) -> &ModuleMetadata;

    /// The complete, validated node set
    fn nodes(&self) -> &NodeSet;

    /// Configuration for the reasoning confidence formula
    fn reason_config(&self) -> &ReasonConfig;

    /// Module-local candidate narrowing
    fn search(
        &self,
        query: &str,
        filters: Option<&SearchFilters>,
        top_k: usize,
    ) -> Vec<SearchResult> {
        search::search_nodes(self.nodes(), query, filters, top_k)
    }

    /// Answer a question using this module's logic
    fn reason(&self, question: &str) -> Result<ReasoningResult, ModuleError> {
        reason::reason_over(self.nodes(), question, self.reason_config())
    }
}

/// A module populated once from already-authored nodes.
///
/// This is the content-ingestion boundary: the engine consumes constructed
/// [`KnowledgeNode`](lexgraph_domain::KnowledgeNode) instances, validates
/// them, and never mutates them again.
pub struct StaticModule {
    metadata: ModuleMetadata,
    nodes: NodeSet,
    reason_config: ReasonConfig,
}

impl StaticModule {
    /// Load a module, running the full validation gate.
    ///
    /// A failing node aborts the load with a configuration error; the
    /// module never serves a partially-valid set.
    pub fn load(
        metadata: ModuleMetadata,
        nodes: Vec<lexgraph_domain::KnowledgeNode>,
        config: ValidationConfig,
    ) -> Result<Self, ValidationError> {
        let nodes = NodeSet::load(&metadata.id, nodes, config)?;
        info!(module_id = %metadata.id, nodes = nodes.len(), "module loaded");
        Ok(Self {
            metadata,
            nodes,
            reason_config: ReasonConfig::default(),
        })
    }

    /// Replace the default reasoning configuration
    pub fn with_reason_config(mut self, config: ReasonConfig) -> Self {
        self.reason_config = config;
        self
    }
}

impl Module for StaticModule {
    fn metadata(&self) -> &ModuleMetadata {
        &self.metadata
    }

    fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    fn reason_config(&self) -> &ReasonConfig {
        &self.reason_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lexgraph_domain::{KnowledgeNode, Proposition, SourceType};

    fn test_module() -> StaticModule {
        let node = KnowledgeNode::new("r1", "Order 21 Rule 1", SourceType::Rule, "order_21")
            .with_what(Proposition::new("Default judgment may be entered"))
            .with_why(Proposition::new("To prevent delay").with_source("Order 21"))
            .with_full_text("Default judgment may be entered against a defendant.");
        let metadata =
            ModuleMetadata::new("order_21", "Order 21 - Default Judgment", 0.8, Utc::now())
                .with_topic("default_judgment")
                .with_keyword("default")
                .with_keyword("judgment");
        StaticModule::load(metadata, vec![node], ValidationConfig::default()).unwrap()
    }

    #[test]
    fn test_static_module_roundtrip() {
        let module = test_module();
        assert_eq!(module.metadata().id, "order_21");
        assert_eq!(module.nodes().len(), 1);
    }

    #[test]
    fn test_default_search_and_reason() {
        let module = test_module();
        let hits = module.search("default judgment", None, 5);
        assert_eq!(hits.len(), 1);

        let result = module.reason("What is default judgment?").unwrap();
        assert!(result.confidence > 0.0);
        assert_eq!(result.citations, vec!["Order 21 Rule 1".to_string()]);
    }

    #[test]
    fn test_load_rejects_invalid_node() {
        // WHY required on a rule but missing
        let node = KnowledgeNode::new("r1", "Order 21 Rule 1", SourceType::Rule, "order_21")
            .with_what(Proposition::new("Default judgment may be entered"));
        let metadata = ModuleMetadata::new("order_21", "Order 21", 0.8, Utc::now());
        let err = StaticModule::load(metadata, vec![node], ValidationConfig::default());
        assert!(err.is_err());
    }
}
