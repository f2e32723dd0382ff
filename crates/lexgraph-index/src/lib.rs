//! Lexgraph Keyword Index Boundary
//!
//! Full-text ranking is an external collaborator: the engine hands it a
//! query plus an optional allow-list of node ids and receives an ordered
//! list of (node id, un-normalized score) pairs. The trait is async because
//! this is the one call on the query path expected to involve I/O latency.
//!
//! Unavailability is a degraded state, not a query failure: the engine maps
//! [`IndexError::Unavailable`] to zero results and proceeds with
//! graph-only reasoning.
//!
//! # Implementations
//!
//! - [`MemoryIndex`]: in-process term-frequency ranking over node full text
//! - [`StaticIndex`]: scripted hits for deterministic tests
//! - [`FailingIndex`]: always unavailable, for degradation tests

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod mock;

pub use memory::MemoryIndex;
pub use mock::{FailingIndex, StaticIndex};

use async_trait::async_trait;
use lexgraph_domain::NodeId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the keyword index collaborator
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index is temporarily unreachable. Callers degrade to zero
    /// results; this never fails a query.
    #[error("keyword index unavailable: {0}")]
    Unavailable(String),

    /// The query could not be executed as given
    #[error("bad query: {0}")]
    BadQuery(String),
}

/// One ranked hit from the keyword index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordHit {
    /// Matched node
    pub node_id: NodeId,

    /// Un-normalized relevance score (scale depends on the backend)
    pub score: f64,
}

/// The keyword ranking collaborator.
///
/// `allow` restricts results to the given node ids; `None` searches
/// everything indexed. Zero results is a normal outcome.
#[async_trait]
pub trait KeywordIndex: Send + Sync {
    /// Rank indexed nodes against a free-text query
    async fn search(
        &self,
        query: &str,
        allow: Option<&[NodeId]>,
        top_k: usize,
    ) -> Result<Vec<KeywordHit>, IndexError>;
}
