//! Lexgraph Hybrid Search Engine
//!
//! The query front door: route a free-text question to candidate modules,
//! pull keyword hits from the index boundary, reason over the best-placed
//! module, and fuse the two signals into a single hybrid score.
//!
//! The engine is deliberately forgiving at run time. An unreachable
//! keyword index degrades to graph-only reasoning, an unroutable question
//! falls back to index-wide retrieval, and a question nothing answers
//! yields a zero-score response rather than an error. The only hard
//! failures are malformed input and broken configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;

pub use config::EngineConfig;
pub use error::{ConfigError, EngineError};

use lexgraph_domain::NodeId;
use lexgraph_index::{IndexError, KeywordHit, KeywordIndex};
use lexgraph_module::{Module, ReasoningResult};
use lexgraph_registry::{ModuleRegistry, QueryIntent};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything the engine can say about one query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The query as received
    pub query: String,

    /// Fused score in [0, 1]
    pub hybrid_score: f64,

    /// Normalized keyword component, before weighting
    pub keyword_component: f64,

    /// The reasoning outcome, including conclusion, chain and citations
    pub reasoning: ReasoningResult,

    /// Module that produced the answer, when one was selected
    pub module_id: Option<String>,

    /// Raw index hits, ordered by score then authority
    pub keyword_hits: Vec<KeywordHit>,

    /// The routing analysis this answer was built from
    pub intent: QueryIntent,
}

impl QueryResponse {
    fn no_answer(query: &str, intent: QueryIntent, keyword_hits: Vec<KeywordHit>) -> Self {
        Self {
            query: query.to_string(),
            hybrid_score: 0.0,
            keyword_component: 0.0,
            reasoning: ReasoningResult::not_found(query),
            module_id: None,
            keyword_hits,
            intent,
        }
    }
}

/// The hybrid retrieval-and-reasoning front door.
///
/// Holds the shared registry and the keyword index collaborator; cheap to
/// clone across tasks because both are behind `Arc`.
#[derive(Clone)]
pub struct HybridSearchEngine {
    registry: Arc<ModuleRegistry>,
    index: Arc<dyn KeywordIndex>,
    config: EngineConfig,
}

impl HybridSearchEngine {
    /// Create an engine over an already-populated registry
    pub fn new(
        registry: Arc<ModuleRegistry>,
        index: Arc<dyn KeywordIndex>,
        config: EngineConfig,
    ) -> Self {
        Self {
            registry,
            index,
            config,
        }
    }

    /// The registry this engine serves from
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Answer one question.
    ///
    /// Fails only on malformed input; every retrieval-side problem is
    /// degraded and reported through warnings on the response.
    pub async fn query(&self, query: &str) -> Result<QueryResponse, EngineError> {
        if query.trim().is_empty() {
            return Err(EngineError::InvalidQuery(
                "query must not be empty".to_string(),
            ));
        }

        let intent = self.registry.route(query);
        debug!(
            query,
            candidates = intent.candidate_modules.len(),
            confidence = intent.confidence,
            "routed query"
        );

        // Restrict retrieval to routed modules when routing found any;
        // otherwise search the whole index.
        let allow: Option<Vec<NodeId>> = if intent.candidate_modules.is_empty() {
            None
        } else {
            Some(self.registry.node_ids_of(&intent.candidate_modules))
        };

        let mut hits = match self
            .index
            .search(query, allow.as_deref(), self.config.keyword_top_k)
            .await
        {
            Ok(hits) => hits,
            Err(IndexError::Unavailable(reason)) => {
                warn!(%reason, "keyword index unavailable, degrading to reasoning only");
                Vec::new()
            }
            Err(IndexError::BadQuery(reason)) => {
                return Err(EngineError::InvalidQuery(reason));
            }
        };
        self.rank_hits(&mut hits);

        let Some(module) = self.select_module(&intent, &hits) else {
            info!(query, "no module could answer");
            return Ok(QueryResponse::no_answer(query, intent, hits));
        };

        let reasoning = module.reason(query)?;

        let keyword_component = hits
            .first()
            .map(|hit| (hit.score / self.config.keyword_scale).clamp(0.0, 1.0))
            .unwrap_or(0.0);
        let hybrid_score = self.config.keyword_weight * keyword_component
            + self.config.reasoning_weight * reasoning.confidence;

        info!(
            query,
            module_id = %module.metadata().id,
            hybrid_score,
            "query answered"
        );

        Ok(QueryResponse {
            query: query.to_string(),
            hybrid_score,
            keyword_component,
            reasoning,
            module_id: Some(module.metadata().id.clone()),
            keyword_hits: hits,
            intent,
        })
    }

    /// Order hits by score, breaking ties by source authority so that when
    /// a statute and a trial case score alike, the statute wins.
    fn rank_hits(&self, hits: &mut [KeywordHit]) {
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    let wa = self.authority_of(&a.node_id);
                    let wb = self.authority_of(&b.node_id);
                    wb.partial_cmp(&wa).unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.node_id.cmp(&b.node_id))
        });
    }

    fn authority_of(&self, node_id: &NodeId) -> f64 {
        self.registry
            .owner_of(node_id)
            .and_then(|module| module.nodes().get(node_id).map(|n| n.authority_weight()))
            .unwrap_or(0.0)
    }

    /// The module to reason over: the owner of the best keyword hit when
    /// retrieval produced one, otherwise the top routed candidate.
    fn select_module(
        &self,
        intent: &QueryIntent,
        hits: &[KeywordHit],
    ) -> Option<Arc<dyn Module>> {
        if let Some(top) = hits.first() {
            if let Some(owner) = self.registry.owner_of(&top.node_id) {
                return Some(owner);
            }
            warn!(node_id = %top.node_id, "keyword hit has no registered owner");
        }
        intent
            .candidate_modules
            .first()
            .and_then(|id| self.registry.module(id))
    }
}
