//! In-process term-frequency keyword index
//!
//! A small tf-idf ranking over node full text and citations. It stands in
//! at the same boundary a hosted search engine would occupy, so the rest of
//! the system can be exercised hermetically. Scores are un-normalized, as
//! the boundary contract requires; the engine applies its own scale.

use crate::{IndexError, KeywordHit, KeywordIndex};
use async_trait::async_trait;
use lexgraph_domain::{KnowledgeNode, NodeId};
use lexgraph_module::Module;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Indexed document: the token counts of one node's searchable text
struct IndexedDoc {
    term_counts: HashMap<String, usize>,
    token_total: usize,
}

/// In-memory keyword index over node full text and citations.
///
/// Build once at startup from the loaded modules; immutable afterwards, so
/// concurrent searches need no locking.
pub struct MemoryIndex {
    docs: HashMap<NodeId, IndexedDoc>,

    /// term -> number of documents containing it
    doc_frequency: HashMap<String, usize>,
}

impl MemoryIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            docs: HashMap::new(),
            doc_frequency: HashMap::new(),
        }
    }

    /// Index every node of a module
    pub fn index_module(&mut self, module: &dyn Module) {
        for node in module.nodes().iter() {
            self.index_node(node);
        }
        debug!(module_id = %module.metadata().id, "indexed module");
    }

    /// Index one node's full text and citation
    pub fn index_node(&mut self, node: &KnowledgeNode) {
        let text = format!("{} {}", node.citation, node.full_text);
        let tokens = tokenize(&text);

        let mut term_counts: HashMap<String, usize> = HashMap::new();
        for token in &tokens {
            *term_counts.entry(token.clone()).or_insert(0) += 1;
        }
        for term in term_counts.keys() {
            *self.doc_frequency.entry(term.clone()).or_insert(0) += 1;
        }

        self.docs.insert(
            node.id.clone(),
            IndexedDoc {
                term_counts,
                token_total: tokens.len().max(1),
            },
        );
    }

    /// Number of indexed nodes
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// True when nothing is indexed
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn score(&self, doc: &IndexedDoc, query_tokens: &[String]) -> f64 {
        let total_docs = self.docs.len().max(1) as f64;
        let mut score = 0.0;
        for token in query_tokens {
            let count = doc.term_counts.get(token).copied().unwrap_or(0);
            if count == 0 {
                continue;
            }
            let tf = count as f64 / doc.token_total as f64;
            let df = self.doc_frequency.get(token).copied().unwrap_or(1) as f64;
            let idf = (1.0 + total_docs / df).ln();
            // Scaled so single-term matches land in the same range a BM25
            // backend would report
            score += 10.0 * tf * idf;
        }
        score
    }
}

impl Default for MemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeywordIndex for MemoryIndex {
    async fn search(
        &self,
        query: &str,
        allow: Option<&[NodeId]>,
        top_k: usize,
    ) -> Result<Vec<KeywordHit>, IndexError> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Ok(Vec::new());
        }

        let allow_set: Option<HashSet<&NodeId>> = allow.map(|ids| ids.iter().collect());

        let mut hits: Vec<KeywordHit> = self
            .docs
            .iter()
            .filter(|(id, _)| match &allow_set {
                Some(set) => set.contains(id),
                None => true,
            })
            .filter_map(|(id, doc)| {
                let score = self.score(doc, &query_tokens);
                (score > 0.0).then(|| KeywordHit {
                    node_id: id.clone(),
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.node_id.cmp(&b.node_id))
        });
        hits.truncate(top_k);
        Ok(hits)
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 2)
        .map(|t| t.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexgraph_domain::SourceType;

    fn node(id: &str, citation: &str, text: &str) -> KnowledgeNode {
        KnowledgeNode::new(id, citation, SourceType::Rule, "test").with_full_text(text)
    }

    fn test_index() -> MemoryIndex {
        let mut index = MemoryIndex::new();
        index.index_node(&node(
            "dj",
            "Order 21 Rule 1",
            "Where a defendant fails to file a defence the plaintiff may apply for judgment in default.",
        ));
        index.index_node(&node(
            "med",
            "Order 5 Rule 1",
            "The court may direct parties to attempt mediation before trial.",
        ));
        index
    }

    #[tokio::test]
    async fn test_search_ranks_best_match_first() {
        let index = test_index();
        let hits = index.search("default judgment defence", None, 10).await.unwrap();
        assert!(!hits.is_empty());
        assert_eq!(hits[0].node_id.as_str(), "dj");
        assert!(hits[0].score > 0.0);
    }

    #[tokio::test]
    async fn test_search_honors_allow_list() {
        let index = test_index();
        let allow = vec![NodeId::from("med")];
        let hits = index
            .search("court mediation default judgment", Some(&allow), 10)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node_id.as_str(), "med");
    }

    #[tokio::test]
    async fn test_search_no_match_is_empty() {
        let index = test_index();
        let hits = index.search("admiralty salvage", None, 10).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_is_empty_result() {
        let index = test_index();
        let hits = index.search("   ", None, 10).await.unwrap();
        assert!(hits.is_empty());
    }
}
