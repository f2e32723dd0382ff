//! Module-local search
//!
//! Candidate narrowing within one module's node set: lexical,
//! dimension-weighted scoring with the node's authority weight as the
//! tie-break. This is a pure function of the node set; the cross-module
//! keyword index lives behind its own boundary.

use crate::node_set::NodeSet;
use lexgraph_domain::{Dimension, KnowledgeNode, NodeId};
use serde::{Deserialize, Serialize};

/// Relative weight of a match per dimension. WHAT matches matter most;
/// full-text matches least.
const WHAT_WEIGHT: f64 = 2.0;
const IF_THEN_WEIGHT: f64 = 1.5;
const CAN_MUST_WEIGHT: f64 = 1.5;
const CITATION_WEIGHT: f64 = 1.0;
const WHICH_WEIGHT: f64 = 1.0;
const GIVEN_WEIGHT: f64 = 0.75;
const FULL_TEXT_WEIGHT: f64 = 0.5;

/// Optional narrowing filters for a module-local search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Only match within these dimensions
    pub dimensions: Option<Vec<Dimension>>,

    /// Only consider nodes whose citation starts with this prefix
    pub citation_prefix: Option<String>,
}

impl SearchFilters {
    fn allows(&self, dimension: Dimension) -> bool {
        match &self.dimensions {
            Some(dims) => dims.contains(&dimension),
            None => true,
        }
    }
}

/// A ranked match from a module-local search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Matched node
    pub node_id: NodeId,

    /// Citation of the matched node
    pub citation: String,

    /// Accumulated relevance score (un-normalized)
    pub relevance: f64,

    /// The first dimension that matched
    pub matched_dimension: Option<Dimension>,

    /// The text that produced the first match
    pub matched_text: String,
}

/// Lowercased alphanumeric tokens of a text, with stop words and short
/// tokens dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    const STOP_WORDS: &[&str] = &[
        "the", "and", "for", "with", "that", "this", "was", "are", "can",
        "what", "who", "how", "does", "did", "get", "have",
    ];

    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 2 && !STOP_WORDS.contains(t))
        .map(|t| t.to_string())
        .collect()
}

/// Count of query tokens appearing in the text
pub fn term_overlap(query_tokens: &[String], text: &str) -> usize {
    let lower = text.to_lowercase();
    query_tokens.iter().filter(|t| lower.contains(t.as_str())).count()
}

/// Score every node in the set against the query and return the `top_k`
/// matches ordered by relevance, with authority weight breaking ties.
pub fn search_nodes(
    nodes: &NodeSet,
    query: &str,
    filters: Option<&SearchFilters>,
    top_k: usize,
) -> Vec<SearchResult> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return Vec::new();
    }
    let default_filters = SearchFilters::default();
    let filters = filters.unwrap_or(&default_filters);

    let mut results: Vec<(SearchResult, f64)> = nodes
        .iter()
        .filter(|node| match &filters.citation_prefix {
            Some(prefix) => node.citation.starts_with(prefix.as_str()),
            None => true,
        })
        .filter_map(|node| score_node(node, &tokens, filters))
        .map(|result| {
            let authority = nodes
                .get(&result.node_id)
                .map(|n| n.authority_weight())
                .unwrap_or(0.0);
            (result, authority)
        })
        .collect();

    // Relevance first; equal relevance falls back to authority weight.
    results.sort_by(|(a, wa), (b, wb)| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(wb.partial_cmp(wa).unwrap_or(std::cmp::Ordering::Equal))
    });

    results
        .into_iter()
        .take(top_k)
        .map(|(result, _)| result)
        .collect()
}

fn score_node(
    node: &KnowledgeNode,
    tokens: &[String],
    filters: &SearchFilters,
) -> Option<SearchResult> {
    let mut relevance = 0.0;
    let mut matched_dimension = None;
    let mut matched_text = String::new();

    let mut record = |dim: Dimension, weight: f64, text: &str, hits: usize| {
        if hits == 0 {
            return;
        }
        relevance += weight * hits as f64;
        if matched_dimension.is_none() {
            matched_dimension = Some(dim);
            matched_text = text.to_string();
        }
    };

    if filters.allows(Dimension::What) {
        for prop in &node.what {
            record(Dimension::What, WHAT_WEIGHT, &prop.text, term_overlap(tokens, &prop.text));
        }
    }
    if filters.allows(Dimension::IfThen) {
        for cond in &node.if_then {
            let text = cond.to_string();
            record(Dimension::IfThen, IF_THEN_WEIGHT, &text, term_overlap(tokens, &text));
        }
    }
    if filters.allows(Dimension::CanMust) {
        for modality in &node.can_must {
            let text = modality.to_string();
            record(Dimension::CanMust, CAN_MUST_WEIGHT, &text, term_overlap(tokens, &text));
        }
    }
    if filters.allows(Dimension::Which) {
        for prop in &node.which {
            record(Dimension::Which, WHICH_WEIGHT, &prop.text, term_overlap(tokens, &prop.text));
        }
    }
    if filters.allows(Dimension::Given) {
        for prop in &node.given {
            record(Dimension::Given, GIVEN_WEIGHT, &prop.text, term_overlap(tokens, &prop.text));
        }
    }

    let citation_hits = term_overlap(tokens, &node.citation);
    if citation_hits > 0 {
        relevance += CITATION_WEIGHT * citation_hits as f64;
    }
    let full_text_hits = term_overlap(tokens, &node.full_text);
    if full_text_hits > 0 {
        relevance += FULL_TEXT_WEIGHT * full_text_hits as f64;
    }

    if relevance > 0.0 {
        Some(SearchResult {
            node_id: node.id.clone(),
            citation: node.citation.clone(),
            relevance,
            matched_dimension,
            matched_text,
        })
    } else {
        None
    }
}
