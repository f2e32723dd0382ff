//! The reasoning engine
//!
//! Given a free-text question, locate the best-matching node through
//! module-local search, then walk its dimensions in a fixed order to build
//! an explainable chain: GIVEN prerequisites, satisfied IF-THEN
//! conditionals, WHAT holdings, applicable CAN/MUST modalities. Antecedent
//! satisfaction is a textual match against the question; there is no formal
//! unification.

use crate::error::ModuleError;
use crate::node_set::NodeSet;
use crate::search::{search_nodes, term_overlap, tokenize};
use lexgraph_domain::{Dimension, KnowledgeNode, NodeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunables for the reasoning confidence formula.
///
/// Confidence is authority_weight × match_quality, where match_quality is
/// the top search relevance divided by `relevance_scale`, clipped to 1.
/// The scaling curve is deliberately configuration, not a constant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonConfig {
    /// Search relevance below which a node is treated as "not found"
    pub min_relevance: f64,

    /// Relevance at which match quality saturates at 1.0
    pub relevance_scale: f64,

    /// How many search candidates to consider
    pub top_k: usize,
}

impl Default for ReasonConfig {
    fn default() -> Self {
        Self {
            min_relevance: 1.0,
            relevance_scale: 6.0,
            top_k: 5,
        }
    }
}

/// One dimension-tagged step of a reasoning chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningStep {
    /// Node the step originates from
    pub node_id: NodeId,

    /// Citation of that node
    pub citation: String,

    /// The dimension this step was drawn from
    pub dimension: Dimension,

    /// Rendered step text
    pub text: String,

    /// Authority weight of the originating node
    pub authority_weight: f64,
}

/// Result of reasoning over one question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningResult {
    /// Single-sentence conclusion
    pub conclusion: String,

    /// Confidence in [0, 1]; exactly 0 when no node matched
    pub confidence: f64,

    /// Ordered, dimension-tagged reasoning steps
    pub chain: Vec<ReasoningStep>,

    /// Citations of every node the chain draws on
    pub citations: Vec<String>,

    /// Non-fatal caveats (e.g., nothing found, node superseded)
    pub warnings: Vec<String>,
}

impl ReasoningResult {
    /// The zero-confidence "nothing found" result. Not an error.
    pub fn not_found(question: &str) -> Self {
        Self {
            conclusion: format!(
                "No relevant provision was found for: \"{}\"",
                question.trim()
            ),
            confidence: 0.0,
            chain: Vec::new(),
            citations: Vec::new(),
            warnings: vec!["no node matched above the relevance threshold".to_string()],
        }
    }
}

/// Reason over a module's node set.
///
/// Fails fast only on malformed input; "no answer" is a zero-confidence
/// result, never an error.
pub fn reason_over(
    nodes: &NodeSet,
    question: &str,
    config: &ReasonConfig,
) -> Result<ReasoningResult, ModuleError> {
    if question.trim().is_empty() {
        return Err(ModuleError::EmptyQuestion);
    }

    let candidates = search_nodes(nodes, question, None, config.top_k);
    let Some(best) = candidates.first().filter(|c| c.relevance >= config.min_relevance) else {
        debug!(question, "no candidate above relevance threshold");
        return Ok(ReasoningResult::not_found(question));
    };

    // The validator guarantees every search hit resolves.
    let node = nodes
        .get(&best.node_id)
        .ok_or_else(|| ModuleError::NodeNotFound(best.node_id.to_string()))?;

    let question_tokens = tokenize(question);
    let chain = build_chain(node, &question_tokens);
    let conclusion = synthesize_conclusion(question, node, &chain);

    let match_quality = (best.relevance / config.relevance_scale).clamp(0.0, 1.0);
    let confidence = node.authority_weight() * match_quality;

    let mut warnings = Vec::new();
    if node.superseded_by.is_some() {
        warnings.push(format!(
            "{} has been superseded and may no longer be current",
            node.citation
        ));
    }

    Ok(ReasoningResult {
        conclusion,
        confidence,
        citations: vec![node.citation.clone()],
        chain,
        warnings,
    })
}

/// Fixed chain order: GIVEN, then satisfied IF-THEN, then WHAT, then
/// applicable CAN/MUST.
fn build_chain(node: &KnowledgeNode, question_tokens: &[String]) -> Vec<ReasoningStep> {
    let mut chain = Vec::new();
    let step = |dimension: Dimension, text: String| ReasoningStep {
        node_id: node.id.clone(),
        citation: node.citation.clone(),
        dimension,
        text,
        authority_weight: node.authority_weight(),
    };

    for given in &node.given {
        chain.push(step(Dimension::Given, given.text.clone()));
    }

    for cond in &node.if_then {
        if term_overlap(question_tokens, &cond.condition) > 0 || node.if_then.len() == 1 {
            chain.push(step(Dimension::IfThen, cond.to_string()));
        }
    }

    for what in &node.what {
        chain.push(step(Dimension::What, what.text.clone()));
    }

    for modality in &node.can_must {
        let applicable = modality.conditions.is_empty()
            || modality
                .conditions
                .iter()
                .any(|c| term_overlap(question_tokens, c) > 0)
            || term_overlap(question_tokens, &modality.action) > 0;
        if applicable {
            chain.push(step(Dimension::CanMust, modality.to_string()));
        }
    }

    chain
}

/// A single sentence drawn from the chain, keyed to what the question asks
fn synthesize_conclusion(
    question: &str,
    node: &KnowledgeNode,
    chain: &[ReasoningStep],
) -> String {
    let q = question.to_lowercase();
    let first_of = |dim: Dimension| chain.iter().find(|s| s.dimension == dim);

    // Permission/obligation questions answer with the modality.
    if q.contains("can ") || q.contains("may ") || q.contains("must ") || q.contains("shall ") {
        if let Some(step) = first_of(Dimension::CanMust) {
            return format!("{} ({})", step.text, node.citation);
        }
    }

    // Consequence questions answer with the conditional.
    if q.contains("if ") || q.contains("when ") || q.contains("happens") {
        if let Some(step) = first_of(Dimension::IfThen) {
            return format!("{} ({})", step.text, node.citation);
        }
    }

    // Rationale questions answer with WHY.
    if q.contains("why ") {
        if let Some(why) = node.why.first() {
            return format!("{} ({})", why.text, node.citation);
        }
    }

    // Default: the holding.
    if let Some(step) = first_of(Dimension::What) {
        return format!("{} ({})", step.text, node.citation);
    }

    format!("See {}", node.citation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::ValidationConfig;
    use lexgraph_domain::{Conditional, Modality, ModalityKind, Proposition, SourceType};

    fn default_judgment_set() -> NodeSet {
        let node = KnowledgeNode::new("dj", "Order 21 Rule 1", SourceType::Rule, "test")
            .with_given(Proposition::new("Service of the writ was properly effected").with_source("Order 10"))
            .with_if_then(
                Conditional::new(
                    "defendant fails to file defense within the prescribed time",
                    "plaintiff may apply for default judgment",
                )
                .with_exception("leave to file a late defense is granted"),
            )
            .with_what(Proposition::new("Default judgment may be entered against a defendant who fails to defend"))
            .with_can_must(
                Modality::new("apply for default judgment", ModalityKind::May)
                    .with_condition("after the time for filing a defense has expired"),
            )
            .with_can_must(
                Modality::new("serve notice of the application on the defendant", ModalityKind::Must)
                    .with_condition("before obtaining default judgment"),
            )
            .with_why(Proposition::new("To prevent defendants from delaying proceedings").with_source("Order 21"))
            .with_full_text("Where a defendant fails to file a defence within time, the plaintiff may apply for judgment in default of defence.");

        NodeSet::load("test", vec![node], ValidationConfig::default()).unwrap()
    }

    #[test]
    fn test_chain_order_is_given_ifthen_what_canmust() {
        let set = default_judgment_set();
        let result = reason_over(
            &set,
            "Can I apply for default judgment if the defendant filed no defense?",
            &ReasonConfig::default(),
        )
        .unwrap();

        let dims: Vec<Dimension> = result.chain.iter().map(|s| s.dimension).collect();
        let first_given = dims.iter().position(|d| *d == Dimension::Given).unwrap();
        let first_ifthen = dims.iter().position(|d| *d == Dimension::IfThen).unwrap();
        let first_what = dims.iter().position(|d| *d == Dimension::What).unwrap();
        let first_modal = dims.iter().position(|d| *d == Dimension::CanMust).unwrap();
        assert!(first_given < first_ifthen);
        assert!(first_ifthen < first_what);
        assert!(first_what < first_modal);
    }

    #[test]
    fn test_permission_question_concludes_with_modality() {
        let set = default_judgment_set();
        let result = reason_over(
            &set,
            "Can I apply for default judgment?",
            &ReasonConfig::default(),
        )
        .unwrap();
        assert!(result.conclusion.starts_with("MAY apply for default judgment"));
        assert!(result.conclusion.contains("Order 21 Rule 1"));
    }

    #[test]
    fn test_confidence_scales_with_authority() {
        let set = default_judgment_set();
        let result = reason_over(
            &set,
            "default judgment against defendant who fails to defend",
            &ReasonConfig::default(),
        )
        .unwrap();
        // Rule authority is 0.8; confidence can never exceed it.
        assert!(result.confidence > 0.0);
        assert!(result.confidence <= 0.8);
    }

    #[test]
    fn test_no_match_is_zero_confidence_not_error() {
        let set = default_judgment_set();
        let result = reason_over(
            &set,
            "admiralty ship arrest procedure",
            &ReasonConfig::default(),
        )
        .unwrap();
        assert_eq!(result.confidence, 0.0);
        assert!(result.chain.is_empty());
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_empty_question_is_rejected() {
        let set = default_judgment_set();
        let err = reason_over(&set, "   ", &ReasonConfig::default()).unwrap_err();
        assert!(matches!(err, ModuleError::EmptyQuestion));
    }

    #[test]
    fn test_superseded_node_produces_warning() {
        let node = KnowledgeNode::new("old", "Order 99 Rule 1", SourceType::Rule, "test")
            .with_what(Proposition::new("Old procedure for garnishee orders"))
            .with_why(Proposition::new("Historic policy").with_source("Order 99"))
            .with_superseded_by("new");
        let replacement = KnowledgeNode::new("new", "Order 99 Rule 1A", SourceType::Rule, "test")
            .with_what(Proposition::new("Replacement provision"))
            .with_why(Proposition::new("Updated policy").with_source("Order 99"));
        let set = NodeSet::load("test", vec![node, replacement], ValidationConfig::default())
            .unwrap();

        let result = reason_over(&set, "garnishee orders procedure", &ReasonConfig::default())
            .unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("superseded")));
    }
}
