//! Query routing: lexical analysis of an incoming question
//!
//! The router is deliberately lexical, not semantic: topic tags come from a
//! keyword-to-topic table built at registration time (case-insensitive,
//! lightly stemmed), and the question type comes from surface markers. The
//! output is advisory; zero candidates never fails a query.

use lexgraph_domain::Dimension;
use serde::{Deserialize, Serialize};

/// Parsed routing intent for one query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryIntent {
    /// The query as received
    pub raw_query: String,

    /// Extracted topic tags
    pub topics: Vec<String>,

    /// Coarse question-type classification
    pub question_type: Dimension,

    /// Candidate module ids, ordered by topic-intersection size
    pub candidate_modules: Vec<String>,

    /// Matched tag count / extracted tag count, in [0, 1]
    pub confidence: f64,
}

/// Light suffix-stripping stem: enough to fold plurals and simple verb
/// forms onto the keyword table without a full stemmer.
pub(crate) fn stem(token: &str) -> String {
    let t = token.to_lowercase();
    for suffix in ["ing", "ied", "ies", "ed", "es", "s"] {
        if let Some(stripped) = t.strip_suffix(suffix) {
            // The longest matching suffix decides; a stem shorter than
            // three characters is left unstripped.
            if stripped.len() < 3 {
                return t;
            }
            // Fold doubled final consonants ("setting" and "set" must
            // stem alike)
            let bytes = stripped.as_bytes();
            if bytes.len() >= 4 && bytes[bytes.len() - 1] == bytes[bytes.len() - 2] {
                return stripped[..stripped.len() - 1].to_string();
            }
            return stripped.to_string();
        }
    }
    t
}

/// Stemmed tokens of a query
pub(crate) fn stemmed_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 2)
        .map(stem)
        .collect()
}

/// True when every stemmed word of `phrase` appears among the query tokens
pub(crate) fn phrase_matches(query_tokens: &[String], phrase: &str) -> bool {
    let words = stemmed_tokens(phrase);
    !words.is_empty() && words.iter().all(|w| query_tokens.contains(w))
}

/// Classify a question into the dimension it most likely asks about.
///
/// Marker precedence follows specificity: modality markers before
/// conditional markers before the WHICH/WHY interrogatives; WHAT is the
/// default.
pub(crate) fn classify_question(query: &str) -> Dimension {
    // Punctuation becomes whitespace so a marker at the end of the query
    // ("what if?") still sits between spaces.
    let normalized = query
        .to_lowercase()
        .replace(|c: char| !c.is_alphanumeric(), " ");
    let q = format!(" {} ", normalized);
    let has = |marker: &str| q.contains(&format!(" {} ", marker));

    if has("can") || has("may") || has("must") || has("shall") || has("allowed")
        || has("required") || has("permitted") || has("obliged")
    {
        return Dimension::CanMust;
    }
    if has("if") || has("when") || q.contains("what happens") || has("consequence") {
        return Dimension::IfThen;
    }
    if has("why") || has("rationale") || has("purpose") {
        return Dimension::Why;
    }
    if has("given") || has("assuming") || has("suppose") {
        return Dimension::Given;
    }
    if has("which") || has("who") || has("where") {
        return Dimension::Which;
    }
    Dimension::What
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_folds_plurals() {
        assert_eq!(stem("judgments"), "judgment");
        assert_eq!(stem("costs"), "cost");
        assert_eq!(stem("serving"), "serv");
        assert_eq!(stem("served"), "serv");
    }

    #[test]
    fn test_stem_keeps_short_tokens() {
        // Stripping would leave fewer than three characters
        assert_eq!(stem("does"), "does");
        assert_eq!(stem("as"), "as");
    }

    #[test]
    fn test_classify_modality_questions() {
        assert_eq!(
            classify_question("Can I apply for default judgment?"),
            Dimension::CanMust
        );
        assert_eq!(
            classify_question("Must notice be served first?"),
            Dimension::CanMust
        );
    }

    #[test]
    fn test_classify_conditional_questions() {
        assert_eq!(
            classify_question("What happens if the defendant does not respond?"),
            Dimension::IfThen
        );
        assert_eq!(
            classify_question("When does time start to run?"),
            Dimension::IfThen
        );
    }

    #[test]
    fn test_classify_why_and_which() {
        assert_eq!(
            classify_question("Why does the rule require notice?"),
            Dimension::Why
        );
        assert_eq!(
            classify_question("Which court hears the application?"),
            Dimension::Which
        );
    }

    #[test]
    fn test_classify_marker_at_end_of_query() {
        assert_eq!(classify_question("what if?"), Dimension::IfThen);
        assert_eq!(classify_question("notice must be served, must it?"), Dimension::CanMust);
        assert_eq!(classify_question("why?"), Dimension::Why);
    }

    #[test]
    fn test_classify_defaults_to_what() {
        assert_eq!(
            classify_question("the procedure for default judgment"),
            Dimension::What
        );
    }

    #[test]
    fn test_phrase_matching_is_stemmed() {
        let tokens = stemmed_tokens("setting aside default judgments");
        assert!(phrase_matches(&tokens, "set aside"));
        assert!(phrase_matches(&tokens, "default judgment"));
        assert!(!phrase_matches(&tokens, "summary judgment"));
    }
}
