//! Scripted index implementations for tests.
//!
//! `StaticIndex` replays canned hits and `FailingIndex` simulates an
//! unreachable backend, so callers can exercise degraded paths without a
//! live search cluster.

use crate::{IndexError, KeywordHit, KeywordIndex};
use async_trait::async_trait;
use lexgraph_domain::NodeId;
use std::collections::HashSet;

/// Index that returns the same scripted hits for every query.
///
/// The allow-list and `top_k` are still honored, so routing behavior can be
/// asserted against known scores.
pub struct StaticIndex {
    hits: Vec<KeywordHit>,
}

impl StaticIndex {
    /// Create an index that always answers with `hits`
    pub fn new(hits: Vec<KeywordHit>) -> Self {
        Self { hits }
    }

    /// Convenience constructor from `(node_id, score)` pairs
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(id, score)| KeywordHit {
                    node_id: NodeId::from(*id),
                    score: *score,
                })
                .collect(),
        )
    }
}

#[async_trait]
impl KeywordIndex for StaticIndex {
    async fn search(
        &self,
        _query: &str,
        allow: Option<&[NodeId]>,
        top_k: usize,
    ) -> Result<Vec<KeywordHit>, IndexError> {
        let allow_set: Option<HashSet<&NodeId>> = allow.map(|ids| ids.iter().collect());
        let mut hits: Vec<KeywordHit> = self
            .hits
            .iter()
            .filter(|hit| match &allow_set {
                Some(set) => set.contains(&hit.node_id),
                None => true,
            })
            .cloned()
            .collect();
        hits.truncate(top_k);
        Ok(hits)
    }
}

/// Index whose backend is always unreachable
pub struct FailingIndex;

#[async_trait]
impl KeywordIndex for FailingIndex {
    async fn search(
        &self,
        _query: &str,
        _allow: Option<&[NodeId]>,
        _top_k: usize,
    ) -> Result<Vec<KeywordHit>, IndexError> {
        Err(IndexError::Unavailable("scripted outage".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_index_replays_hits() {
        let index = StaticIndex::from_pairs(&[("n1", 5.0), ("n2", 3.0)]);
        let hits = index.search("anything", None, 10).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].node_id.as_str(), "n1");
        assert_eq!(hits[0].score, 5.0);
    }

    #[tokio::test]
    async fn test_static_index_filters_by_allow_list() {
        let index = StaticIndex::from_pairs(&[("n1", 5.0), ("n2", 3.0)]);
        let allow = vec![NodeId::from("n2")];
        let hits = index.search("anything", Some(&allow), 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node_id.as_str(), "n2");
    }

    #[tokio::test]
    async fn test_static_index_truncates_to_top_k() {
        let index = StaticIndex::from_pairs(&[("n1", 5.0), ("n2", 3.0), ("n3", 1.0)]);
        let hits = index.search("anything", None, 2).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_failing_index_reports_unavailable() {
        let index = FailingIndex;
        let err = index.search("anything", None, 10).await.unwrap_err();
        assert!(matches!(err, IndexError::Unavailable(_)));
    }
}
