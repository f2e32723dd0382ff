//! Module metadata, used for indexing and routing only

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Static description of a module.
///
/// The registry indexes modules by this metadata; it carries no node
/// content and must not change after registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    /// Unique module identifier (e.g., "order_21")
    pub id: String,

    /// Human-readable display name
    pub name: String,

    /// Semantic version of the authored content
    pub version: String,

    /// Authority weight of the module's dominant source type
    pub authority_weight: f64,

    /// Topics this module covers (e.g., "default_judgment")
    pub topics: Vec<String>,

    /// Keywords mapping queries to this module's topics
    pub keywords: Vec<String>,

    /// When the covered content came into force
    pub effective_date: DateTime<Utc>,

    /// Free-form description
    pub description: String,
}

impl ModuleMetadata {
    /// Create metadata with empty topic/keyword coverage
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        authority_weight: f64,
        effective_date: DateTime<Utc>,
    ) -> Self {
        assert!(
            (0.0..=1.0).contains(&authority_weight),
            "Authority weight must be in [0, 1]"
        );
        Self {
            id: id.into(),
            name: name.into(),
            version: "1.0.0".to_string(),
            authority_weight,
            topics: Vec::new(),
            keywords: Vec::new(),
            effective_date,
            description: String::new(),
        }
    }

    /// Add a covered topic
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topics.push(topic.into());
        self
    }

    /// Add a routing keyword
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_builder() {
        let meta = ModuleMetadata::new("order_21", "Order 21 - Default Judgment", 0.8, Utc::now())
            .with_topic("default_judgment")
            .with_keyword("default")
            .with_keyword("judgment");

        assert_eq!(meta.id, "order_21");
        assert_eq!(meta.topics, vec!["default_judgment"]);
        assert_eq!(meta.keywords.len(), 2);
        assert_eq!(meta.version, "1.0.0");
    }

    #[test]
    #[should_panic]
    fn test_invalid_authority_weight() {
        ModuleMetadata::new("bad", "Bad", 1.5, Utc::now());
    }
}
