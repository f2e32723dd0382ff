//! Proposition - a single natural-language-derived statement

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single logical proposition.
///
/// Used for the WHAT, WHICH, GIVEN, and WHY dimensions. Immutable once
/// authored; the `source_line` ties the statement back to the paragraph of
/// the source text it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposition {
    /// The statement text
    pub text: String,

    /// Confidence weight in [0.0, 1.0] assigned at authoring time
    pub confidence: f64,

    /// Source line/paragraph citation (e.g., "Order 21 Rule 1(1)")
    pub source_line: Option<String>,
}

impl Proposition {
    /// Create a proposition with full confidence and no source line
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: 1.0,
            source_line: None,
        }
    }

    /// Attach a source line citation
    pub fn with_source(mut self, source_line: impl Into<String>) -> Self {
        self.source_line = Some(source_line.into());
        self
    }

    /// Set an explicit confidence weight
    ///
    /// # Panics
    /// Panics if the weight is outside [0, 1].
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&confidence),
            "Confidence must be in [0, 1]"
        );
        self.confidence = confidence;
        self
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (confidence: {:.2})", self.text, self.confidence)
    }
}
