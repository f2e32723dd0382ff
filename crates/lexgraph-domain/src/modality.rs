//! Modality - deontic logic for obligations and permissions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deontic modality kinds.
///
/// The closed set of obligation/permission qualifiers a rule can attach to
/// an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModalityKind {
    /// Permission (discretionary)
    May,

    /// Strict obligation (no discretion)
    Must,

    /// Strict prohibition
    MustNot,

    /// Recommendation (not binding)
    Should,

    /// No permission
    MayNot,
}

impl ModalityKind {
    /// Canonical uppercase label, as rendered in reasoning chains
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalityKind::May => "MAY",
            ModalityKind::Must => "MUST",
            ModalityKind::MustNot => "MUST NOT",
            ModalityKind::Should => "SHOULD",
            ModalityKind::MayNot => "MAY NOT",
        }
    }

    /// True for modalities that impose a duty rather than grant discretion
    pub fn is_obligation(&self) -> bool {
        matches!(self, ModalityKind::Must | ModalityKind::MustNot)
    }
}

impl fmt::Display for ModalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An (action, modality-kind, applicability-conditions) triple.
///
/// Captures the MUST/MAY distinctions that drive procedural reasoning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modality {
    /// The action being qualified (e.g., "serve notice on the defendant")
    pub action: String,

    /// The deontic qualifier
    pub kind: ModalityKind,

    /// Conditions under which this modality applies
    pub conditions: Vec<String>,

    /// Confidence weight in [0.0, 1.0]
    pub confidence: f64,

    /// Source line/paragraph citation
    pub source_line: Option<String>,
}

impl Modality {
    /// Create an unconditional modality with full confidence
    pub fn new(action: impl Into<String>, kind: ModalityKind) -> Self {
        Self {
            action: action.into(),
            kind,
            conditions: Vec::new(),
            confidence: 1.0,
            source_line: None,
        }
    }

    /// Add an applicability condition
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Attach a source line citation
    pub fn with_source(mut self, source_line: impl Into<String>) -> Self {
        self.source_line = Some(source_line.into());
        self
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.action)?;
        if !self.conditions.is_empty() {
            write!(f, " (when: {})", self.conditions.join(", "))?;
        }
        Ok(())
    }
}
