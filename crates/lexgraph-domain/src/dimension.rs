//! Dimension - the six axes a knowledge node is decomposed along

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six content dimensions of a knowledge node.
///
/// Also used as the question-type classification target: the router maps an
/// incoming query to the dimension it is most likely asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Core holdings, rules, or facts established
    What,

    /// Scope and applicability boundaries
    Which,

    /// Conditional logic and consequences
    IfThen,

    /// Obligations, permissions, and prohibitions
    CanMust,

    /// Prerequisites and assumptions
    Given,

    /// Rationale and policy considerations
    Why,
}

impl Dimension {
    /// All six dimensions, in chain-construction order
    pub const ALL: [Dimension; 6] = [
        Dimension::Given,
        Dimension::IfThen,
        Dimension::What,
        Dimension::CanMust,
        Dimension::Which,
        Dimension::Why,
    ];

    /// Canonical label, as used in reasoning chains and indexes
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::What => "WHAT",
            Dimension::Which => "WHICH",
            Dimension::IfThen => "IF_THEN",
            Dimension::CanMust => "CAN_MUST",
            Dimension::Given => "GIVEN",
            Dimension::Why => "WHY",
        }
    }

    /// Parse a canonical label back into a dimension
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "WHAT" => Some(Dimension::What),
            "WHICH" => Some(Dimension::Which),
            "IF_THEN" => Some(Dimension::IfThen),
            "CAN_MUST" => Some(Dimension::CanMust),
            "GIVEN" => Some(Dimension::Given),
            "WHY" => Some(Dimension::Why),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
