//! Conditional - "if P then Q unless E" rule logic

use serde::{Deserialize, Serialize};
use std::fmt;

/// An (condition, consequence, exceptions) triple.
///
/// Represents procedural conditionals: "IF condition met, THEN consequence
/// follows, EXCEPT in the listed situations".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    /// The IF part
    pub condition: String,

    /// The THEN part
    pub consequence: String,

    /// The UNLESS part - situations where the conditional does not apply
    pub exceptions: Vec<String>,

    /// Confidence weight in [0.0, 1.0]
    pub confidence: f64,

    /// Source line/paragraph citation
    pub source_line: Option<String>,
}

impl Conditional {
    /// Create a conditional with no exceptions and full confidence
    pub fn new(condition: impl Into<String>, consequence: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            consequence: consequence.into(),
            exceptions: Vec::new(),
            confidence: 1.0,
            source_line: None,
        }
    }

    /// Add an exception clause
    pub fn with_exception(mut self, exception: impl Into<String>) -> Self {
        self.exceptions.push(exception.into());
        self
    }

    /// Attach a source line citation
    pub fn with_source(mut self, source_line: impl Into<String>) -> Self {
        self.source_line = Some(source_line.into());
        self
    }
}

impl fmt::Display for Conditional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF {} THEN {}", self.condition, self.consequence)?;
        if !self.exceptions.is_empty() {
            write!(f, " (EXCEPT: {})", self.exceptions.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_exceptions() {
        let c = Conditional::new("no defense is filed", "judgment may be entered");
        assert_eq!(
            c.to_string(),
            "IF no defense is filed THEN judgment may be entered"
        );
    }

    #[test]
    fn test_display_with_exceptions() {
        let c = Conditional::new("no defense is filed", "judgment may be entered")
            .with_exception("leave to file late defense is granted");
        assert!(c.to_string().ends_with("(EXCEPT: leave to file late defense is granted)"));
    }
}
