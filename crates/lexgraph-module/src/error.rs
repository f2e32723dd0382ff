//! Module-layer error types

use crate::validator::ValidationIssue;
use thiserror::Error;

/// Load-time configuration error: the authored node set failed validation.
///
/// This is fatal at startup. The module refuses to load rather than
/// silently dropping the failing nodes.
#[derive(Debug, Error)]
#[error("module \"{module_id}\" failed validation with {} issue(s): {}", .issues.len(), format_issues(.issues))]
pub struct ValidationError {
    /// The module that refused to load
    pub module_id: String,

    /// Every validation failure found
    pub issues: Vec<ValidationIssue>,
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Run-time errors from module operations.
///
/// `reason` never fails for "no answer"; the only failure modes are
/// malformed input and programmer error.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// The question was empty or whitespace-only
    #[error("question is empty")]
    EmptyQuestion,

    /// A node id referenced by the caller does not exist in this module
    #[error("node not found: {0}")]
    NodeNotFound(String),
}
