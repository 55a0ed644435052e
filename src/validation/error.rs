//! Validation error types.

use std::fmt;

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// One failed rule: the field path it attaches to and a readable message.
///
/// An empty path means the rule applies to the input as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Input rejected by a schema. Carries every violation, in rule order.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("Validation failed: {}", join(.violations))]
#[diagnostic(
    code(psa_mcp::validation::failed),
    help("Correct every listed field and call the tool again.")
)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation::new(path, message)],
        }
    }

    /// Whether any violation is attached to `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
