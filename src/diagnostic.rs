//! Finding types produced by rule evaluation

use crate::rule::RuleCategory;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for findings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,
    /// Warning - style or performance hint, never fails a build
    #[default]
    Warning,
    /// Error - definite problem
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Source position of a declaration, as reported by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path
    pub file: PathBuf,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Length of the highlighted region
    #[serde(default)]
    pub length: usize,
}

impl Location {
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            length: 0,
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A located, severity-tagged message emitted by a rule.
///
/// The location is borrowed from the symbol that produced the finding, so a
/// finding never outlives the host's symbol data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Finding<'a> {
    /// Rule ID that triggered this finding
    pub rule_id: &'static str,
    /// Severity level
    pub severity: Severity,
    /// Rule category
    pub category: RuleCategory,
    /// Human-readable message
    pub message: String,
    /// Source location, if the host supplied one
    pub location: Option<&'a Location>,
}

impl<'a> Finding<'a> {
    /// Create a new finding
    pub fn new(
        rule_id: &'static str,
        severity: Severity,
        category: RuleCategory,
        message: String,
        location: Option<&'a Location>,
    ) -> Self {
        Self {
            rule_id,
            severity,
            category,
            message,
            location,
        }
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Check if this is a warning
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for Finding<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(location) = self.location {
            write!(f, "{}: ", location)?;
        }
        write!(f, "{} {}: {}", self.severity, self.rule_id, self.message)
    }
}
