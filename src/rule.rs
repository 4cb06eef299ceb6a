//! Rule identity and metadata

use crate::diagnostic::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule category for grouping related rules
///
/// Names are serialized verbatim; suppression files key on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleCategory {
    /// Rules that improve runtime performance
    Performance,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCategory::Performance => write!(f, "Performance"),
        }
    }
}

/// Static description of a rule.
///
/// Every field is part of the rule's persisted contract and must stay
/// byte-for-byte stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    /// Unique rule identifier
    pub id: &'static str,
    /// Short title
    pub title: &'static str,
    /// Message template; `{0}` is replaced with the type's display name
    pub message_format: &'static str,
    /// Long description
    pub description: &'static str,
    /// Rule category
    pub category: RuleCategory,
    /// Severity applied to every finding
    pub default_severity: Severity,
    /// Whether this rule runs without explicit opt-in
    pub enabled_by_default: bool,
}

impl RuleDescriptor {
    /// Substitute the type name into the message template
    pub fn format_message(&self, name: &str) -> String {
        self.message_format.replace("{0}", name)
    }
}

/// Types with a static initializer and too many static methods
pub const STATIC_INITIALIZER_RULE: RuleDescriptor = RuleDescriptor {
    id: "UNOM0003",
    title: "Large number of static methods in a type with a static initializer",
    message_format: "{0} has a static type initializer and contains too many static methods. Refactor to use instance methods or remove the static type initializer.",
    description: "This type has a static type initializer and contains too many static methods; this creates a large boiler plate code in every static method",
    category: RuleCategory::Performance,
    default_severity: Severity::Warning,
    enabled_by_default: true,
};
