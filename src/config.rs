//! Configuration for the rule and the analysis loop
//!
//! Reads configuration from:
//! - `.staticinitrc.yaml` / `.staticinitrc.json` (project-level)
//! - `~/.staticinitrc.yaml` (user-level)

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Default number of static methods tolerated next to a static initializer
pub const DEFAULT_METHOD_THRESHOLD: usize = 50;

/// Options recognized by the static initializer rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// A type triggers only with strictly more static methods than this
    pub method_threshold: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            method_threshold: DEFAULT_METHOD_THRESHOLD,
        }
    }
}

/// Analysis loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Evaluate types in parallel
    pub parallel: bool,

    /// Number of worker threads (0 = auto-detect)
    pub jobs: usize,

    /// Include types declared in generated code
    pub analyze_generated: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            jobs: 0,
            analyze_generated: true,
        }
    }
}

/// Rule selection and suppression
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Disabled rule IDs
    pub disabled: Vec<String>,

    /// Per-type rule ignores (glob over display names -> rule IDs or "all")
    pub per_type: HashMap<String, Vec<String>>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine settings
    pub engine: EngineConfig,

    /// Rule selection
    pub rules: RulesConfig,

    /// Static initializer rule options
    pub static_initializer: RuleConfig,
}

impl Config {
    /// Create default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config: Self = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "Unknown config file format: {}",
                    ext
                )))
            }
        };

        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from default locations (current directory, then home)
    pub fn load_default() -> Result<Self, ConfigError> {
        let search_dirs: Vec<PathBuf> = std::env::current_dir()
            .ok()
            .into_iter()
            .chain(dirs::home_dir())
            .collect();
        Self::load_first(&search_dirs)
    }

    /// Load the first config file found in `dirs`, searched in order
    pub fn load_first(dirs: &[PathBuf]) -> Result<Self, ConfigError> {
        match dirs.iter().find_map(|dir| Self::find_in(dir)) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Find the first known config file name in a directory
    pub fn find_in(dir: &Path) -> Option<PathBuf> {
        const CONFIG_NAMES: [&str; 3] = [
            ".staticinitrc.yaml",
            ".staticinitrc.yml",
            ".staticinitrc.json",
        ];

        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Check if a rule is enabled
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        !self.rules.disabled.iter().any(|r| r == rule_id)
    }
}

/// Compiled per-type suppressions for one rule
#[derive(Debug, Clone)]
pub struct TypeSuppressions {
    set: GlobSet,
}

impl TypeSuppressions {
    /// Compile the `per_type` patterns that name `rule_id` (or "all")
    ///
    /// Invalid patterns are logged once and left out.
    pub fn build(rules: &RulesConfig, rule_id: &str) -> Self {
        let mut builder = GlobSetBuilder::new();
        for (pattern, ids) in &rules.per_type {
            if !ids.iter().any(|r| r == "all" || r == rule_id) {
                continue;
            }
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => log::warn!("ignoring invalid per_type pattern '{}': {}", pattern, e),
            }
        }

        let set = builder.build().unwrap_or_else(|e| {
            log::warn!("ignoring per_type suppressions: {}", e);
            GlobSet::empty()
        });
        Self { set }
    }

    /// Check if a type display name is suppressed
    pub fn is_suppressed(&self, type_name: &str) -> bool {
        self.set.is_match(type_name)
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
