// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture configuration loaded from TOML or JSON.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// Default ignore pattern: transients are cache-only and may write normally.
pub const DEFAULT_IGNORE_PATTERN: &str = "^_transient_";

static TRANSIENT_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(DEFAULT_IGNORE_PATTERN).ok());

fn default_ignore_patterns() -> Vec<String> {
    vec![DEFAULT_IGNORE_PATTERN.to_string()]
}

/// Errors that can occur when loading capture configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read capture config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Capture configuration
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CaptureConfig {
    /// Option names matching any of these regexes are written through
    /// instead of captured (default: `["^_transient_"]`)
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

impl CaptureConfig {
    /// Load from a TOML file, or JSON when the extension is `.json`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|e| e == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Self::parse_toml(&content)
        }
    }

    /// Parse TOML content
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Compile the ignore patterns
    pub fn compile(&self) -> Result<IgnoreRules, ConfigError> {
        IgnoreRules::new(&self.ignore_patterns)
    }
}

/// Compiled ignore patterns.
#[derive(Clone, Debug)]
pub struct IgnoreRules {
    patterns: Vec<Regex>,
}

impl IgnoreRules {
    /// Compile a list of regex patterns
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let pattern = p.as_ref();
                Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Rules that ignore nothing; every write is captured
    pub fn none() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Check whether `name` should be written through
    pub fn is_match(&self, name: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(name))
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if there are no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            patterns: TRANSIENT_REGEX.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
