// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Captured option values.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Option values intercepted during a capture session.
///
/// Ordered by first capture. Recording a name again replaces its value but
/// keeps its position.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CapturedOptions {
    values: IndexMap<String, Value>,
}

impl CapturedOptions {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value. Returns `true` if this is the first capture of `name`.
    pub(crate) fn insert(&mut self, name: &str, value: Value) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                false
            }
            None => {
                self.values.insert(name.to_string(), value);
                true
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
    }

    /// Get a captured value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Check whether `name` was captured
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Captured names in first-capture order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|s| s.as_str())
    }

    /// Iterate over captured names and values in first-capture order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct captured names
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing was captured
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl IntoIterator for CapturedOptions {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
#[path = "captured_tests.rs"]
mod tests;
