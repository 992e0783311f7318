// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Registered widget controls, keyed by id base.

use crate::update::WidgetControl;
use std::collections::HashMap;
use std::sync::Arc;

/// Widget controls available for updates
#[derive(Default)]
pub struct WidgetRegistry {
    controls: HashMap<String, Arc<dyn WidgetControl>>,
}

impl WidgetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a control under its id base, returning the one it replaced
    pub fn register(&mut self, control: Arc<dyn WidgetControl>) -> Option<Arc<dyn WidgetControl>> {
        self.controls.insert(control.id_base().to_string(), control)
    }

    /// Look up the control for an id base
    pub fn get(&self, id_base: &str) -> Option<Arc<dyn WidgetControl>> {
        self.controls.get(id_base).map(Arc::clone)
    }

    /// Check if a control is registered for an id base
    pub fn contains(&self, id_base: &str) -> bool {
        self.controls.contains_key(id_base)
    }

    /// Registered id bases, sorted
    pub fn id_bases(&self) -> Vec<&str> {
        let mut bases: Vec<_> = self.controls.keys().map(String::as_str).collect();
        bases.sort_unstable();
        bases
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

impl std::fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("id_bases", &self.id_bases())
            .finish()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
