// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture session controller.

use crate::captured::CapturedOptions;
use crate::config::{CaptureConfig, ConfigError, IgnoreRules};
use crate::guard::CaptureGuard;
use optcap_store::{InterceptorId, OptionStore, ReadInterceptor, WriteInterceptor};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Default)]
struct CaptureState {
    active: bool,
    write_hook: Option<InterceptorId>,
    read_hooks: Vec<InterceptorId>,
    captured: CapturedOptions,
}

/// Interceptor installed on the store while a session is active.
#[derive(Clone)]
struct CaptureHook {
    state: Arc<Mutex<CaptureState>>,
    ignore: Arc<IgnoreRules>,
}

impl WriteInterceptor for CaptureHook {
    fn before_write(
        &self,
        store: &OptionStore,
        name: &str,
        new_value: Value,
        old_value: Option<&Value>,
    ) -> Option<Value> {
        if self.ignore.is_match(name) {
            tracing::trace!(option = name, "option write passes through capture");
            return Some(new_value);
        }

        let mut state = self.state.lock();
        if !state.active {
            return Some(new_value);
        }

        if state.captured.insert(name, new_value) {
            let id = store.add_read_interceptor(name, Arc::new(self.clone()));
            state.read_hooks.push(id);
        }
        tracing::trace!(option = name, "captured option write");

        old_value.cloned()
    }
}

impl ReadInterceptor for CaptureHook {
    fn before_read(&self, store: &OptionStore, name: &str) -> Option<Value> {
        let value = self.state.lock().captured.get(name).cloned()?;
        Some(store.apply_read_filters(name, value))
    }
}

/// Option-update capture session bound to one store.
///
/// While active, writes to the store are recorded instead of persisted and
/// reads of recorded options return the recorded value. The session is
/// INACTIVE on creation; [`start`](Self::start) and [`stop`](Self::stop) are
/// idempotent. Dropping an active session stops it.
pub struct OptionCapture<'s> {
    store: &'s OptionStore,
    ignore: Arc<IgnoreRules>,
    state: Arc<Mutex<CaptureState>>,
}

impl<'s> OptionCapture<'s> {
    /// Create a session that ignores transients.
    pub fn new(store: &'s OptionStore) -> Self {
        Self::with_rules(store, IgnoreRules::default())
    }

    /// Create a session with explicit ignore rules.
    pub fn with_rules(store: &'s OptionStore, ignore: IgnoreRules) -> Self {
        Self {
            store,
            ignore: Arc::new(ignore),
            state: Arc::new(Mutex::new(CaptureState::default())),
        }
    }

    /// Create a session from configuration.
    pub fn from_config(
        store: &'s OptionStore,
        config: &CaptureConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self::with_rules(store, config.compile()?))
    }

    /// The store this session intercepts
    pub fn store(&self) -> &'s OptionStore {
        self.store
    }

    /// Begin capturing.
    ///
    /// Returns `false` without touching any state if already active.
    pub fn start(&self) -> bool {
        let mut state = self.state.lock();
        if state.active {
            return false;
        }

        state.captured.clear();
        state.active = true;
        let hook = CaptureHook {
            state: Arc::clone(&self.state),
            ignore: Arc::clone(&self.ignore),
        };
        state.write_hook = Some(self.store.add_write_interceptor(Arc::new(hook)));
        tracing::debug!("option capture started");
        true
    }

    /// Stop capturing, removing every interceptor the session installed and
    /// discarding captured values.
    ///
    /// Returns `false` if the session was not active.
    pub fn stop(&self) -> bool {
        let mut state = self.state.lock();
        if !state.active {
            return false;
        }

        if let Some(id) = state.write_hook.take() {
            self.store.remove_interceptor(id);
        }
        for id in state.read_hooks.drain(..) {
            self.store.remove_interceptor(id);
        }
        tracing::debug!(captured = state.captured.len(), "option capture stopped");
        state.captured.clear();
        state.active = false;
        true
    }

    /// Start the session and return a guard that stops it when dropped.
    ///
    /// If the session is already active the guard leaves it running on drop;
    /// only the scope that started a session stops it.
    pub fn scope(&self) -> CaptureGuard<'_, 's> {
        let started = self.start();
        CaptureGuard::new(self, started)
    }

    /// Check whether the session is active
    pub fn is_active(&self) -> bool {
        self.state.lock().active
    }

    /// Check whether writes to `name` bypass capture
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.is_match(name)
    }

    /// Number of distinct options captured so far
    pub fn count(&self) -> usize {
        self.state.lock().captured.len()
    }

    /// Captured value for `name`
    pub fn get(&self, name: &str) -> Option<Value> {
        self.state.lock().captured.get(name).cloned()
    }

    /// Captured value for `name`, or `default`
    pub fn get_or(&self, name: &str, default: impl Into<Value>) -> Value {
        self.get(name).unwrap_or_else(|| default.into())
    }

    /// Snapshot of everything captured, in first-capture order
    pub fn all(&self) -> CapturedOptions {
        self.state.lock().captured.clone()
    }
}

impl Drop for OptionCapture<'_> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for OptionCapture<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("OptionCapture")
            .field("active", &state.active)
            .field("captured", &state.captured)
            .field("ignore", &self.ignore)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
