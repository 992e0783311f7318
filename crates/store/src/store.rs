// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Option store implementation.

use crate::intercept::{Hook, InterceptorId, ReadFilter, ReadInterceptor, WriteInterceptor};
use crate::io::{parse_json5_or_json, write_atomic};
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Name prefix under which transients are stored as options.
pub const TRANSIENT_PREFIX: &str = "_transient_";

/// Errors that can occur when loading or persisting options
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access option file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse option file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Option file {0} does not contain a JSON object")]
    NotAnObject(PathBuf),
}

#[derive(Debug, Default)]
struct Inner {
    values: IndexMap<String, Value>,
    /// Keyed by id, so iteration follows registration order.
    hooks: BTreeMap<InterceptorId, Hook>,
    next_id: u64,
}

impl Inner {
    fn register(&mut self, hook: Hook) -> InterceptorId {
        let id = InterceptorId(self.next_id);
        self.next_id += 1;
        self.hooks.insert(id, hook);
        id
    }
}

/// Key/value option store.
///
/// Shared by reference; all state sits behind an internal mutex that is
/// released before any interceptor or filter runs.
#[derive(Debug)]
pub struct OptionStore {
    path: Option<PathBuf>,
    inner: Mutex<Inner>,
}

impl OptionStore {
    /// Create a store that only lives in memory.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Open a store backed by a JSON (or JSON5) object file.
    ///
    /// A missing file yields an empty store; the file is created on the first
    /// persisted write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = if path.exists() {
            load_values(&path)?
        } else {
            IndexMap::new()
        };

        Ok(Self {
            path: Some(path),
            inner: Mutex::new(Inner {
                values,
                ..Inner::default()
            }),
        })
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read an option.
    ///
    /// Read interceptors registered for `name` are consulted first, in
    /// registration order; the first one returning a value wins. Otherwise the
    /// persisted value is passed through the read filters for `name`.
    pub fn get_option(&self, name: &str) -> Option<Value> {
        for interceptor in self.read_interceptors(name) {
            if let Some(value) = interceptor.before_read(self, name) {
                return Some(value);
            }
        }

        let value = self.inner.lock().values.get(name).cloned()?;
        Some(self.apply_read_filters(name, value))
    }

    /// Read an option, falling back to `default` when it is absent.
    pub fn get_option_or(&self, name: &str, default: impl Into<Value>) -> Value {
        self.get_option(name).unwrap_or_else(|| default.into())
    }

    /// Read an option as a string
    pub fn get_str(&self, name: &str) -> Option<String> {
        self.get_option(name)
            .and_then(|v| v.as_str().map(str::to_owned))
    }

    /// Read an option as a bool
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get_option(name).and_then(|v| v.as_bool())
    }

    /// Read an option as an i64
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get_option(name).and_then(|v| v.as_i64())
    }

    /// Write an option.
    ///
    /// The current value is read through [`get_option`](Self::get_option), so
    /// active read interceptors shape what counts as "old". Write interceptors
    /// then transform the new value in registration order. Nothing is written
    /// when the final value is `None` or equal to the old one.
    ///
    /// Returns `Ok(true)` when a value was persisted.
    pub fn update_option(&self, name: &str, value: impl Into<Value>) -> Result<bool, StoreError> {
        let old = self.get_option(name);

        let mut candidate = Some(value.into());
        for interceptor in self.write_interceptors() {
            candidate = match candidate {
                Some(value) => interceptor.before_write(self, name, value, old.as_ref()),
                None => break,
            };
        }

        let Some(value) = candidate else {
            return Ok(false);
        };
        if old.as_ref() == Some(&value) {
            return Ok(false);
        }

        self.persist(|values| {
            values.insert(name.to_string(), value);
            true
        })
    }

    /// Remove a persisted option. Deletes are not intercepted.
    pub fn delete_option(&self, name: &str) -> Result<bool, StoreError> {
        self.persist(|values| values.shift_remove(name).is_some())
    }

    /// Store a cache-only value under `_transient_{name}`.
    pub fn set_transient(&self, name: &str, value: impl Into<Value>) -> Result<bool, StoreError> {
        self.update_option(&transient_option(name), value)
    }

    /// Read a transient
    pub fn get_transient(&self, name: &str) -> Option<Value> {
        self.get_option(&transient_option(name))
    }

    /// Remove a transient
    pub fn delete_transient(&self, name: &str) -> Result<bool, StoreError> {
        self.delete_option(&transient_option(name))
    }

    /// Register an interceptor consulted before every write.
    pub fn add_write_interceptor(&self, interceptor: Arc<dyn WriteInterceptor>) -> InterceptorId {
        self.inner.lock().register(Hook::Write(interceptor))
    }

    /// Register an interceptor consulted before every read of `name`.
    pub fn add_read_interceptor(
        &self,
        name: impl Into<String>,
        interceptor: Arc<dyn ReadInterceptor>,
    ) -> InterceptorId {
        self.inner.lock().register(Hook::Read {
            name: name.into(),
            interceptor,
        })
    }

    /// Register a transformation applied to persisted values of `name`.
    pub fn add_read_filter<F>(&self, name: impl Into<String>, filter: F) -> InterceptorId
    where
        F: Fn(&str, Value) -> Value + Send + Sync + 'static,
    {
        let filter: ReadFilter = Arc::new(filter);
        self.inner.lock().register(Hook::Filter {
            name: name.into(),
            filter,
        })
    }

    /// Unregister an interceptor or filter. Returns `false` if `id` was unknown.
    pub fn remove_interceptor(&self, id: InterceptorId) -> bool {
        self.inner.lock().hooks.remove(&id).is_some()
    }

    /// Run `value` through the read filters registered for `name`.
    pub fn apply_read_filters(&self, name: &str, value: Value) -> Value {
        let filters: Vec<ReadFilter> = self
            .inner
            .lock()
            .hooks
            .values()
            .filter_map(|hook| match hook {
                Hook::Filter { name: n, filter } if n == name => Some(Arc::clone(filter)),
                _ => None,
            })
            .collect();

        filters
            .into_iter()
            .fold(value, |value, filter| filter(name, value))
    }

    /// Check whether any write interceptor is registered
    pub fn has_write_interceptors(&self) -> bool {
        self.inner
            .lock()
            .hooks
            .values()
            .any(|hook| matches!(hook, Hook::Write(_)))
    }

    /// Number of read interceptors registered for `name`
    pub fn read_interceptor_count(&self, name: &str) -> usize {
        self.inner
            .lock()
            .hooks
            .values()
            .filter(|hook| matches!(hook, Hook::Read { .. }) && hook.option_name() == Some(name))
            .count()
    }

    /// Total number of registered interceptors and filters
    pub fn interceptor_count(&self) -> usize {
        self.inner.lock().hooks.len()
    }

    /// Check whether an option is persisted (ignores interceptors)
    pub fn contains(&self, name: &str) -> bool {
        self.inner.lock().values.contains_key(name)
    }

    /// Names of persisted options, in store order
    pub fn names(&self) -> Vec<String> {
        self.inner.lock().values.keys().cloned().collect()
    }

    /// Number of persisted options
    pub fn len(&self) -> usize {
        self.inner.lock().values.len()
    }

    /// Check if no option is persisted
    pub fn is_empty(&self) -> bool {
        self.inner.lock().values.is_empty()
    }

    fn read_interceptors(&self, name: &str) -> Vec<Arc<dyn ReadInterceptor>> {
        self.inner
            .lock()
            .hooks
            .values()
            .filter_map(|hook| match hook {
                Hook::Read {
                    name: n,
                    interceptor,
                } if n == name => Some(Arc::clone(interceptor)),
                _ => None,
            })
            .collect()
    }

    fn write_interceptors(&self) -> Vec<Arc<dyn WriteInterceptor>> {
        self.inner
            .lock()
            .hooks
            .values()
            .filter_map(|hook| match hook {
                Hook::Write(interceptor) => Some(Arc::clone(interceptor)),
                _ => None,
            })
            .collect()
    }

    /// Apply `mutate` to the persisted values, writing the file first when
    /// the store is file-backed so memory never runs ahead of disk.
    fn persist<F>(&self, mutate: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&mut IndexMap<String, Value>) -> bool,
    {
        let mut inner = self.inner.lock();
        let Some(path) = &self.path else {
            return Ok(mutate(&mut inner.values));
        };

        let mut next = inner.values.clone();
        if !mutate(&mut next) {
            return Ok(false);
        }

        let json = serde_json::to_string_pretty(&next).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        write_atomic(path, &json).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), options = next.len(), "persisted option file");

        inner.values = next;
        Ok(true)
    }
}

impl Default for OptionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn transient_option(name: &str) -> String {
    format!("{TRANSIENT_PREFIX}{name}")
}

fn load_values(path: &Path) -> Result<IndexMap<String, Value>, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: Value = parse_json5_or_json(&content).map_err(|source| {
        tracing::warn!(path = %path.display(), error = %source, "unreadable option file");
        StoreError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;

    match parsed {
        Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(StoreError::NotAnObject(path.to_path_buf())),
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
