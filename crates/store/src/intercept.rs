// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Interceptor traits injected into the option store.

use crate::store::OptionStore;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Handle returned when an interceptor or filter is registered.
///
/// Pass it back to [`OptionStore::remove_interceptor`] to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterceptorId(pub(crate) u64);

impl fmt::Display for InterceptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interceptor#{}", self.0)
    }
}

/// Consulted before every option write.
///
/// Interceptors run in registration order, each receiving the value produced
/// by the previous one. The store only persists the final value when it is
/// `Some` and differs from `old_value`, so returning `old_value.cloned()`
/// turns the write into a no-op.
///
/// The store lock is not held while an interceptor runs; implementations may
/// call back into `store` (for example to register a read interceptor).
pub trait WriteInterceptor: Send + Sync {
    fn before_write(
        &self,
        store: &OptionStore,
        name: &str,
        new_value: Value,
        old_value: Option<&Value>,
    ) -> Option<Value>;
}

/// Consulted before every read of the option it was registered for.
///
/// Returning `Some` short-circuits the read; the value is handed to the
/// caller as-is, without running the store's read filters.
pub trait ReadInterceptor: Send + Sync {
    fn before_read(&self, store: &OptionStore, name: &str) -> Option<Value>;
}

/// Read-side transformation applied to persisted values of one option.
pub type ReadFilter = Arc<dyn Fn(&str, Value) -> Value + Send + Sync>;

/// Registered hook, tagged with the id it was issued.
pub(crate) enum Hook {
    Write(Arc<dyn WriteInterceptor>),
    Read {
        name: String,
        interceptor: Arc<dyn ReadInterceptor>,
    },
    Filter {
        name: String,
        filter: ReadFilter,
    },
}

impl Hook {
    pub(crate) fn option_name(&self) -> Option<&str> {
        match self {
            Hook::Write(_) => None,
            Hook::Read { name, .. } | Hook::Filter { name, .. } => Some(name),
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Write(_) => f.write_str("Write"),
            Hook::Read { name, .. } => f.debug_struct("Read").field("name", name).finish(),
            Hook::Filter { name, .. } => f.debug_struct("Filter").field("name", name).finish(),
        }
    }
}
