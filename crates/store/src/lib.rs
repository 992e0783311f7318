// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent key/value option store with injectable interceptors.
//!
//! Options are JSON values keyed by name. Callers can register write
//! interceptors (consulted before every write), per-name read interceptors
//! (consulted before every read of that name) and per-name read filters
//! (applied to persisted values on the way out).

mod intercept;
mod io;
mod store;

pub use intercept::{InterceptorId, ReadFilter, ReadInterceptor, WriteInterceptor};
pub use store::{OptionStore, StoreError, TRANSIENT_PREFIX};
