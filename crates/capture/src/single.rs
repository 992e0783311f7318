// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture the one option an update callback is expected to write.

use crate::session::OptionCapture;
use optcap_store::OptionStore;
use serde_json::Value;
use thiserror::Error;

/// Reasons a single-option capture can fail
#[derive(Debug, Error)]
pub enum CaptureError<E> {
    #[error("Update callback did not write any option (expected '{expected}')")]
    NoOptionCaptured { expected: String },

    #[error(
        "Update callback wrote more than one option (expected '{expected}', got {})",
        .captured.join(", ")
    )]
    TooManyOptions {
        expected: String,
        captured: Vec<String>,
    },

    #[error("Update callback wrote unexpected option '{found}' (expected '{expected}')")]
    UnexpectedOption { expected: String, found: String },

    #[error("Update callback failed: {0}")]
    Callback(#[source] E),
}

impl<E> CaptureError<E> {
    /// Short machine-readable code for the failure
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoOptionCaptured { .. } => "no_option_captured",
            Self::TooManyOptions { .. } => "too_many_options",
            Self::UnexpectedOption { .. } => "unexpected_option",
            Self::Callback(_) => "callback_failed",
        }
    }
}

/// Run `callback` against the session's store and return the value it tried
/// to save for `expected`.
///
/// The session is started for the duration of the call and stopped on every
/// exit path, including a panic in `callback`. Nothing the callback writes
/// (other than ignored options) is persisted.
///
/// If the session was already active, captures made before the call count
/// towards the checks.
pub fn capture_single_option<E, F>(
    capture: &OptionCapture<'_>,
    expected: &str,
    callback: F,
) -> Result<Value, CaptureError<E>>
where
    F: FnOnce(&OptionStore) -> Result<(), E>,
{
    let session = capture.scope();
    callback(session.store()).map_err(CaptureError::Callback)?;

    let captured = session.all();
    if captured.len() > 1 {
        return Err(CaptureError::TooManyOptions {
            expected: expected.to_string(),
            captured: captured.names().map(str::to_owned).collect(),
        });
    }

    match captured.into_iter().next() {
        None => Err(CaptureError::NoOptionCaptured {
            expected: expected.to_string(),
        }),
        Some((name, _)) if name != expected => Err(CaptureError::UnexpectedOption {
            expected: expected.to_string(),
            found: name,
        }),
        Some((_, value)) => Ok(value),
    }
}

#[cfg(test)]
#[path = "single_tests.rs"]
mod tests;
