// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped capture session.

use crate::session::OptionCapture;
use optcap_store::OptionStore;
use std::ops::Deref;

/// Guard returned by [`OptionCapture::scope`].
///
/// Stops the session when dropped, on normal return, early return, `?` and
/// unwinding alike, unless the session was already running when the guard
/// was created.
#[must_use = "the capture session stops as soon as the guard is dropped"]
#[derive(Debug)]
pub struct CaptureGuard<'c, 's> {
    capture: &'c OptionCapture<'s>,
    started: bool,
}

impl<'c, 's> CaptureGuard<'c, 's> {
    pub(crate) fn new(capture: &'c OptionCapture<'s>, started: bool) -> Self {
        Self { capture, started }
    }

    /// The intercepted store, for handing to update callbacks
    pub fn store(&self) -> &'s OptionStore {
        self.capture.store()
    }

    /// Whether this guard started the session and will stop it
    pub fn owns_session(&self) -> bool {
        self.started
    }
}

impl<'s> Deref for CaptureGuard<'_, 's> {
    type Target = OptionCapture<'s>;

    fn deref(&self) -> &Self::Target {
        self.capture
    }
}

impl Drop for CaptureGuard<'_, '_> {
    fn drop(&mut self) {
        if self.started {
            self.capture.stop();
        }
    }
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;
